//! Runtime configuration.

use core::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

pub const CREATE_DEBOUNCE_VAR: &str = "TERMINAL_BRIDGE_CREATE_DEBOUNCE_MS";
pub const UPDATE_DEBOUNCE_VAR: &str = "TERMINAL_BRIDGE_UPDATE_DEBOUNCE_MS";
pub const RENDER_AFTER_CREATE_VAR: &str = "TERMINAL_BRIDGE_RENDER_AFTER_CREATE";
pub const EMOJI_VAR: &str = "EMOJI";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("{var} must be a whole number of milliseconds, got {value:?}")]
	InvalidDuration {
		var: &'static str,
		value: String,
		#[source]
		source: ParseIntError,
	},
	#[error("{var} must be one of 1, 0, true, false, yes, no; got {value:?}")]
	InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Quiet period before queued creations are materialized.
	pub creation_debounce: Duration,
	/// Quiet period before queued attribute changes are applied and the screen repainted.
	pub update_debounce: Duration,
	/// Repaint once after each non-empty creation flush.
	///
	/// Off by default: newly created widgets only become visible with the next attribute flush.
	pub render_after_creation: bool,
	/// Keys that end the session.
	pub exit_keys: Vec<String>,
	/// Full unicode (emoji) rendering.
	pub full_unicode: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			creation_debounce: Duration::from_millis(100),
			update_debounce: Duration::from_millis(100),
			render_after_creation: false,
			exit_keys: ["escape", "q", "C-c"].iter().map(|&key| key.to_owned()).collect(),
			full_unicode: false,
		}
	}
}

impl Config {
	/// Reads overrides from the process environment. Unset variables keep their defaults.
	///
	/// # Errors
	///
	/// Iff a set variable can't be parsed.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|var| std::env::var(var).ok())
	}

	/// Like [`from_env`](`Config::from_env`), but reads variables through `lookup`.
	///
	/// # Errors
	///
	/// Iff a set variable can't be parsed.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let mut config = Self::default();
		if let Some(value) = lookup(CREATE_DEBOUNCE_VAR) {
			config.creation_debounce = parse_millis(CREATE_DEBOUNCE_VAR, value)?;
		}
		if let Some(value) = lookup(UPDATE_DEBOUNCE_VAR) {
			config.update_debounce = parse_millis(UPDATE_DEBOUNCE_VAR, value)?;
		}
		if let Some(value) = lookup(RENDER_AFTER_CREATE_VAR) {
			config.render_after_creation = parse_flag(RENDER_AFTER_CREATE_VAR, value)?;
		}
		// Any non-empty value enables it.
		if let Some(value) = lookup(EMOJI_VAR) {
			config.full_unicode = !value.trim().is_empty();
		}
		Ok(config)
	}
}

fn parse_millis(var: &'static str, value: String) -> Result<Duration, ConfigError> {
	match value.trim().parse() {
		Ok(millis) => Ok(Duration::from_millis(millis)),
		Err(source) => Err(ConfigError::InvalidDuration { var, value, source }),
	}
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" => Ok(true),
		"0" | "false" | "no" | "" => Ok(false),
		_ => Err(ConfigError::InvalidFlag { var, value }),
	}
}
