#![doc(html_root_url = "https://docs.rs/terminal-bridge/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod backend;
pub mod bridge;
pub mod config;
pub mod creation;
pub mod debounce;
pub mod headless;
pub mod pending_set;
pub mod registry;
pub mod store;
pub mod update;
pub mod value;

pub use bridge::{Bridge, PollReport, Subscription};
pub use config::Config;
pub use store::NodeRef;
pub use value::{Attributes, Value};
