//! Maps widget type tags to construction functions.

use crate::{backend::Created, value::Attributes};
use hashbrown::HashMap;
use tracing::trace;

/// Builds a widget from its construction options.
pub type Factory<W> = Box<dyn Fn(&Attributes) -> W>;

/// Type tag → [`Factory`] lookup with a mandatory generic-container fallback.
pub struct Registry<W> {
	factories: HashMap<String, Factory<W>>,
	fallback: String,
}

impl<W> Registry<W> {
	/// Creates a registry whose unknown-type fallback is `fallback_kind`, built by `fallback`.
	#[must_use]
	pub fn new(fallback_kind: impl Into<String>, fallback: Factory<W>) -> Self {
		let fallback_kind = fallback_kind.into();
		let mut factories = HashMap::new();
		factories.insert(fallback_kind.clone(), fallback);
		Self { factories, fallback: fallback_kind }
	}

	/// Registers (or replaces) the factory for `kind`.
	///
	/// Replacing the fallback kind's factory changes what unknown types are built as.
	pub fn register(&mut self, kind: impl Into<String>, factory: Factory<W>) -> &mut Self {
		self.factories.insert(kind.into(), factory);
		self
	}

	#[must_use]
	pub fn contains(&self, kind: &str) -> bool {
		self.factories.contains_key(kind)
	}

	/// Resolves the kind that `kind` will actually be built as.
	#[must_use]
	pub fn resolve<'a>(&'a self, kind: &'a str) -> &'a str {
		if self.contains(kind) {
			kind
		} else {
			&self.fallback
		}
	}

	/// Builds a widget of `kind`, falling back to the generic container for unregistered kinds.
	pub fn create(&self, kind: &str, options: &Attributes) -> Created<W> {
		match self.factories.get(kind) {
			Some(factory) => Created { handle: factory(options), fell_back: false },
			None => {
				trace!(kind, fallback = %self.fallback, "Unregistered widget type.");
				let factory = &self.factories[self.fallback.as_str()];
				Created { handle: factory(options), fell_back: true }
			}
		}
	}
}

impl<W> core::fmt::Debug for Registry<W> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let mut kinds: Vec<_> = self.factories.keys().collect();
		kinds.sort();
		f.debug_struct("Registry").field("kinds", &kinds).field("fallback", &self.fallback).finish()
	}
}
