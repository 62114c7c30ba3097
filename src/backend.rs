//! The imperative widget library the bridge materializes into.

use crate::value::{Attributes, Value};
use core::fmt::Debug;
use std::rc::Rc;

/// An event callback. The payload is whatever the widget library reports for the event (key name, selected item, …).
pub type Listener = Rc<dyn Fn(&Value)>;

/// Identifies one listener registration on a widget, so it can be detached again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// The result of a construction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Created<H> {
	pub handle: H,
	/// `true` iff the requested type was unknown and the generic container was built instead.
	pub fell_back: bool,
}

/// A widget library that needs fully specified construction options and eager parent/child wiring.
///
/// Handles are cheap copyable references into the library's own widget storage.
/// None of these operations can fail: a library that can't honour a call is expected to degrade locally.
pub trait Backend {
	type Handle: Copy + Eq + Debug;

	/// The hosting screen. Exists before any node is created and lives as long as the backend.
	fn root(&self) -> Self::Handle;

	/// Builds a widget of type `kind` from `options`, handing it a reference to `screen`.
	///
	/// Unknown kinds must fall back to a generic container rather than fail.
	fn create(&mut self, kind: &str, options: &Attributes, screen: Self::Handle) -> Created<Self::Handle>;

	/// The type the widget was actually built as (after any fallback).
	fn kind(&self, handle: Self::Handle) -> &str;

	fn append(&mut self, parent: Self::Handle, child: Self::Handle);

	fn listen(&mut self, handle: Self::Handle, event: &str, listener: Listener) -> ListenerId;

	fn unlisten(&mut self, handle: Self::Handle, listener: ListenerId);

	/// Replaces the widget's content in place.
	fn set_content(&mut self, handle: Self::Handle, content: &Value);

	/// Repopulates a list-like widget. Generic assignment of `items` doesn't refresh list rendering.
	fn set_items(&mut self, handle: Self::Handle, items: &Value);

	fn set_label(&mut self, handle: Self::Handle, label: &Value);

	/// Generic named-property assignment.
	fn assign(&mut self, handle: Self::Handle, name: &str, value: &Value);

	/// Repaints the whole screen.
	fn render(&mut self);
}
