//! The mutation surface the UI framework drives.

use crate::{
	backend::{Backend, Listener},
	config::Config,
	creation::{self, CreationReport},
	debounce::{Clock, Debouncer, SystemClock},
	pending_set::PendingSet,
	store::{NodeRef, NodeStore, VNode},
	update::{self, UpdateReport},
	value::{Attributes, Value},
};
use std::{rc::Rc, time::Instant};
use tracing::{debug, instrument, trace, warn};

/// Returned by [`Bridge::listen`]. Hand it to [`Bridge::unlisten`] to detach the listener.
///
/// Dropping it leaves the listener attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use = "Dropping a `Subscription` leaves the listener attached for good."]
pub struct Subscription {
	node: NodeRef,
	event: String,
	serial: u64,
}
impl Subscription {
	pub fn node(&self) -> NodeRef {
		self.node
	}

	pub fn event(&self) -> &str {
		&self.event
	}
}

/// What one [`Bridge::poll`] flushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
	pub creation: Option<CreationReport>,
	pub update: Option<UpdateReport>,
}
impl PollReport {
	#[must_use]
	pub fn is_idle(&self) -> bool {
		self.creation.is_none() && self.update.is_none()
	}
}

#[derive(Debug)]
struct Scheduler {
	pending: PendingSet,
	debouncer: Debouncer,
}
impl Scheduler {
	fn new(debouncer: Debouncer) -> Self {
		Self { pending: PendingSet::new(), debouncer }
	}

	fn enqueue(&mut self, node: NodeRef, now: Instant) {
		self.pending.insert(node);
		self.debouncer.touch(now);
	}

	/// Snapshots the batch and disarms the timer, or returns `None` if nothing is queued.
	fn take(&mut self) -> Option<Vec<NodeRef>> {
		self.debouncer.reset();
		let batch = self.pending.take();
		if batch.is_empty() {
			None
		} else {
			Some(batch)
		}
	}
}

/// Deferred, batched bridge from framework-style tree mutations to an imperative [`Backend`].
///
/// Façade calls only record desired state and queue work. Widgets are built and updated when the
/// host calls [`poll`](`Bridge::poll`) after a scheduler's debounce window has passed.
/// Nothing here fails: unknown types and missing parents degrade to the generic container and the screen.
pub struct Bridge<B: Backend, C: Clock = SystemClock> {
	backend: B,
	clock: C,
	config: Config,
	store: NodeStore<B::Handle>,
	creations: Scheduler,
	updates: Scheduler,
	next_serial: u64,
}

impl<B: Backend> Bridge<B> {
	#[must_use]
	pub fn new(backend: B, config: Config) -> Self {
		Self::with_clock(backend, config, SystemClock)
	}
}

impl<B: Backend, C: Clock> Bridge<B, C> {
	#[must_use]
	pub fn with_clock(backend: B, config: Config, clock: C) -> Self {
		let store = NodeStore::new(backend.root());
		Self {
			creations: Scheduler::new(Debouncer::new(config.creation_debounce)),
			updates: Scheduler::new(Debouncer::new(config.update_debounce)),
			backend,
			clock,
			config,
			store,
			next_serial: 0,
		}
	}

	pub fn create_element(&mut self, kind: &str) -> NodeRef {
		self.create_node(kind, Attributes::new())
	}

	/// Creates a `text` node whose initial content is `value`.
	pub fn create_text(&mut self, value: impl Into<Value>) -> NodeRef {
		self.create_node("text", Attributes::new().with("content", value))
	}

	fn create_node(&mut self, kind: &str, attributes: Attributes) -> NodeRef {
		let node = self.store.push(kind, attributes);
		trace!(?node, kind, "Created node.");
		self.creations.enqueue(node, self.clock.now());
		node
	}

	#[must_use]
	pub fn select_root_element(&self) -> NodeRef {
		NodeRef::ROOT
	}

	/// Records `parent` as `child`'s intended parent. Attachment happens when `child` is materialized.
	///
	/// A child that already has a widget stays where it is.
	pub fn append_child(&mut self, parent: NodeRef, child: NodeRef) {
		if child == NodeRef::ROOT {
			warn!(?parent, "Tried to append the root node. Ignoring.");
			return;
		}
		if parent == child {
			warn!(?child, "Tried to append a node to itself. Ignoring.");
			return;
		}
		match self.store.get_mut(child) {
			Some(node) => {
				if node.handle.is_some() {
					debug!(?parent, ?child, "Child already has a widget; re-parenting is not supported.");
				}
				node.parent = Some(parent);
			}
			None => warn!(?child, "Unknown node. Ignoring."),
		}
	}

	/// Stores `value` and, if `node` is materialized, queues an attribute flush.
	pub fn set_attribute(&mut self, node: NodeRef, name: &str, value: impl Into<Value>) {
		self.store_and_queue(node, name, value.into());
	}

	/// Like [`set_attribute`](`Bridge::set_attribute`), except on materialized nodes:
	/// `content`, `items` and `label` go straight through the widget's dedicated setters, unbatched.
	///
	/// `styles` is stored as `style`.
	pub fn set_property(&mut self, node: NodeRef, name: &str, value: impl Into<Value>) {
		let name = if name == "styles" { "style" } else { name };
		let value = value.into();

		let handle = match self.store.get(node) {
			Some(vnode) => vnode.handle,
			None => return warn!(?node, name, "Unknown node. Ignoring."),
		};

		match (handle, name) {
			(Some(handle), "content") => self.backend.set_content(handle, &value),
			(Some(handle), "items") => self.backend.set_items(handle, &value),
			(Some(handle), "label") => self.backend.set_label(handle, &value),
			_ => return self.store_and_queue(node, name, value),
		}
		trace!(?node, name, "Applied through dedicated setter.");
		self.record(node, name, value);
	}

	pub fn set_style(&mut self, node: NodeRef, style: &str, value: impl Into<Value>) {
		self.store_and_queue(node, style, value.into());
	}

	/// Stores `value` as the node's `content`.
	pub fn set_value(&mut self, node: NodeRef, value: impl Into<Value>) {
		self.store_and_queue(node, "content", value.into());
	}

	fn record(&mut self, node: NodeRef, name: &str, value: Value) -> Option<&VNode<B::Handle>> {
		let vnode = self.store.get_mut(node)?;
		vnode.attributes.set(name, value);
		Some(vnode)
	}

	fn store_and_queue(&mut self, node: NodeRef, name: &str, value: Value) {
		let materialized = match self.record(node, name, value) {
			Some(vnode) => vnode.is_materialized(),
			None => return warn!(?node, name, "Unknown node. Ignoring."),
		};
		if materialized {
			self.updates.enqueue(node, self.clock.now());
		}
	}

	/// Attaches `listener` to `node`'s widget, or buffers it until the widget exists.
	///
	/// Only the last listener buffered per event name is attached on materialization.
	pub fn listen(&mut self, node: NodeRef, event: &str, listener: impl Fn(&Value) + 'static) -> Subscription {
		let listener: Listener = Rc::new(listener);
		let serial = self.next_serial;
		self.next_serial += 1;

		match self.store.get_mut(node) {
			Some(vnode) => match vnode.handle {
				Some(handle) => {
					let id = self.backend.listen(handle, event, listener);
					vnode.live_listeners.insert(serial, id);
				}
				None => {
					if let Some(replaced) = vnode.buffer_listener(event, serial, listener) {
						trace!(?node, event, replaced, "Replaced buffered listener.");
					}
				}
			},
			None => warn!(?node, event, "Unknown node. Listener dropped."),
		}

		Subscription { node, event: event.to_owned(), serial }
	}

	/// Detaches the listener behind `subscription`.
	///
	/// Returns `false` if there was nothing left to detach: the subscription was already used,
	/// or a later listener for the same event replaced it before materialization.
	pub fn unlisten(&mut self, subscription: Subscription) -> bool {
		let Subscription { node, event, serial } = subscription;
		let vnode = match self.store.get_mut(node) {
			Some(vnode) => vnode,
			None => return false,
		};

		if let Some(id) = vnode.live_listeners.remove(&serial) {
			if let Some(handle) = vnode.handle {
				self.backend.unlisten(handle, id);
			}
			return true;
		}

		let before = vnode.pending_listeners.len();
		vnode.pending_listeners.retain(|pending| !(pending.serial == serial && pending.event == event));
		before != vnode.pending_listeners.len()
	}

	/// Runs every flush whose debounce window has passed: creations first, then attribute updates.
	#[instrument(skip(self))]
	pub fn poll(&mut self) -> PollReport {
		let now = self.clock.now();
		let mut report = PollReport::default();
		if self.creations.debouncer.is_due(now) {
			report.creation = self.flush_creations();
		}
		if self.updates.debouncer.is_due(now) {
			report.update = self.flush_updates();
		}
		report
	}

	/// The earliest instant at which [`poll`](`Bridge::poll`) will have work to do.
	#[must_use]
	pub fn next_deadline(&self) -> Option<Instant> {
		match (self.creations.debouncer.deadline(), self.updates.debouncer.deadline()) {
			(Some(a), Some(b)) => Some(a.min(b)),
			(a, b) => a.or(b),
		}
	}

	/// Materializes everything queued for creation now, regardless of the debounce window.
	#[instrument(skip(self))]
	pub fn flush_creations(&mut self) -> Option<CreationReport> {
		let batch = self.creations.take()?;
		let mut report = creation::flush(&mut self.backend, &mut self.store, &batch);
		if self.config.render_after_creation {
			self.backend.render();
			report.repainted = true;
		}
		Some(report)
	}

	/// Applies everything queued for update now, regardless of the debounce window.
	#[instrument(skip(self))]
	pub fn flush_updates(&mut self) -> Option<UpdateReport> {
		let batch = self.updates.take()?;
		Some(update::flush(&mut self.backend, &self.store, &batch))
	}

	/// Flushes both queues now. Creations go first so queued updates find their widgets.
	pub fn flush_all(&mut self) -> PollReport {
		PollReport { creation: self.flush_creations(), update: self.flush_updates() }
	}

	/// The hosting screen's widget.
	#[must_use]
	pub fn root_handle(&self) -> B::Handle {
		self.store.root_handle()
	}

	#[must_use]
	pub fn handle(&self, node: NodeRef) -> Option<B::Handle> {
		self.store.get(node)?.handle
	}

	/// The intended parent recorded by [`append_child`](`Bridge::append_child`). `None` for the root and unappended nodes.
	#[must_use]
	pub fn parent_node(&self, node: NodeRef) -> Option<NodeRef> {
		self.store.get(node)?.parent
	}

	#[must_use]
	pub fn node_type(&self, node: NodeRef) -> Option<&str> {
		self.store.get(node).map(VNode::kind)
	}

	#[must_use]
	pub fn node(&self, node: NodeRef) -> Option<&VNode<B::Handle>> {
		self.store.get(node)
	}

	/// Including the root.
	#[must_use]
	pub fn node_count(&self) -> usize {
		self.store.len()
	}

	#[must_use]
	pub fn pending_creations(&self) -> usize {
		self.creations.pending.len()
	}

	#[must_use]
	pub fn pending_updates(&self) -> usize {
		self.updates.pending.len()
	}

	#[must_use]
	pub fn backend(&self) -> &B {
		&self.backend
	}

	pub fn backend_mut(&mut self) -> &mut B {
		&mut self.backend
	}
}

impl<B: Backend, C: Clock> core::fmt::Debug for Bridge<B, C> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Bridge")
			.field("nodes", &self.store.len())
			.field("pending_creations", &self.creations.pending.len())
			.field("pending_updates", &self.updates.pending.len())
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}
