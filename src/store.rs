//! The append-only node arena.

use crate::{
	backend::{Listener, ListenerId},
	value::Attributes,
};
use core::fmt::{self, Debug, Formatter};
use hashbrown::HashMap;

/// Opaque reference to a node, handed to the UI framework.
///
/// Stable for the lifetime of the [`NodeStore`] that issued it, since nodes are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(usize);

impl NodeRef {
	/// The hosting screen's node.
	pub const ROOT: NodeRef = NodeRef(0);

	fn index(self) -> usize {
		self.0
	}
}

pub(crate) struct PendingListener {
	pub(crate) event: String,
	pub(crate) serial: u64,
	pub(crate) listener: Listener,
}

impl Debug for PendingListener {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("PendingListener").field("event", &self.event).field("serial", &self.serial).finish_non_exhaustive()
	}
}

/// The bridge's record of one UI element.
#[derive(Debug)]
pub struct VNode<H> {
	pub(crate) kind: String,
	pub(crate) parent: Option<NodeRef>,
	/// At most one per event name. Drained on materialization.
	pub(crate) pending_listeners: Vec<PendingListener>,
	/// Subscription serial → live registration, for listeners that reached the widget.
	pub(crate) live_listeners: HashMap<u64, ListenerId>,
	pub(crate) attributes: Attributes,
	pub(crate) handle: Option<H>,
}

impl<H: Copy> VNode<H> {
	#[must_use]
	pub fn kind(&self) -> &str {
		&self.kind
	}

	/// The intended parent, as set by `append_child`. `None` means the root.
	#[must_use]
	pub fn parent(&self) -> Option<NodeRef> {
		self.parent
	}

	/// The desired-state snapshot.
	#[must_use]
	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	#[must_use]
	pub fn handle(&self) -> Option<H> {
		self.handle
	}

	#[must_use]
	pub fn is_materialized(&self) -> bool {
		self.handle.is_some()
	}

	#[must_use]
	pub fn pending_listener_count(&self) -> usize {
		self.pending_listeners.len()
	}

	/// Buffers `listener` for `event`, replacing (and returning the serial of) any earlier one.
	pub(crate) fn buffer_listener(&mut self, event: &str, serial: u64, listener: Listener) -> Option<u64> {
		match self.pending_listeners.iter_mut().find(|pending| pending.event == event) {
			Some(pending) => {
				pending.listener = listener;
				Some(core::mem::replace(&mut pending.serial, serial))
			}
			None => {
				self.pending_listeners.push(PendingListener { event: event.to_owned(), serial, listener });
				None
			}
		}
	}
}

/// Where a freshly materialized node was attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
	/// Under the intended parent's widget.
	Parent(NodeRef),
	/// Under the screen, because the node was never appended anywhere else.
	Root,
	/// Under the screen although `intended` was requested, because `intended` had no widget yet.
	RootFallback { intended: NodeRef },
}

impl Placement {
	#[must_use]
	pub fn is_fallback(self) -> bool {
		matches!(self, Placement::RootFallback { .. })
	}
}

/// Flat, id-indexed node list. The root is created with the store and sits at [`NodeRef::ROOT`].
#[derive(Debug)]
pub struct NodeStore<H> {
	root: H,
	nodes: Vec<VNode<H>>,
}

impl<H: Copy> NodeStore<H> {
	#[must_use]
	pub fn new(root: H) -> Self {
		Self {
			root,
			nodes: vec![VNode {
				kind: "root".to_owned(),
				parent: None,
				pending_listeners: Vec::new(),
				live_listeners: HashMap::new(),
				attributes: Attributes::new(),
				handle: Some(root),
			}],
		}
	}

	/// Registers a new unmaterialized node.
	pub fn push(&mut self, kind: impl Into<String>, attributes: Attributes) -> NodeRef {
		let node = NodeRef(self.nodes.len());
		self.nodes.push(VNode {
			kind: kind.into(),
			parent: None,
			pending_listeners: Vec::new(),
			live_listeners: HashMap::new(),
			attributes,
			handle: None,
		});
		node
	}

	#[must_use]
	pub fn get(&self, node: NodeRef) -> Option<&VNode<H>> {
		self.nodes.get(node.index())
	}

	pub(crate) fn get_mut(&mut self, node: NodeRef) -> Option<&mut VNode<H>> {
		self.nodes.get_mut(node.index())
	}

	#[must_use]
	pub fn root_handle(&self) -> H {
		self.root
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Always `false`: the root exists from the start.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Finds the widget `node` should be appended to: its intended parent's if that is materialized, the screen otherwise.
	#[must_use]
	pub fn resolve_parent(&self, node: NodeRef) -> (H, Placement) {
		let root = self.root_handle();
		match self.get(node).and_then(|node| node.parent) {
			None | Some(NodeRef::ROOT) => (root, Placement::Root),
			Some(parent) => match self.get(parent).and_then(|parent| parent.handle) {
				Some(handle) => (handle, Placement::Parent(parent)),
				None => (root, Placement::RootFallback { intended: parent }),
			},
		}
	}
}
