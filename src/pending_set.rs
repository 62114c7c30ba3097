use crate::store::NodeRef;
use indexmap::IndexSet;

/// Nodes queued for the next flush, deduplicated, in first-enqueue order.
#[derive(Debug, Default)]
pub struct PendingSet(IndexSet<NodeRef>);
impl PendingSet {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `false` iff `node` was already queued. Its position is then unchanged.
	pub fn insert(&mut self, node: NodeRef) -> bool {
		self.0.insert(node)
	}

	/// Snapshots and clears the set. Nodes inserted afterwards belong to the next snapshot.
	pub fn take(&mut self) -> Vec<NodeRef> {
		self.0.drain(..).collect()
	}

	#[must_use]
	pub fn contains(&self, node: NodeRef) -> bool {
		self.0.contains(&node)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
