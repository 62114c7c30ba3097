//! Materializes queued nodes into widgets.

use crate::{
	backend::Backend,
	store::{NodeRef, NodeStore, Placement},
};
use tracing::{debug, trace, trace_span, warn};

/// What one creation flush did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationReport {
	/// Every node that received a widget, in processing order, with where it was attached.
	pub placements: Vec<(NodeRef, Placement)>,
	/// How many of them were built as the generic container because their type was unknown.
	pub type_fallbacks: usize,
	pub listeners_attached: usize,
	pub repainted: bool,
}

impl CreationReport {
	#[must_use]
	pub fn materialized(&self) -> usize {
		self.placements.len()
	}

	/// Nodes that landed under the screen instead of their intended parent.
	pub fn misplaced(&self) -> impl Iterator<Item = (NodeRef, NodeRef)> + '_ {
		self.placements.iter().filter_map(|&(node, placement)| match placement {
			Placement::RootFallback { intended } => Some((node, intended)),
			Placement::Parent(_) | Placement::Root => None,
		})
	}
}

/// Materializes `batch` in order: build, drain listeners, resolve the parent, attach.
///
/// A parent that appears later in the same batch is not materialized yet when its child is processed,
/// so the child is attached to the screen. Nothing re-parents it later.
pub(crate) fn flush<B: Backend>(backend: &mut B, store: &mut NodeStore<B::Handle>, batch: &[NodeRef]) -> CreationReport {
	let mut report = CreationReport::default();
	let screen = store.root_handle();

	for &node_ref in batch {
		let span = trace_span!("Materializing", ?node_ref);
		let _enter = span.enter();

		let node = match store.get_mut(node_ref) {
			Some(node) => node,
			None => {
				warn!("Queued node is not in this store. Skipping.");
				continue;
			}
		};

		if node.handle.is_some() {
			trace!("Already materialized. Skipping.");
			continue;
		}

		if cfg!(feature = "dangerous-logging") {
			trace!(kind = %node.kind, options = ?node.attributes, "Creating widget.");
		} else {
			trace!(kind = %node.kind, options = node.attributes.len(), "Creating widget.");
		}

		let created = backend.create(&node.kind, &node.attributes, screen);
		if created.fell_back {
			warn!(kind = %node.kind, "Unknown widget type. Built the generic container instead.");
			report.type_fallbacks += 1;
		}
		let handle = created.handle;
		node.handle = Some(handle);

		for pending in node.pending_listeners.drain(..) {
			let id = backend.listen(handle, &pending.event, pending.listener);
			node.live_listeners.insert(pending.serial, id);
			report.listeners_attached += 1;
		}

		let (parent, placement) = store.resolve_parent(node_ref);
		if let Placement::RootFallback { intended } = placement {
			warn!(?intended, "Parent has no widget yet. Attaching to the screen instead.");
		}
		backend.append(parent, handle);
		report.placements.push((node_ref, placement));
	}

	debug!(
		materialized = report.materialized(),
		type_fallbacks = report.type_fallbacks,
		misplaced = report.misplaced().count(),
		"Creation flush done."
	);
	report
}
