//! Applies buffered attribute changes to live widgets.

use crate::{
	backend::Backend,
	store::{NodeRef, NodeStore},
};
use tracing::{debug, trace, trace_span, warn};

/// What one attribute flush did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
	pub nodes: usize,
	pub assignments: usize,
	/// Always `true` for a flush that ran: exactly one repaint per batch.
	pub repainted: bool,
}

/// Whether `name` is left out of generic assignment on a widget of type `kind`.
///
/// `content` and list `items` go through their dedicated setters instead, and `border` can't be reassigned after construction.
#[must_use]
pub fn skips_generic_assignment(kind: &str, name: &str) -> bool {
	matches!(name, "content" | "border") || (kind == "list" && name == "items")
}

/// Assigns every non-excluded attribute of each node in `batch` onto its widget, then repaints once.
pub(crate) fn flush<B: Backend>(backend: &mut B, store: &NodeStore<B::Handle>, batch: &[NodeRef]) -> UpdateReport {
	let mut report = UpdateReport::default();

	for &node_ref in batch {
		let span = trace_span!("Updating", ?node_ref);
		let _enter = span.enter();

		let (node, handle) = match store.get(node_ref).and_then(|node| Some((node, node.handle?))) {
			Some(found) => found,
			None => {
				warn!("Queued node has no widget. Skipping.");
				continue;
			}
		};

		for (name, value) in node.attributes.iter() {
			if skips_generic_assignment(backend.kind(handle), name) {
				trace!(name, "Excluded from generic assignment.");
				continue;
			}
			if cfg!(feature = "dangerous-logging") {
				trace!(name, ?value, "Assigning.");
			}
			backend.assign(handle, name, value);
			report.assignments += 1;
		}
		report.nodes += 1;
	}

	backend.render();
	report.repainted = true;

	debug!(nodes = report.nodes, assignments = report.assignments, "Attribute flush done.");
	report
}
