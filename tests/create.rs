use std::time::Duration;
use terminal_bridge::{store::Placement, Config, Value};

use recording_backend_::{bridge, bridge_with, Call, WINDOW};

#[test]
fn nothing_before_the_window_passes() {
	let (mut bridge, clock) = bridge();
	let node = bridge.create_element("box");

	clock.advance(WINDOW - Duration::from_millis(1));
	assert!(bridge.poll().is_idle());
	assert_eq!(bridge.handle(node), None);
	assert!(bridge.backend().calls.is_empty());

	clock.advance(Duration::from_millis(1));
	let report = bridge.poll();
	assert_eq!(report.creation.map(|creation| creation.materialized()), Some(1));
	assert!(report.update.is_none());
	assert_eq!(bridge.handle(node), Some(1));
}

#[test]
fn burst_extends_the_window() {
	let (mut bridge, clock) = bridge();
	let a = bridge.create_element("box");
	clock.advance(Duration::from_millis(60));
	let b = bridge.create_element("box");
	clock.advance(Duration::from_millis(60));
	assert!(bridge.poll().is_idle());

	clock.advance(Duration::from_millis(40));
	let report = bridge.poll().creation.unwrap();
	assert_eq!(report.placements, [(a, Placement::Root), (b, Placement::Root)]);
	assert_eq!(bridge.next_deadline(), None);
}

#[test]
fn each_node_materializes_exactly_once() {
	let (mut bridge, clock) = bridge();
	let nodes: Vec<_> = (0..20).map(|_| bridge.create_element("text")).collect();
	assert_eq!(bridge.pending_creations(), 20);

	clock.advance(WINDOW);
	bridge.poll();
	assert_eq!(bridge.backend().creates().len(), 20);
	for (i, &node) in nodes.iter().enumerate() {
		assert_eq!(bridge.handle(node), Some(i + 1));
	}

	clock.advance(WINDOW * 10);
	assert!(bridge.poll().is_idle());
	assert!(bridge.flush_creations().is_none());
	assert_eq!(bridge.backend().creates().len(), 20);
}

#[test]
fn child_attaches_to_parent_materialized_earlier_in_the_batch() {
	let (mut bridge, _) = bridge();
	let root = bridge.select_root_element();
	let a = bridge.create_element("box");
	let b = bridge.create_element("text");
	bridge.append_child(root, a);
	bridge.append_child(a, b);

	let report = bridge.flush_creations().unwrap();
	assert_eq!(report.placements, [(a, Placement::Root), (b, Placement::Parent(a))]);

	let (a, b) = (bridge.handle(a).unwrap(), bridge.handle(b).unwrap());
	assert_eq!(bridge.backend().parent_of(a), Some(0));
	assert_eq!(bridge.backend().parent_of(b), Some(a));
}

#[test]
fn child_attaches_to_parent_from_an_earlier_flush() {
	let (mut bridge, _) = bridge();
	let parent = bridge.create_element("box");
	bridge.flush_creations();

	let child = bridge.create_element("text");
	bridge.append_child(parent, child);
	bridge.flush_creations();

	let parent = bridge.handle(parent).unwrap();
	assert_eq!(bridge.backend().parent_of(bridge.handle(child).unwrap()), Some(parent));
}

#[test]
fn lagging_parent_falls_back_to_the_screen() {
	let (mut bridge, _) = bridge();
	let child = bridge.create_element("text");
	let parent = bridge.create_element("box");
	bridge.append_child(parent, child);

	let report = bridge.flush_creations().unwrap();
	assert_eq!(report.misplaced().collect::<Vec<_>>(), [(child, parent)]);
	assert!(report.placements[0].1.is_fallback());

	let child = bridge.handle(child).unwrap();
	assert_eq!(bridge.backend().parent_of(child), Some(0));
	// No later re-parenting.
	bridge.set_attribute(parent, "fg", "green");
	bridge.flush_updates();
	assert_eq!(bridge.backend().parent_of(child), Some(0));
}

#[test]
fn append_after_materialization_does_not_move_the_widget() {
	let (mut bridge, _) = bridge();
	let a = bridge.create_element("box");
	let b = bridge.create_element("box");
	bridge.flush_creations();
	bridge.backend_mut().clear();

	bridge.append_child(a, b);
	assert_eq!(bridge.parent_node(b), Some(a));
	bridge.flush_all();
	assert!(!bridge.backend().calls.iter().any(|call| matches!(call, Call::Append { .. })));
}

#[test]
fn self_append_is_ignored() {
	let (mut bridge, _) = bridge();
	let node = bridge.create_element("box");
	bridge.append_child(node, node);
	assert_eq!(bridge.parent_node(node), None);
	assert_eq!(bridge.node_count(), 2);

	let report = bridge.flush_creations().unwrap();
	assert_eq!(report.placements, [(node, Placement::Root)]);
	let handle = bridge.handle(node).unwrap();
	assert_eq!(bridge.backend().parent_of(handle), Some(0));
}

#[test]
fn unknown_type_builds_the_generic_container() {
	let (mut bridge, _) = bridge();
	let node = bridge.create_element("sparkline");
	let report = bridge.flush_creations().unwrap();
	assert_eq!(report.type_fallbacks, 1);
	assert_eq!(bridge.node_type(node), Some("sparkline"));
	assert_eq!(bridge.backend().creates(), [("sparkline".to_owned(), 1)]);
}

#[test]
fn buffered_attributes_become_construction_options() {
	let (mut bridge, _) = bridge();
	let list = bridge.create_element("list");
	bridge.set_attribute(list, "fg", "green");
	bridge.set_property(list, "items", vec!["a", "b"]);
	bridge.set_property(list, "label", "Chats");
	bridge.set_property(list, "styles", Value::Null);
	assert_eq!(bridge.pending_updates(), 0);

	bridge.flush_creations();
	let handle = bridge.handle(list).unwrap();
	let options = bridge.backend().options_of(handle).unwrap();
	assert_eq!(options.keys().collect::<Vec<_>>(), ["fg", "items", "label", "style"]);
	assert_eq!(options.get("items"), Some(&Value::from(vec!["a", "b"])));
	assert!(!bridge.backend().calls.iter().any(|call| matches!(call, Call::SetItems { .. } | Call::SetLabel { .. })));
}

#[test]
fn text_nodes_carry_their_content() {
	let (mut bridge, _) = bridge();
	let text = bridge.create_text("Loading...");
	assert_eq!(bridge.node_type(text), Some("text"));
	bridge.flush_creations();
	let options = bridge.backend().options_of(bridge.handle(text).unwrap()).unwrap();
	assert_eq!(options.get("content"), Some(&Value::from("Loading...")));
}

#[test]
fn factories_receive_the_screen() {
	let (mut bridge, _) = bridge();
	bridge.create_element("box");
	bridge.flush_creations();
	assert!(matches!(bridge.backend().calls[0], Call::Create { screen: 0, .. }));
}

#[test]
fn creation_flush_does_not_repaint_by_default() {
	let (mut bridge, clock) = bridge();
	bridge.create_element("box");
	clock.advance(WINDOW);
	let report = bridge.poll().creation.unwrap();
	assert!(!report.repainted);
	assert_eq!(bridge.backend().renders(), 0);
}

#[test]
fn creation_flush_can_repaint() {
	let (mut bridge, clock) = bridge_with(Config { render_after_creation: true, ..Config::default() });
	bridge.create_element("box");
	bridge.create_element("box");
	clock.advance(WINDOW);
	assert!(bridge.poll().creation.unwrap().repainted);
	assert_eq!(bridge.backend().renders(), 1);
}
