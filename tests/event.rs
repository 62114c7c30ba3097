use std::{cell::RefCell, rc::Rc};
use terminal_bridge::Value;

use recording_backend_::{bridge, Call};

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, tag: &'static str) -> impl Fn(&Value) + 'static {
	let log = Rc::clone(log);
	move |payload: &Value| log.borrow_mut().push(format!("{}:{:?}", tag, payload))
}

#[test]
fn buffered_listener_attaches_once_with_the_last_callback() {
	let (mut bridge, _) = bridge();
	let log = Log::default();
	let list = bridge.create_element("list");
	let _first = bridge.listen(list, "select item", recorder(&log, "first"));
	let _second = bridge.listen(list, "select item", recorder(&log, "second"));
	assert_eq!(bridge.node(list).unwrap().pending_listener_count(), 1);

	let report = bridge.flush_creations().unwrap();
	assert_eq!(report.listeners_attached, 1);
	assert_eq!(bridge.node(list).unwrap().pending_listener_count(), 0);

	let handle = bridge.handle(list).unwrap();
	let listens = bridge.backend().calls.iter().filter(|call| matches!(call, Call::Listen { .. })).count();
	assert_eq!(listens, 1);

	assert_eq!(bridge.backend().fire(handle, "select item", &Value::from("General")), 1);
	assert_eq!(*log.borrow(), ["second:\"General\""]);
}

#[test]
fn listeners_are_attached_before_the_widget_is_appended() {
	let (mut bridge, _) = bridge();
	let node = bridge.create_element("box");
	let _subscription = bridge.listen(node, "click", |_| ());
	bridge.flush_creations();

	let calls = &bridge.backend().calls;
	assert!(matches!(calls[0], Call::Create { .. }));
	assert!(matches!(calls[1], Call::Listen { .. }));
	assert!(matches!(calls[2], Call::Append { .. }));
}

#[test]
fn live_listeners_attach_immediately_and_independently() {
	let (mut bridge, _) = bridge();
	let log = Log::default();
	let node = bridge.create_element("textbox");
	bridge.flush_creations();
	let handle = bridge.handle(node).unwrap();

	let _a = bridge.listen(node, "submit", recorder(&log, "a"));
	let _b = bridge.listen(node, "submit", recorder(&log, "b"));
	assert_eq!(bridge.pending_creations() + bridge.pending_updates(), 0);

	assert_eq!(bridge.backend().fire(handle, "submit", &Value::from("hi")), 2);
	assert_eq!(*log.borrow(), ["a:\"hi\"", "b:\"hi\""]);
}

#[test]
fn root_listeners_attach_to_the_screen() {
	let (mut bridge, _) = bridge();
	let log = Log::default();
	let root = bridge.select_root_element();
	let _keys = bridge.listen(root, "keypress", recorder(&log, "key"));
	assert_eq!(bridge.backend().fire(bridge.root_handle(), "keypress", &Value::from("j")), 1);
	assert_eq!(*log.borrow(), ["key:\"j\""]);
}

#[test]
fn unlisten_buffered() {
	let (mut bridge, _) = bridge();
	let node = bridge.create_element("box");
	let subscription = bridge.listen(node, "click", |_| ());
	assert_eq!(subscription.node(), node);
	assert_eq!(subscription.event(), "click");

	assert!(bridge.unlisten(subscription));
	let report = bridge.flush_creations().unwrap();
	assert_eq!(report.listeners_attached, 0);
}

#[test]
fn unlisten_replaced_buffered_listener_is_a_no_op() {
	let (mut bridge, _) = bridge();
	let node = bridge.create_element("box");
	let first = bridge.listen(node, "click", |_| ());
	let _second = bridge.listen(node, "click", |_| ());

	assert!(!bridge.unlisten(first));
	assert_eq!(bridge.node(node).unwrap().pending_listener_count(), 1);
}

#[test]
fn unlisten_after_materialization() {
	let (mut bridge, _) = bridge();
	let log = Log::default();
	let node = bridge.create_element("box");
	let buffered = bridge.listen(node, "click", recorder(&log, "buffered"));
	bridge.flush_creations();
	let handle = bridge.handle(node).unwrap();
	let live = bridge.listen(node, "click", recorder(&log, "live"));

	assert!(bridge.unlisten(buffered.clone()));
	assert!(!bridge.unlisten(buffered));
	assert_eq!(bridge.backend().fire(handle, "click", &Value::Null), 1);

	assert!(bridge.unlisten(live));
	assert_eq!(bridge.backend().fire(handle, "click", &Value::Null), 0);
	assert_eq!(*log.borrow(), ["live:null"]);

	let unlistens = bridge.backend().calls.iter().filter(|call| matches!(call, Call::Unlisten { .. })).count();
	assert_eq!(unlistens, 2);
}
