//! An in-memory widget library with blessed-style widget types.
//!
//! Nothing is drawn: widgets only record their construction options, assigned properties and wiring,
//! and [`render`](`Backend::render`) counts repaints. Events are injected with [`HeadlessScreen::emit`]
//! and [`HeadlessScreen::press_key`].
//!
//! Listeners run while the screen is borrowed, so they can't call back into the [`Bridge`](`crate::Bridge`).
//! Have them record what happened (for example into an `Rc<RefCell<Vec<_>>>`) and apply it afterwards.

use crate::{
	backend::{Backend, Created, Listener, ListenerId},
	config::Config,
	registry::{Factory, Registry},
	value::{Attributes, Value},
};
use tracing::{trace, warn};

/// Widget types the headless screen knows. Anything else is built as a `box`.
pub const KINDS: &[&str] = &["text", "box", "table", "textbox", "list", "line", "sparkline", "bar", "map", "log", "grid"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

/// One headless widget.
pub struct HeadlessWidget {
	kind: String,
	options: Attributes,
	properties: Attributes,
	content: Value,
	items: Vec<Value>,
	label: Value,
	screen: Option<WidgetId>,
	parent: Option<WidgetId>,
	children: Vec<WidgetId>,
	listeners: Vec<(ListenerId, String, Listener)>,
}

impl HeadlessWidget {
	/// Builds a widget the way blessed constructors read their options: `content`, `items` and `label` seed the widget's state.
	#[must_use]
	pub fn from_options(kind: &str, options: &Attributes) -> Self {
		Self {
			kind: kind.to_owned(),
			options: options.clone(),
			properties: Attributes::new(),
			content: options.get("content").cloned().unwrap_or_default(),
			items: options.get("items").and_then(Value::as_list).map(<[Value]>::to_vec).unwrap_or_default(),
			label: options.get("label").cloned().unwrap_or_default(),
			screen: None,
			parent: None,
			children: Vec::new(),
			listeners: Vec::new(),
		}
	}

	#[must_use]
	pub fn kind(&self) -> &str {
		&self.kind
	}

	/// The options the widget was constructed with.
	#[must_use]
	pub fn options(&self) -> &Attributes {
		&self.options
	}

	/// Properties assigned after construction.
	#[must_use]
	pub fn properties(&self) -> &Attributes {
		&self.properties
	}

	/// A property's current value: the last assignment, else the construction option.
	#[must_use]
	pub fn property(&self, name: &str) -> Option<&Value> {
		self.properties.get(name).or_else(|| self.options.get(name))
	}

	#[must_use]
	pub fn content(&self) -> &Value {
		&self.content
	}

	#[must_use]
	pub fn items(&self) -> &[Value] {
		&self.items
	}

	#[must_use]
	pub fn label(&self) -> &Value {
		&self.label
	}

	/// The screen handed to the constructor. `None` for the screen itself.
	#[must_use]
	pub fn screen(&self) -> Option<WidgetId> {
		self.screen
	}

	#[must_use]
	pub fn parent(&self) -> Option<WidgetId> {
		self.parent
	}

	#[must_use]
	pub fn children(&self) -> &[WidgetId] {
		&self.children
	}

	#[must_use]
	pub fn listener_count(&self, event: &str) -> usize {
		self.listeners.iter().filter(|(_, e, _)| e == event).count()
	}
}

impl core::fmt::Debug for HeadlessWidget {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("HeadlessWidget")
			.field("kind", &self.kind)
			.field("options", &self.options)
			.field("properties", &self.properties)
			.field("parent", &self.parent)
			.field("children", &self.children)
			.field("listeners", &self.listeners.len())
			.finish_non_exhaustive()
	}
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
	/// The key is an exit key. The host should end the session.
	Exit,
	/// The key was dispatched as `keypress` on the screen to this many listeners.
	Dispatched(usize),
}

/// The headless widget library. The screen is widget `0`.
#[derive(Debug)]
pub struct HeadlessScreen {
	registry: Registry<HeadlessWidget>,
	widgets: Vec<HeadlessWidget>,
	renders: usize,
	next_listener: u64,
	exit_keys: Vec<String>,
	full_unicode: bool,
}

impl HeadlessScreen {
	#[must_use]
	pub fn new(config: &Config) -> Self {
		let mut registry = Registry::new("box", factory("box"));
		for &kind in KINDS {
			registry.register(kind, factory(kind));
		}
		Self::with_registry(config, registry)
	}

	/// Uses a custom widget registry instead of [`KINDS`].
	#[must_use]
	pub fn with_registry(config: &Config, registry: Registry<HeadlessWidget>) -> Self {
		Self {
			registry,
			widgets: vec![HeadlessWidget::from_options("screen", &Attributes::new())],
			renders: 0,
			next_listener: 0,
			exit_keys: config.exit_keys.clone(),
			full_unicode: config.full_unicode,
		}
	}

	#[must_use]
	pub fn widget(&self, handle: WidgetId) -> Option<&HeadlessWidget> {
		self.widgets.get(handle.0)
	}

	/// Including the screen.
	#[must_use]
	pub fn widget_count(&self) -> usize {
		self.widgets.len()
	}

	/// How often the screen has been repainted.
	#[must_use]
	pub fn renders(&self) -> usize {
		self.renders
	}

	#[must_use]
	pub fn full_unicode(&self) -> bool {
		self.full_unicode
	}

	/// Calls every listener for `event` on `handle` with `payload`, in registration order. Returns how many ran.
	pub fn emit(&self, handle: WidgetId, event: &str, payload: &Value) -> usize {
		let listeners: Vec<Listener> = match self.widget(handle) {
			Some(widget) => widget.listeners.iter().filter(|(_, e, _)| e == event).map(|(_, _, listener)| listener.clone()).collect(),
			None => return 0,
		};
		trace!(?handle, event, listeners = listeners.len(), "Emitting.");
		for listener in &listeners {
			listener(payload);
		}
		listeners.len()
	}

	/// Handles a key press on the screen: exit keys end the session, everything else becomes a `keypress` event.
	pub fn press_key(&self, key: &str) -> KeyOutcome {
		if self.exit_keys.iter().any(|exit| exit == key) {
			return KeyOutcome::Exit;
		}
		KeyOutcome::Dispatched(self.emit(self.root(), "keypress", &Value::from(key)))
	}

	fn widget_mut(&mut self, handle: WidgetId) -> Option<&mut HeadlessWidget> {
		let widget = self.widgets.get_mut(handle.0);
		if widget.is_none() {
			warn!(?handle, "Unknown widget. Ignoring.");
		}
		widget
	}
}

fn factory(kind: &'static str) -> Factory<HeadlessWidget> {
	Box::new(move |options: &Attributes| HeadlessWidget::from_options(kind, options))
}

impl Backend for HeadlessScreen {
	type Handle = WidgetId;

	fn root(&self) -> WidgetId {
		WidgetId(0)
	}

	fn create(&mut self, kind: &str, options: &Attributes, screen: WidgetId) -> Created<WidgetId> {
		let Created { handle: mut widget, fell_back } = self.registry.create(kind, options);
		widget.screen = Some(screen);
		let handle = WidgetId(self.widgets.len());
		self.widgets.push(widget);
		Created { handle, fell_back }
	}

	fn kind(&self, handle: WidgetId) -> &str {
		self.widget(handle).map_or("", HeadlessWidget::kind)
	}

	fn append(&mut self, parent: WidgetId, child: WidgetId) {
		if self.widget(parent).is_none() || parent == child {
			return warn!(?parent, ?child, "Invalid parent. Ignoring.");
		}
		let previous = match self.widget_mut(child) {
			Some(widget) => widget.parent.replace(parent),
			None => return,
		};
		if let Some(previous) = previous.and_then(|previous| self.widget_mut(previous)) {
			previous.children.retain(|&c| c != child);
		}
		if let Some(parent) = self.widget_mut(parent) {
			parent.children.push(child);
		}
	}

	fn listen(&mut self, handle: WidgetId, event: &str, listener: Listener) -> ListenerId {
		let id = ListenerId(self.next_listener);
		self.next_listener += 1;
		if let Some(widget) = self.widget_mut(handle) {
			widget.listeners.push((id, event.to_owned(), listener));
		}
		id
	}

	fn unlisten(&mut self, handle: WidgetId, listener: ListenerId) {
		if let Some(widget) = self.widget_mut(handle) {
			widget.listeners.retain(|(id, _, _)| *id != listener);
		}
	}

	fn set_content(&mut self, handle: WidgetId, content: &Value) {
		if let Some(widget) = self.widget_mut(handle) {
			widget.content = content.clone();
		}
	}

	fn set_items(&mut self, handle: WidgetId, items: &Value) {
		if let Some(widget) = self.widget_mut(handle) {
			widget.items = items.as_list().map(<[Value]>::to_vec).unwrap_or_default();
		}
	}

	fn set_label(&mut self, handle: WidgetId, label: &Value) {
		if let Some(widget) = self.widget_mut(handle) {
			widget.label = label.clone();
		}
	}

	fn assign(&mut self, handle: WidgetId, name: &str, value: &Value) {
		if let Some(widget) = self.widget_mut(handle) {
			widget.properties.set(name, value.clone());
		}
	}

	fn render(&mut self) {
		self.renders += 1;
	}
}
