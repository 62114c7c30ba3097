//! Dynamic property values as they arrive from the UI framework.

use core::fmt::{self, Debug, Formatter};
use indexmap::IndexMap;

/// A property, attribute or style value.
///
/// Widgets accept loosely typed construction options (numbers, flags, strings, nested style maps, item lists),
/// so values stay dynamic until a [`Backend`](`crate::backend::Backend`) interprets them.
#[derive(Clone, Default, PartialEq)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Number(f64),
	String(String),
	List(Vec<Value>),
	Map(Attributes),
}

impl Value {
	#[must_use]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(string) => Some(string),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(list) => Some(list),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_map(&self) -> Option<&Attributes> {
		match self {
			Value::Map(map) => Some(map),
			_ => None,
		}
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(b) => Debug::fmt(b, f),
			Value::Number(n) => Debug::fmt(n, f),
			Value::String(s) => Debug::fmt(s, f),
			Value::List(list) => f.debug_list().entries(list).finish(),
			Value::Map(map) => Debug::fmt(map, f),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Number(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Number(value.into())
	}
}

impl From<u32> for Value {
	fn from(value: u32) -> Self {
		Value::Number(value.into())
	}
}

impl From<Attributes> for Value {
	fn from(value: Attributes) -> Self {
		Value::Map(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(value: Vec<T>) -> Self {
		Value::List(value.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

/// Name → [`Value`] map that keeps first-insertion order and overwrites values in place.
///
/// Order matters because widget libraries apply construction options (and generic assignments) in the order given.
#[derive(Clone, Default, PartialEq)]
pub struct Attributes(IndexMap<String, Value>);

impl Attributes {
	#[must_use]
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Stores `value` under `name`, returning the value it replaced.
	pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(name.into(), value.into())
	}

	/// Builder form of [`set`](`Attributes::set`).
	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.set(name, value);
		self
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
		self.0.iter().map(|(n, v)| (n.as_str(), v))
	}

	pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
		self.0.keys().map(String::as_str)
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

impl Debug for Attributes {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(&self.0).finish()
	}
}
