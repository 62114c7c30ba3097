//! Trailing-edge debouncing against a pluggable clock.

use std::{
	cell::Cell,
	rc::Rc,
	time::{Duration, Instant},
};

/// A source of the current time.
pub trait Clock {
	fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> Instant {
		Instant::now()
	}
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);
impl ManualClock {
	#[must_use]
	pub fn new() -> Self {
		Self(Rc::new(Cell::new(Instant::now())))
	}

	pub fn advance(&self, by: Duration) {
		self.0.set(self.0.get() + by);
	}
}
impl Default for ManualClock {
	fn default() -> Self {
		Self::new()
	}
}
impl Clock for ManualClock {
	fn now(&self) -> Instant {
		self.0.get()
	}
}

/// Fires once per burst, one `window` after the burst's last event.
#[derive(Debug, Clone)]
pub struct Debouncer {
	window: Duration,
	deadline: Option<Instant>,
}
impl Debouncer {
	#[must_use]
	pub fn new(window: Duration) -> Self {
		Self { window, deadline: None }
	}

	/// Records an event at `now`, pushing the deadline back.
	pub fn touch(&mut self, now: Instant) {
		self.deadline = Some(now + self.window);
	}

	#[must_use]
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	#[must_use]
	pub fn is_due(&self, now: Instant) -> bool {
		self.deadline.is_some_and(|deadline| now >= deadline)
	}

	/// Disarms the timer. Call when the batch is taken.
	pub fn reset(&mut self) {
		self.deadline = None;
	}
}
