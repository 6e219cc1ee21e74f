use std::cell::Cell;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
	/// The document finished parsing (`DOMContentLoaded`).
	Ready,
	Input,
	KeyPress,
	Submit,
}

impl EventKind {
	pub fn dom_name(&self) -> &'static str {
		match self {
			EventKind::Ready => "DOMContentLoaded",
			EventKind::Input => "input",
			EventKind::KeyPress => "keypress",
			EventKind::Submit => "submit",
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target<'a> {
	Document,
	Element(&'a str),
}

#[derive(Debug)]
pub struct DomEvent {
	kind: EventKind,
	key: Option<String>,
	default_prevented: Cell<bool>,
}

impl DomEvent {
	pub fn new(kind: EventKind) -> Self {
		Self { kind, key: None, default_prevented: Cell::new(false) }
	}

	pub fn key_press(key: &str) -> Self {
		Self { kind: EventKind::KeyPress, key: Some(key.to_owned()), default_prevented: Cell::new(false) }
	}

	pub fn kind(&self) -> EventKind {
		self.kind
	}

	pub fn key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

pub type Handler = Box<dyn Fn(&DomEvent)>;

/// Keeps a handler attached. Dropping it detaches the handler.
pub struct Subscription {
	detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	pub fn new<F: FnOnce() + 'static>(detach: F) -> Self {
		Self { detach: Some(Box::new(detach)) }
	}

	pub fn cancel(mut self) {
		self.run_detach();
	}

	fn run_detach(&mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.run_detach();
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("attached", &self.detach.is_some()).finish()
	}
}

pub trait Events {
	/// Register `handler` for `kind` events on `target`. Returns `None` when the
	/// target element doesn't exist.
	fn listen(&self, target: Target<'_>, kind: EventKind, handler: Handler) -> Option<Subscription>;
}
