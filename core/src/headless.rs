//! An in-memory page implementing [`Document`] and [`Events`], for driving the
//! controller outside a browser (tests, and the CLI).

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use crate::config::PageConfig;
use crate::context::UiContext;
use crate::dom::{self, ids, Document, Element, ElementRef};
use crate::events::{DomEvent, EventKind, Events, Handler, Subscription, Target};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::timer::ManualScheduler;

struct Listener {
	id: u64,
	target: Option<String>,
	kind: EventKind,
	handler: Rc<dyn Fn(&DomEvent)>,
}

#[derive(Default)]
struct Registry {
	next: Cell<u64>,
	listeners: RefCell<Vec<Listener>>,
}

impl Registry {
	fn add(&self, target: Option<String>, kind: EventKind, handler: Handler) -> u64 {
		let id = self.next.get();
		self.next.set(id + 1);
		self.listeners.borrow_mut().push(Listener { id, target, kind, handler: Rc::from(handler) });
		id
	}

	fn fire(&self, target: Option<&str>, event: &DomEvent) {
		// handlers may register or detach listeners, so don't hold the borrow
		let handlers: Vec<Rc<dyn Fn(&DomEvent)>> = self.listeners.borrow().iter()
			.filter(|l| l.kind == event.kind() && l.target.as_deref() == target)
			.map(|l| l.handler.clone())
			.collect();
		for handler in handlers {
			handler(event);
		}
	}
}

pub struct HeadlessElement {
	id: Option<String>,
	tag: String,
	classes: RefCell<BTreeSet<String>>,
	style: RefCell<BTreeMap<String, String>>,
	text: RefCell<String>,
	value: RefCell<String>,
	checked: Cell<bool>,
	disabled: Cell<bool>,
	connected: Cell<bool>,
	submits: Cell<usize>,
	registry: Weak<Registry>,
}

impl HeadlessElement {
	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	/// Number of `submit` events dispatched at this element.
	pub fn submits(&self) -> usize {
		self.submits.get()
	}
}

impl Element for HeadlessElement {
	fn style(&self, property: &str) -> String {
		self.style.borrow().get(property).cloned().unwrap_or_default()
	}

	fn set_style(&self, property: &str, value: &str) {
		let mut style = self.style.borrow_mut();
		if value.is_empty() {
			style.remove(property);
		} else {
			style.insert(property.to_owned(), value.to_owned());
		}
	}

	fn text(&self) -> String {
		self.text.borrow().clone()
	}

	fn set_text(&self, text: &str) {
		*self.text.borrow_mut() = text.to_owned();
	}

	fn value(&self) -> String {
		self.value.borrow().clone()
	}

	fn set_value(&self, value: &str) {
		*self.value.borrow_mut() = value.to_owned();
	}

	fn is_checked(&self) -> bool {
		self.checked.get()
	}

	fn set_checked(&self, checked: bool) {
		self.checked.set(checked)
	}

	fn is_disabled(&self) -> bool {
		self.disabled.get()
	}

	fn set_disabled(&self, disabled: bool) {
		self.disabled.set(disabled)
	}

	fn has_class(&self, class: &str) -> bool {
		self.classes.borrow().contains(class)
	}

	fn add_class(&self, class: &str) {
		self.classes.borrow_mut().insert(class.to_owned());
	}

	fn remove_class(&self, class: &str) {
		self.classes.borrow_mut().remove(class);
	}

	fn is_connected(&self) -> bool {
		self.connected.get()
	}

	fn dispatch_submit(&self) {
		self.submits.set(self.submits.get() + 1);
		if let (Some(registry), Some(id)) = (self.registry.upgrade(), self.id.as_deref()) {
			registry.fire(Some(id), &DomEvent::new(EventKind::Submit));
		}
	}
}

#[derive(Default)]
pub struct HeadlessDocument {
	nodes: RefCell<Vec<Rc<HeadlessElement>>>,
	focused: RefCell<Option<Rc<HeadlessElement>>>,
	styles: RefCell<Vec<(String, String)>>,
	registry: Rc<Registry>,
}

impl HeadlessDocument {
	pub fn new() -> Self {
		Default::default()
	}

	/// The page the login controller is written against: three form groups
	/// holding the fields and the remember checkbox, three role buttons, the
	/// form, the login button with its label and spinner, and two credential
	/// cards.
	pub fn login_page() -> Self {
		let doc = Self::new();
		doc.append("div", None, &["form-group"]);
		doc.append("input", Some(ids::USERNAME), &[]);
		doc.append("span", Some("usernameError"), &["error-message"]);
		doc.append("div", None, &["form-group"]);
		doc.append("input", Some(ids::PASSWORD), &[]);
		doc.append("span", Some("passwordError"), &["error-message"]);
		doc.append("div", None, &["form-group"]);
		doc.append("input", Some(ids::REMEMBER), &[]);
		for _ in 0..3 {
			doc.append("button", None, &["role-btn"]);
		}
		doc.append("form", Some(ids::LOGIN_FORM), &[]);
		doc.append("button", Some(ids::LOGIN_BUTTON), &[]);
		doc.append("span", Some(ids::LOGIN_TEXT), &[])
			.set_text("login");
		doc.append("span", Some(ids::LOGIN_SPINNER), &[dom::HIDDEN_CLASS]);
		for _ in 0..2 {
			doc.append("div", None, &["credential-card"]);
		}
		doc
	}

	pub fn append(&self, tag: &str, id: Option<&str>, classes: &[&str]) -> Rc<HeadlessElement> {
		let element = Rc::new(HeadlessElement {
			id: id.map(str::to_owned),
			tag: tag.to_owned(),
			classes: RefCell::new(classes.iter().map(|c| (*c).to_owned()).collect()),
			style: Default::default(),
			text: Default::default(),
			value: Default::default(),
			checked: Cell::new(false),
			disabled: Cell::new(false),
			connected: Cell::new(true),
			submits: Cell::new(0),
			registry: Rc::downgrade(&self.registry),
		});
		self.nodes.borrow_mut().push(element.clone());
		element
	}

	pub fn get(&self, id: &str) -> Option<Rc<HeadlessElement>> {
		self.nodes.borrow().iter().find(|e| e.id() == Some(id)).cloned()
	}

	pub fn remove(&self, id: &str) {
		self.nodes.borrow_mut().retain(|e| {
			let keep = e.id() != Some(id);
			if !keep {
				e.connected.set(false);
			}
			keep
		});
	}

	pub fn focus(&self, id: &str) {
		*self.focused.borrow_mut() = self.get(id);
	}

	/// Replace the field's value and fire `input` at it, as a keystroke would.
	pub fn type_into(&self, id: &str, value: &str) {
		if let Some(element) = self.get(id) {
			element.set_value(value);
			self.registry.fire(Some(id), &DomEvent::new(EventKind::Input));
		}
	}

	/// Fire `keypress` at the document and hand back the event.
	pub fn press_key(&self, key: &str) -> DomEvent {
		let event = DomEvent::key_press(key);
		self.registry.fire(None, &event);
		event
	}

	pub fn fire_ready(&self) {
		self.registry.fire(None, &DomEvent::new(EventKind::Ready));
	}

	pub fn injected_styles(&self) -> Vec<(String, String)> {
		self.styles.borrow().clone()
	}

	pub fn listener_count(&self) -> usize {
		self.registry.listeners.borrow().len()
	}
}

impl Document for HeadlessDocument {
	fn element_by_id(&self, id: &str) -> Option<ElementRef> {
		self.get(id).map(|e| e as ElementRef)
	}

	fn elements_by_class(&self, classes: &[String]) -> Vec<ElementRef> {
		self.nodes.borrow().iter()
			.filter(|e| classes.iter().any(|c| e.has_class(c)))
			.map(|e| e.clone() as ElementRef)
			.collect()
	}

	fn focus_is_input(&self) -> bool {
		self.focused.borrow().as_ref()
			.map(|e| e.is_connected() && e.tag.eq_ignore_ascii_case("input"))
			.unwrap_or(false)
	}

	fn inject_style(&self, id: &str, css: &str) {
		let mut styles = self.styles.borrow_mut();
		if !styles.iter().any(|(existing, _)| existing == id) {
			styles.push((id.to_owned(), css.to_owned()));
		}
	}
}

impl Events for HeadlessDocument {
	fn listen(&self, target: Target<'_>, kind: EventKind, handler: Handler) -> Option<Subscription> {
		let target = match target {
			Target::Document => None,
			Target::Element(id) => {
				self.get(id)?;
				Some(id.to_owned())
			},
		};
		let listener = self.registry.add(target, kind, handler);
		let registry = Rc::downgrade(&self.registry);
		Some(Subscription::new(move || {
			if let Some(registry) = registry.upgrade() {
				registry.listeners.borrow_mut().retain(|l| l.id != listener);
			}
		}))
	}
}

/// A headless page wired to a virtual clock and a store.
pub struct Headless {
	pub page: Rc<HeadlessDocument>,
	pub clock: Rc<ManualScheduler>,
	pub ctx: UiContext,
}

impl Headless {
	pub fn new(config: PageConfig) -> Self {
		Self::with_store(Rc::new(MemoryStore::new()), config)
	}

	pub fn with_store(storage: Rc<dyn KeyValueStore>, config: PageConfig) -> Self {
		Self::with_page(HeadlessDocument::login_page(), storage, config)
	}

	pub fn with_page(page: HeadlessDocument, storage: Rc<dyn KeyValueStore>, config: PageConfig) -> Self {
		let page = Rc::new(page);
		let clock = Rc::new(ManualScheduler::new());
		let ctx = UiContext {
			document: page.clone(),
			events: page.clone(),
			storage,
			scheduler: clock.clone(),
			config,
		};
		Self { page, clock, ctx }
	}

	#[cfg(test)]
	pub fn el(&self, id: &str) -> Rc<HeadlessElement> {
		match self.page.get(id) {
			Some(e) => e,
			None => panic!("no element #{} on the headless page", id),
		}
	}
}

#[cfg(test)]
pub mod test {
	use super::*;

	#[test]
	pub fn test_listen_and_detach() {
		let page = HeadlessDocument::login_page();
		let hits = Rc::new(Cell::new(0));
		let hits_ = hits.clone();
		let sub = page.listen(Target::Element(ids::USERNAME), EventKind::Input, Box::new(move |_| {
			hits_.set(hits_.get() + 1);
		})).unwrap();

		page.type_into(ids::USERNAME, "a");
		page.type_into(ids::PASSWORD, "b");
		assert_eq!(hits.get(), 1);

		sub.cancel();
		page.type_into(ids::USERNAME, "ab");
		assert_eq!(hits.get(), 1);
		assert_eq!(page.listener_count(), 0);
	}

	#[test]
	pub fn test_listen_on_missing_element() {
		let page = HeadlessDocument::new();
		assert!(page.listen(Target::Element("nope"), EventKind::Input, Box::new(|_| ())).is_none());
	}

	#[test]
	pub fn test_class_query_in_document_order() {
		let page = HeadlessDocument::new();
		page.append("div", Some("a"), &["form-group"]);
		page.append("div", Some("b"), &["other"]);
		page.append("div", Some("c"), &["credential-card", "form-group"]);
		let found = page.elements_by_class(&["form-group".to_owned(), "credential-card".to_owned()]);
		assert_eq!(found.len(), 2);
		found[0].set_text("first");
		assert_eq!(page.get("a").unwrap().text(), "first");
	}

	#[test]
	pub fn test_removed_element_is_disconnected() {
		let page = HeadlessDocument::login_page();
		let username = page.get(ids::USERNAME).unwrap();
		page.focus(ids::USERNAME);
		assert!(page.focus_is_input());
		page.remove(ids::USERNAME);
		assert!(!username.is_connected());
		assert!(page.get(ids::USERNAME).is_none());
		assert!(!page.focus_is_input());
	}
}
