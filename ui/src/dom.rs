use std::rc::Rc;

use log::*;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Event, HtmlButtonElement, HtmlElement, HtmlInputElement};

use loginpage::dom::{Document, Element, ElementRef};

pub(crate) fn report(what: &str, result: Result<(), JsValue>) {
	if let Err(e) = result {
		warn!("{} failed: {:?}", what, e);
	}
}

pub struct WebElement(HtmlElement);

impl WebElement {
	fn input(&self) -> Option<&HtmlInputElement> {
		self.0.dyn_ref::<HtmlInputElement>()
	}
}

impl Element for WebElement {
	fn style(&self, property: &str) -> String {
		self.0.style().get_property_value(property).unwrap_or_default()
	}

	fn set_style(&self, property: &str, value: &str) {
		let style = self.0.style();
		report("Setting style", if value.is_empty() {
			style.remove_property(property).map(|_| ())
		} else {
			style.set_property(property, value)
		});
	}

	fn text(&self) -> String {
		self.0.text_content().unwrap_or_default()
	}

	fn set_text(&self, text: &str) {
		self.0.set_text_content(Some(text));
	}

	fn value(&self) -> String {
		self.input().map(|i| i.value()).unwrap_or_default()
	}

	fn set_value(&self, value: &str) {
		if let Some(input) = self.input() {
			input.set_value(value);
		}
	}

	fn is_checked(&self) -> bool {
		self.input().map(|i| i.checked()).unwrap_or(false)
	}

	fn set_checked(&self, checked: bool) {
		if let Some(input) = self.input() {
			input.set_checked(checked);
		}
	}

	fn is_disabled(&self) -> bool {
		if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
			button.disabled()
		} else if let Some(input) = self.input() {
			input.disabled()
		} else {
			self.0.has_attribute("disabled")
		}
	}

	fn set_disabled(&self, disabled: bool) {
		if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
			button.set_disabled(disabled);
		} else if let Some(input) = self.input() {
			input.set_disabled(disabled);
		} else if disabled {
			report("Disabling", self.0.set_attribute("disabled", ""));
		} else {
			report("Enabling", self.0.remove_attribute("disabled"));
		}
	}

	fn has_class(&self, class: &str) -> bool {
		self.0.class_list().contains(class)
	}

	fn add_class(&self, class: &str) {
		report("Adding class", self.0.class_list().add_1(class));
	}

	fn remove_class(&self, class: &str) {
		report("Removing class", self.0.class_list().remove_1(class));
	}

	fn is_connected(&self) -> bool {
		self.0.is_connected()
	}

	fn dispatch_submit(&self) {
		let dispatched = Event::new("submit").and_then(|event| self.0.dispatch_event(&event));
		report("Dispatching submit", dispatched.map(|_| ()));
	}
}

pub struct WebDocument {
	pub(crate) document: web_sys::Document,
}

impl WebDocument {
	pub fn new(document: web_sys::Document) -> Self {
		Self { document }
	}

	fn wrap(element: web_sys::Element) -> Option<ElementRef> {
		let element = element.dyn_into::<HtmlElement>().ok()?;
		Some(Rc::new(WebElement(element)))
	}
}

impl Document for WebDocument {
	fn element_by_id(&self, id: &str) -> Option<ElementRef> {
		self.document.get_element_by_id(id).and_then(Self::wrap)
	}

	fn elements_by_class(&self, classes: &[String]) -> Vec<ElementRef> {
		if classes.is_empty() {
			return Vec::new();
		}
		let selector = classes.iter()
			.map(|c| format!(".{}", c))
			.collect::<Vec<_>>()
			.join(", ");
		let nodes = match self.document.query_selector_all(&selector) {
			Ok(nodes) => nodes,
			Err(e) => {
				warn!("Bad selector {:?}: {:?}", selector, e);
				return Vec::new();
			},
		};
		(0..nodes.length())
			.filter_map(|i| nodes.item(i))
			.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
			.filter_map(Self::wrap)
			.collect()
	}

	fn focus_is_input(&self) -> bool {
		self.document.active_element()
			.map(|e| e.tag_name().eq_ignore_ascii_case("input"))
			.unwrap_or(false)
	}

	fn inject_style(&self, id: &str, css: &str) {
		if self.document.get_element_by_id(id).is_some() {
			return;
		}
		let head = match self.document.head() {
			Some(head) => head,
			None => return,
		};
		let injected = self.document.create_element("style").and_then(|style| {
			style.set_id(id);
			style.set_text_content(Some(css));
			head.append_child(&style).map(|_| ())
		});
		report("Injecting styles", injected);
	}
}
