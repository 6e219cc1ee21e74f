use std::rc::Rc;

use crate::config::PageConfig;
use crate::dom::{Document, ElementRef};
use crate::events::Events;
use crate::storage::KeyValueStore;
use crate::timer::Scheduler;

/// Everything the login page controller touches, passed explicitly.
#[derive(Clone)]
pub struct UiContext {
	pub document: Rc<dyn Document>,
	pub events: Rc<dyn Events>,
	pub storage: Rc<dyn KeyValueStore>,
	pub scheduler: Rc<dyn Scheduler>,
	pub config: PageConfig,
}

impl UiContext {
	pub fn element(&self, id: &str) -> Option<ElementRef> {
		self.document.element_by_id(id)
	}
}
