use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::*;

use crate::animation;
use crate::context::UiContext;
use crate::dom::{ids, Document, Element};
use crate::events::{DomEvent, EventKind, Events, Subscription, Target};
use crate::feedback;
use crate::field::Field;
use crate::loading;
use crate::remember;

/// The login page's behaviour: entrance animation, live field validation,
/// Enter-to-submit, remember-me, loading state and error display.
pub struct LoginPage {
	ctx: UiContext,
	initialized: Cell<bool>,
	subscriptions: RefCell<Vec<Subscription>>,
}

impl LoginPage {
	pub fn new(ctx: UiContext) -> Rc<Self> {
		Rc::new(Self {
			ctx,
			initialized: Cell::new(false),
			subscriptions: RefCell::new(Vec::new()),
		})
	}

	/// Inject the page styles now and run [`LoginPage::init`] once the
	/// document is ready.
	pub fn boot(ctx: UiContext) -> Rc<Self> {
		let page = Self::new(ctx);
		animation::inject_styles(&page.ctx);
		let weak = Rc::downgrade(&page);
		let sub = page.ctx.events.listen(Target::Document, EventKind::Ready, Box::new(move |_| {
			if let Some(page) = weak.upgrade() {
				page.init();
			}
		}));
		page.keep(sub);
		page
	}

	/// Animate, wire up listeners, then restore the remembered username. Only
	/// the first call does anything.
	pub fn init(self: &Rc<Self>) {
		if self.initialized.replace(true) {
			return;
		}
		debug!("Initializing login page");
		animation::animate_entrance(&self.ctx);
		self.setup_listeners();
		remember::restore(&self.ctx);
	}

	fn keep(&self, sub: Option<Subscription>) {
		if let Some(sub) = sub {
			self.subscriptions.borrow_mut().push(sub);
		}
	}

	fn handler<F: Fn(&LoginPage, &DomEvent) + 'static>(self: &Rc<Self>, f: F) -> Box<dyn Fn(&DomEvent)> {
		let weak: Weak<Self> = Rc::downgrade(self);
		Box::new(move |event| {
			if let Some(page) = weak.upgrade() {
				f(&*page, event)
			}
		})
	}

	fn setup_listeners(self: &Rc<Self>) {
		let events = self.ctx.events.clone();
		for field in [Field::Username, Field::Password] {
			let handler = self.handler(move |page, _| {
				feedback::validate(&page.ctx, field);
			});
			self.keep(events.listen(Target::Element(field.input_id()), EventKind::Input, handler));
		}
		let handler = self.handler(|page, event| {
			page.handle_key(event);
		});
		self.keep(events.listen(Target::Document, EventKind::KeyPress, handler));
	}

	/// Enter in any input submits the login form once, in place of the
	/// browser's own handling. Returns whether a submit was dispatched.
	pub fn handle_key(&self, event: &DomEvent) -> bool {
		if event.key() != Some("Enter") || !self.ctx.document.focus_is_input() {
			return false;
		}
		let form = match self.ctx.element(ids::LOGIN_FORM) {
			Some(form) => form,
			None => return false,
		};
		event.prevent_default();
		form.dispatch_submit();
		true
	}

	pub fn validate_username(&self) -> bool {
		feedback::validate_username(&self.ctx)
	}

	pub fn validate_password(&self) -> bool {
		feedback::validate_password(&self.ctx)
	}

	pub fn show_loading(&self, message: Option<&str>) {
		loading::show_loading(&self.ctx, message)
	}

	pub fn hide_loading(&self) {
		loading::hide_loading(&self.ctx)
	}

	pub fn show_error(&self, field: &str, message: &str) {
		feedback::show_error(&self.ctx, field, message)
	}

	pub fn save_remember_me(&self) {
		remember::save(&self.ctx)
	}

	pub fn listener_count(&self) -> usize {
		self.subscriptions.borrow().len()
	}
}
