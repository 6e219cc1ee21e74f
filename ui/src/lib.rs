mod config;
mod dom;
mod events;
mod storage;
mod timer;

use std::{cell::RefCell, rc::Rc};

use anyhow::*;
use log::*;
use wasm_bindgen::prelude::*;

use loginpage::storage::{KeyValueStore, MemoryStore};
use loginpage::{LoginPage, UiContext};

use crate::dom::WebDocument;
use crate::storage::LocalStore;
use crate::timer::BrowserScheduler;

thread_local! {
	static PAGE: RefCell<Option<Rc<LoginPage>>> = RefCell::new(None);
}

fn with_page<T: Default>(f: impl FnOnce(&LoginPage) -> T) -> T {
	PAGE.with(|page| page.borrow().as_deref().map(f).unwrap_or_default())
}

fn boot() -> Result<Rc<LoginPage>> {
	let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
	let document = window.document().ok_or_else(|| anyhow!("no document"))?;

	let storage: Rc<dyn KeyValueStore> = match LocalStore::open(&window) {
		Result::Ok(store) => Rc::new(store),
		Result::Err(e) => {
			warn!("Remember-me won't persist: {:#}", e);
			Rc::new(MemoryStore::new())
		},
	};
	let web = Rc::new(WebDocument::new(document.clone()));
	let ctx = UiContext {
		document: web.clone(),
		events: web,
		storage,
		scheduler: Rc::new(BrowserScheduler),
		config: config::load(&document),
	};

	let page = LoginPage::boot(ctx);
	// the module may load after DOMContentLoaded has already fired
	if document.ready_state() != "loading" {
		page.init();
	}
	Ok(page)
}

// (Runs when the wasm module is instantiated.)
#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();
	let _ = console_log::init_with_level(Level::Info);

	match boot() {
		Result::Ok(page) => PAGE.with(|slot| *slot.borrow_mut() = Some(page)),
		Result::Err(e) => error!("Login page failed to start: {:#}", e),
	}
}

#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading(message: Option<String>) {
	with_page(|page| page.show_loading(message.as_deref()))
}

#[wasm_bindgen(js_name = hideLoading)]
pub fn hide_loading() {
	with_page(|page| page.hide_loading())
}

#[wasm_bindgen(js_name = showError)]
pub fn show_error(field: &str, message: &str) {
	with_page(|page| page.show_error(field, message))
}

/// Call after a successful login.
#[wasm_bindgen(js_name = saveRememberMe)]
pub fn save_remember_me() {
	with_page(|page| page.save_remember_me())
}

#[wasm_bindgen(js_name = validateUsername)]
pub fn validate_username() -> bool {
	with_page(|page| page.validate_username())
}

#[wasm_bindgen(js_name = validatePassword)]
pub fn validate_password() -> bool {
	with_page(|page| page.validate_password())
}
