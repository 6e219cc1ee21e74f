use anyhow::*;
use wasm_bindgen::JsValue;

use loginpage::storage::KeyValueStore;

fn js_error(e: JsValue) -> Error {
	anyhow!("{:?}", e)
}

/// The browser's `localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStore {
	storage: web_sys::Storage,
}

impl LocalStore {
	pub fn open(window: &web_sys::Window) -> Result<Self> {
		let storage = window.local_storage()
			.map_err(js_error)?
			.ok_or_else(|| anyhow!("localStorage unavailable"))?;
		Ok(Self { storage })
	}
}

impl KeyValueStore for LocalStore {
	fn load(&self, key: &str) -> Result<Option<String>> {
		self.storage.get_item(key).map_err(js_error)
	}

	fn save(&self, key: &str, value: &str) -> Result<()> {
		self.storage.set_item(key, value).map_err(js_error)
	}

	fn remove(&self, key: &str) -> Result<()> {
		self.storage.remove_item(key).map_err(js_error)
	}
}
