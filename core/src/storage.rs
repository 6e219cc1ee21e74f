use std::{cell::RefCell, collections::BTreeMap};

use anyhow::*;

/// String key-value persistence, such as the browser's `localStorage`.
pub trait KeyValueStore: std::fmt::Debug {
	fn load(&self, key: &str) -> Result<Option<String>>;

	fn save(&self, key: &str, value: &str) -> Result<()>;

	fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
	entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
		Self { entries: RefCell::new(entries) }
	}

	pub fn entries(&self) -> BTreeMap<String, String> {
		self.entries.borrow().clone()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}
}

impl KeyValueStore for MemoryStore {
	fn load(&self, key: &str) -> Result<Option<String>> {
		Ok(self.entries.borrow().get(key).cloned())
	}

	fn save(&self, key: &str, value: &str) -> Result<()> {
		self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<()> {
		self.entries.borrow_mut().remove(key);
		Ok(())
	}
}
