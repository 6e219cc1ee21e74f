use anyhow::*;
use log::*;

use crate::config::StorageKeys;
use crate::context::UiContext;
use crate::dom::{ids, Element};
use crate::storage::KeyValueStore;

const FLAG_SET: &str = "true";

/// The username remembered from an earlier visit, if the user opted in.
pub fn load(store: &dyn KeyValueStore, keys: &StorageKeys) -> Result<Option<String>> {
	if store.load(&keys.flag)?.as_deref() != Some(FLAG_SET) {
		return Ok(None);
	}
	Ok(store.load(&keys.username)?.filter(|u| !u.is_empty()))
}

/// Remember `username`, or forget everything when `None`.
pub fn store(store: &dyn KeyValueStore, keys: &StorageKeys, username: Option<&str>) -> Result<()> {
	match username {
		Some(username) => {
			store.save(&keys.flag, FLAG_SET)?;
			store.save(&keys.username, username)
		},
		None => {
			store.remove(&keys.flag)?;
			store.remove(&keys.username)
		},
	}
}

/// Pre-fill the username and tick the remember box from storage.
pub fn restore(ctx: &UiContext) {
	let username = match load(&*ctx.storage, &ctx.config.storage_keys) {
		Result::Ok(Some(username)) => username,
		Result::Ok(None) => return,
		Result::Err(e) => {
			warn!("Reading remembered username failed: {:#}", e);
			return;
		},
	};
	debug!("Restoring remembered username");
	if let Some(input) = ctx.element(ids::USERNAME) {
		input.set_value(&username);
	}
	if let Some(checkbox) = ctx.element(ids::REMEMBER) {
		checkbox.set_checked(true);
	}
}

/// Persist the remember box and username as they currently stand on the page.
pub fn save(ctx: &UiContext) {
	let checkbox = ctx.element(ids::REMEMBER);
	let input = ctx.element(ids::USERNAME);
	let (checkbox, input) = match (checkbox, input) {
		(Some(checkbox), Some(input)) => (checkbox, input),
		_ => return,
	};
	let username = input.value();
	let remembered = if checkbox.is_checked() { Some(username.as_str()) } else { None };
	if let Err(e) = store(&*ctx.storage, &ctx.config.storage_keys, remembered) {
		warn!("Saving remember-me preference failed: {:#}", e);
	}
}

#[cfg(test)]
pub mod test {
	use std::rc::Rc;
	use std::collections::BTreeMap;

	use super::*;
	use crate::config::PageConfig;
	use crate::headless::Headless;
	use crate::storage::MemoryStore;

	#[derive(Debug)]
	struct BrokenStore;

	impl KeyValueStore for BrokenStore {
		fn load(&self, _: &str) -> Result<Option<String>> {
			Err(anyhow!("storage disabled"))
		}

		fn save(&self, _: &str, _: &str) -> Result<()> {
			Err(anyhow!("quota exceeded"))
		}

		fn remove(&self, _: &str) -> Result<()> {
			Err(anyhow!("storage disabled"))
		}
	}

	fn page_with(store: Rc<MemoryStore>) -> Headless {
		Headless::with_store(store, PageConfig::default())
	}

	#[test]
	pub fn test_round_trip() {
		let store = Rc::new(MemoryStore::new());
		let first = page_with(store.clone());
		first.el(ids::USERNAME).set_value("alice");
		first.el(ids::REMEMBER).set_checked(true);
		save(&first.ctx);
		assert_eq!(store.entries().get("rememberMe").map(String::as_str), Some("true"));
		assert_eq!(store.entries().get("rememberedUsername").map(String::as_str), Some("alice"));

		let second = page_with(store.clone());
		restore(&second.ctx);
		assert_eq!(second.el(ids::USERNAME).value(), "alice");
		assert!(second.el(ids::REMEMBER).is_checked());

		second.el(ids::REMEMBER).set_checked(false);
		save(&second.ctx);
		assert!(store.is_empty());

		let third = page_with(store.clone());
		restore(&third.ctx);
		assert_eq!(third.el(ids::USERNAME).value(), "");
		assert!(!third.el(ids::REMEMBER).is_checked());
	}

	#[test]
	pub fn test_flag_must_be_exactly_true() {
		let keys = StorageKeys::default();
		let entries = |flag: &str, user: &str| {
			let mut m = BTreeMap::new();
			m.insert("rememberMe".to_owned(), flag.to_owned());
			m.insert("rememberedUsername".to_owned(), user.to_owned());
			MemoryStore::from_entries(m)
		};
		assert_eq!(load(&entries("true", "bob"), &keys).unwrap().as_deref(), Some("bob"));
		assert_eq!(load(&entries("TRUE", "bob"), &keys).unwrap(), None);
		assert_eq!(load(&entries("1", "bob"), &keys).unwrap(), None);
		assert_eq!(load(&entries("true", ""), &keys).unwrap(), None);
		assert_eq!(load(&MemoryStore::new(), &keys).unwrap(), None);
	}

	#[test]
	pub fn test_username_saved_as_typed() {
		let store = MemoryStore::new();
		let keys = StorageKeys::default();
		super::store(&store, &keys, Some(" carol ")).unwrap();
		assert_eq!(load(&store, &keys).unwrap().as_deref(), Some(" carol "));
	}

	#[test]
	pub fn test_custom_keys() {
		let store = MemoryStore::new();
		let keys = StorageKeys { flag: "fuel.remember".to_owned(), username: "fuel.user".to_owned() };
		super::store(&store, &keys, Some("dave")).unwrap();
		assert!(store.entries().contains_key("fuel.user"));
		assert_eq!(load(&store, &StorageKeys::default()).unwrap(), None);
	}

	#[test]
	pub fn test_missing_checkbox_skips_save() {
		let store = Rc::new(MemoryStore::new());
		let h = page_with(store.clone());
		h.el(ids::USERNAME).set_value("erin");
		h.page.remove(ids::REMEMBER);
		save(&h.ctx);
		assert!(store.is_empty());
	}

	#[test]
	pub fn test_storage_failures_are_swallowed() {
		let h = Headless::with_store(Rc::new(BrokenStore), PageConfig::default());
		h.el(ids::USERNAME).set_value("frank");
		h.el(ids::REMEMBER).set_checked(true);
		save(&h.ctx);
		restore(&h.ctx);
		assert_eq!(h.el(ids::USERNAME).value(), "frank");
	}
}
