use anyhow::*;
use log::*;
use std::{collections::BTreeMap, fs, path::PathBuf};

use loginpage::storage::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// Key-value store kept as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
	path: PathBuf,
}

impl FileStore {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	pub fn user() -> Self {
		Self::new(PathBuf::from(shellexpand::tilde("~/.config/loginpage/storage.json").into_owned()))
	}

	pub fn path(&self) -> &PathBuf {
		&self.path
	}

	fn read(&self) -> Result<Entries> {
		if !self.path.exists() {
			return Ok(Default::default());
		}
		let contents = fs::read_to_string(&self.path)
			.with_context(|| anyhow!("Reading {:?}", &self.path))?;
		serde_json::from_str(&contents)
			.with_context(|| anyhow!("Processing {:?}", &self.path))
	}

	fn write(&self, entries: &Entries) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		info!("Storing {}", &self.path.to_string_lossy());
		fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
		Ok(())
	}
}

impl KeyValueStore for FileStore {
	fn load(&self, key: &str) -> Result<Option<String>> {
		Ok(self.read()?.remove(key))
	}

	fn save(&self, key: &str, value: &str) -> Result<()> {
		let mut entries = self.read()?;
		if entries.get(key).map(String::as_str) != Some(value) {
			entries.insert(key.to_owned(), value.to_owned());
			self.write(&entries)?;
		}
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<()> {
		let mut entries = self.read()?;
		if entries.remove(key).is_some() {
			self.write(&entries)?;
		}
		Ok(())
	}
}
