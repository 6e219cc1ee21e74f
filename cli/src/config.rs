use anyhow::*;
use log::*;
use std::{fs, path::PathBuf};

use loginpage::PageConfig;

fn user_path() -> PathBuf {
	PathBuf::from(shellexpand::tilde("~/.config/loginpage/config.json").into_owned())
}

/// Config from `explicit` if given, else the user config file if it exists,
/// else the defaults.
pub fn load(explicit: Option<&str>) -> Result<PageConfig> {
	let path = match explicit {
		Some(path) => PathBuf::from(shellexpand::tilde(path).into_owned()),
		None => {
			let path = user_path();
			if !path.exists() {
				debug!("No config at {:?}, using defaults", &path);
				return Ok(PageConfig::default());
			}
			path
		},
	};
	let contents = fs::read_to_string(&path)
		.with_context(|| anyhow!("Reading {:?}", &path))?;
	PageConfig::from_json(&contents)
		.with_context(|| anyhow!("Processing {:?}", &path))
}

#[cfg(test)]
pub mod test {
	use super::*;

	#[test]
	pub fn test_explicit_path() {
		let path = std::env::temp_dir().join(format!("loginpage-config-{}.json", std::process::id()));
		fs::write(&path, r#"{ "rules": { "username_min": 5 } }"#).unwrap();
		let config = load(path.to_str()).unwrap();
		fs::remove_file(&path).unwrap();
		assert_eq!(config.rules.username_min, 5);
	}

	#[test]
	pub fn test_missing_explicit_path_is_an_error() {
		let err = load(Some("/nonexistent/loginpage.json")).unwrap_err();
		assert!(format!("{:#}", err).contains("Reading"));
	}
}
