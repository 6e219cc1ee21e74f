use log::*;

use loginpage::PageConfig;

/// `<script type="application/json" id="loginConfig">` holding a `PageConfig`.
pub const CONFIG_ELEMENT_ID: &str = "loginConfig";

pub fn load(document: &web_sys::Document) -> PageConfig {
	let contents = document.get_element_by_id(CONFIG_ELEMENT_ID)
		.and_then(|e| e.text_content());
	match contents {
		Some(contents) => PageConfig::from_json(&contents).unwrap_or_else(|e| {
			warn!("Ignoring #{}: {:#}", CONFIG_ELEMENT_ID, e);
			PageConfig::default()
		}),
		None => PageConfig::default(),
	}
}
