use anyhow::*;
use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
	En,
	Ar,
}

impl Default for Locale {
	fn default() -> Self {
		Locale::En
	}
}

impl Locale {
	pub fn messages(&self) -> Messages {
		match self {
			Locale::En => Messages::default(),
			Locale::Ar => Messages::arabic(),
		}
	}
}

/// Texts shown on the page. `{min}` in the too-short messages is replaced by
/// the configured minimum length.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Messages {
	pub username_required: String,
	pub username_too_short: String,
	pub password_required: String,
	pub password_too_short: String,
	pub loading: String,
	pub login_label: String,
}

impl Default for Messages {
	fn default() -> Self {
		Self {
			username_required: "username required".to_owned(),
			username_too_short: "username too short".to_owned(),
			password_required: "password required".to_owned(),
			password_too_short: "password must be at least {min} characters".to_owned(),
			loading: "logging in...".to_owned(),
			login_label: "login".to_owned(),
		}
	}
}

impl Messages {
	pub fn arabic() -> Self {
		Self {
			username_required: "اسم المستخدم مطلوب".to_owned(),
			username_too_short: "اسم المستخدم قصير جداً".to_owned(),
			password_required: "كلمة المرور مطلوبة".to_owned(),
			password_too_short: "كلمة المرور يجب أن تكون {min} أحرف على الأقل".to_owned(),
			loading: "جاري تسجيل الدخول...".to_owned(),
			login_label: "تسجيل الدخول".to_owned(),
		}
	}
}

/// Per-text overrides applied on top of the locale's messages.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MessageOverrides {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username_required: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username_too_short: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password_required: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password_too_short: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub loading: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub login_label: Option<String>,
}

impl MessageOverrides {
	pub fn apply(&self, base: Messages) -> Messages {
		let pick = |over: &Option<String>, base: String| over.clone().unwrap_or(base);
		Messages {
			username_required: pick(&self.username_required, base.username_required),
			username_too_short: pick(&self.username_too_short, base.username_too_short),
			password_required: pick(&self.password_required, base.password_required),
			password_too_short: pick(&self.password_too_short, base.password_too_short),
			loading: pick(&self.loading, base.loading),
			login_label: pick(&self.login_label, base.login_label),
		}
	}
}

impl From<Messages> for MessageOverrides {
	fn from(messages: Messages) -> Self {
		Self {
			username_required: Some(messages.username_required),
			username_too_short: Some(messages.username_too_short),
			password_required: Some(messages.password_required),
			password_too_short: Some(messages.password_too_short),
			loading: Some(messages.loading),
			login_label: Some(messages.login_label),
		}
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Colors {
	pub invalid: String,
	pub valid: String,
}

impl Default for Colors {
	fn default() -> Self {
		Self {
			invalid: "#e74c3c".to_owned(),
			valid: "#4CAF50".to_owned(),
		}
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Rules {
	pub username_min: usize,
	pub password_min: usize,
}

impl Default for Rules {
	fn default() -> Self {
		Self { username_min: 3, password_min: 6 }
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
	pub stagger_ms: u64,
	pub duration_ms: u64,
	pub offset_px: u32,
	pub classes: Vec<String>,
	pub shake_ms: u64,
}

impl Default for AnimationConfig {
	fn default() -> Self {
		Self {
			stagger_ms: 100,
			duration_ms: 500,
			offset_px: 20,
			classes: vec!["form-group".to_owned(), "role-btn".to_owned(), "credential-card".to_owned()],
			shake_ms: 500,
		}
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StorageKeys {
	pub flag: String,
	pub username: String,
}

impl Default for StorageKeys {
	fn default() -> Self {
		Self {
			flag: "rememberMe".to_owned(),
			username: "rememberedUsername".to_owned(),
		}
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PageConfig {
	#[serde(default)]
	pub locale: Locale,

	#[serde(default)]
	messages: MessageOverrides,

	#[serde(default)]
	pub colors: Colors,

	#[serde(default)]
	pub rules: Rules,

	#[serde(default)]
	pub animation: AnimationConfig,

	#[serde(default)]
	pub storage_keys: StorageKeys,
}

impl PageConfig {
	pub fn from_json(contents: &str) -> Result<Self> {
		serde_json::from_str(contents).context("Parsing login page config")
	}

	pub fn with_locale(self, locale: Locale) -> Self {
		Self { locale, ..self }
	}

	pub fn with_messages(self, messages: Messages) -> Self {
		Self { messages: messages.into(), ..self }
	}

	pub fn messages(&self) -> Messages {
		self.messages.apply(self.locale.messages())
	}
}

/// CSS duration for a millisecond count, e.g. `500` -> `0.5s`.
pub fn css_seconds(millis: u64) -> String {
	format!("{}s", millis as f64 / 1000.0)
}
