use crate::config::{Messages, PageConfig, Rules};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
	Username,
	Password,
}

impl Field {
	pub fn key(&self) -> &'static str {
		match self {
			Field::Username => "username",
			Field::Password => "password",
		}
	}

	pub fn input_id(&self) -> &'static str {
		self.key()
	}

	pub fn error_id(&self) -> &'static str {
		match self {
			Field::Username => "usernameError",
			Field::Password => "passwordError",
		}
	}
}

/// Id of the error slot paired with an arbitrary field key.
pub fn error_id_for(key: &str) -> String {
	format!("{}Error", key)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldState {
	Neutral,
	Valid,
	Invalid,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Issue {
	Required,
	TooShort { min: usize },
}

impl Issue {
	pub fn message(&self, field: Field, messages: &Messages) -> String {
		let template = match (field, self) {
			(Field::Username, Issue::Required) => &messages.username_required,
			(Field::Username, Issue::TooShort { .. }) => &messages.username_too_short,
			(Field::Password, Issue::Required) => &messages.password_required,
			(Field::Password, Issue::TooShort { .. }) => &messages.password_too_short,
		};
		match self {
			Issue::TooShort { min } => template.replace("{min}", &min.to_string()),
			Issue::Required => template.clone(),
		}
	}
}

/// Whitespace as browsers trim it, which includes the byte order mark.
fn is_trimmed(c: char) -> bool {
	c.is_whitespace() || c == '\u{FEFF}'
}

/// Usernames are trimmed before checking; passwords are taken as typed.
/// Lengths are in UTF-16 code units, matching what the browser reports.
pub fn check(field: Field, raw: &str, rules: &Rules) -> Result<(), Issue> {
	let (value, min) = match field {
		Field::Username => (raw.trim_matches(is_trimmed), rules.username_min),
		Field::Password => (raw, rules.password_min),
	};
	let len = value.encode_utf16().count();
	if len == 0 {
		Err(Issue::Required)
	} else if len < min {
		Err(Issue::TooShort { min })
	} else {
		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
	pub state: FieldState,
	pub message: Option<String>,
}

impl Verdict {
	pub fn is_valid(&self) -> bool {
		self.state == FieldState::Valid
	}
}

pub fn verdict(field: Field, raw: &str, config: &PageConfig) -> Verdict {
	match check(field, raw, &config.rules) {
		Ok(()) => Verdict { state: FieldState::Valid, message: None },
		Err(issue) => Verdict {
			state: FieldState::Invalid,
			message: Some(issue.message(field, &config.messages())),
		},
	}
}
