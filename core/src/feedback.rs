use log::*;

use crate::animation;
use crate::context::UiContext;
use crate::dom::Element;
use crate::field::{self, Field, FieldState};

fn border_color(ctx: &UiContext, state: FieldState) -> &str {
	match state {
		FieldState::Neutral => "",
		FieldState::Valid => ctx.config.colors.valid.as_str(),
		FieldState::Invalid => ctx.config.colors.invalid.as_str(),
	}
}

/// Check the field's current value and render the result: message in the error
/// slot, border colored by validity. Advisory only; returns the validity.
pub fn validate(ctx: &UiContext, field: Field) -> bool {
	let input = match ctx.element(field.input_id()) {
		Some(input) => input,
		None => return false,
	};
	let verdict = field::verdict(field, &input.value(), &ctx.config);
	if let Some(slot) = ctx.element(field.error_id()) {
		slot.set_text(verdict.message.as_deref().unwrap_or(""));
	}
	input.set_style("border-color", border_color(ctx, verdict.state));
	verdict.is_valid()
}

pub fn validate_username(ctx: &UiContext) -> bool {
	validate(ctx, Field::Username)
}

pub fn validate_password(ctx: &UiContext) -> bool {
	validate(ctx, Field::Password)
}

/// How the field currently renders, judged by its border.
pub fn field_state(ctx: &UiContext, field: Field) -> FieldState {
	let border = match ctx.element(field.input_id()) {
		Some(input) => input.style("border-color"),
		None => return FieldState::Neutral,
	};
	if border.is_empty() {
		FieldState::Neutral
	} else if border.eq_ignore_ascii_case(&ctx.config.colors.valid) {
		FieldState::Valid
	} else {
		FieldState::Invalid
	}
}

/// Put `message` in the `<key>Error` slot, mark the `<key>` input invalid and
/// shake it. Does nothing unless both elements exist.
pub fn show_error(ctx: &UiContext, key: &str, message: &str) {
	let slot = ctx.element(&field::error_id_for(key));
	let input = ctx.element(key);
	if let (Some(slot), Some(input)) = (slot, input) {
		debug!("Error on {}: {}", key, message);
		slot.set_text(message);
		input.set_style("border-color", border_color(ctx, FieldState::Invalid));
		animation::shake(ctx, &input);
	}
}

#[cfg(test)]
pub mod test {
	use std::time::Duration;

	use super::*;
	use crate::config::{Messages, PageConfig};
	use crate::dom::ids;
	use crate::headless::Headless;

	#[test]
	pub fn test_username_feedback() {
		let h = Headless::new(PageConfig::default());
		let input = h.el(ids::USERNAME);
		let slot = h.el("usernameError");
		assert_eq!(field_state(&h.ctx, Field::Username), FieldState::Neutral);

		input.set_value("");
		assert!(!validate_username(&h.ctx));
		assert_eq!(slot.text(), "username required");
		assert_eq!(input.style("border-color"), "#e74c3c");
		assert_eq!(field_state(&h.ctx, Field::Username), FieldState::Invalid);

		input.set_value("al");
		assert!(!validate_username(&h.ctx));
		assert_eq!(slot.text(), "username too short");

		input.set_value("  al  ");
		assert!(!validate_username(&h.ctx));

		input.set_value("alice");
		assert!(validate_username(&h.ctx));
		assert_eq!(slot.text(), "");
		assert_eq!(input.style("border-color"), "#4CAF50");
		assert_eq!(field_state(&h.ctx, Field::Username), FieldState::Valid);
	}

	#[test]
	pub fn test_password_feedback() {
		let h = Headless::new(PageConfig::default());
		let input = h.el(ids::PASSWORD);
		let slot = h.el("passwordError");

		assert!(!validate_password(&h.ctx));
		assert_eq!(slot.text(), "password required");

		input.set_value("12345");
		assert!(!validate_password(&h.ctx));
		assert_eq!(slot.text(), "password must be at least 6 characters");

		input.set_value("123456");
		assert!(validate_password(&h.ctx));
		assert_eq!(slot.text(), "");
	}

	#[test]
	pub fn test_localized_feedback() {
		let h = Headless::new(PageConfig::default().with_messages(Messages::arabic()));
		assert!(!validate_username(&h.ctx));
		assert_eq!(h.el("usernameError").text(), "اسم المستخدم مطلوب");
	}

	#[test]
	pub fn test_validate_without_error_slot() {
		let h = Headless::new(PageConfig::default());
		h.page.remove("usernameError");
		h.el(ids::USERNAME).set_value("x");
		assert!(!validate_username(&h.ctx));
		assert_eq!(h.el(ids::USERNAME).style("border-color"), "#e74c3c");

		h.page.remove(ids::USERNAME);
		assert!(!validate_username(&h.ctx));
	}

	#[test]
	pub fn test_show_error_shakes_then_settles() {
		let h = Headless::new(PageConfig::default());
		show_error(&h.ctx, "username", "x");
		let input = h.el(ids::USERNAME);
		assert_eq!(h.el("usernameError").text(), "x");
		assert_eq!(input.style("border-color"), "#e74c3c");
		assert_eq!(input.style("animation"), "shake 0.5s ease-in-out");

		h.clock.advance(Duration::from_millis(499));
		assert_eq!(input.style("animation"), "shake 0.5s ease-in-out");
		h.clock.advance(Duration::from_millis(1));
		assert_eq!(input.style("animation"), "");
		// the error itself stays
		assert_eq!(h.el("usernameError").text(), "x");
	}

	#[test]
	pub fn test_show_error_needs_both_elements() {
		let h = Headless::new(PageConfig::default());
		show_error(&h.ctx, "email", "unknown field");
		assert_eq!(h.clock.pending(), 0);

		h.page.remove("passwordError");
		show_error(&h.ctx, "password", "bad");
		assert_eq!(h.el(ids::PASSWORD).style("border-color"), "");
		assert_eq!(h.clock.pending(), 0);
	}

	#[test]
	pub fn test_shake_reset_skips_removed_input() {
		let h = Headless::new(PageConfig::default());
		show_error(&h.ctx, "password", "wrong password");
		let input = h.el(ids::PASSWORD);
		h.page.remove(ids::PASSWORD);
		h.clock.run_all();
		assert_eq!(input.style("animation"), "shake 0.5s ease-in-out");
	}
}
