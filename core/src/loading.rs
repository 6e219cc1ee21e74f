use log::*;

use crate::context::UiContext;
use crate::dom::{ids, Element, ElementRef, HIDDEN_CLASS};

fn controls(ctx: &UiContext) -> Option<(ElementRef, ElementRef, ElementRef)> {
	Some((
		ctx.element(ids::LOGIN_BUTTON)?,
		ctx.element(ids::LOGIN_TEXT)?,
		ctx.element(ids::LOGIN_SPINNER)?,
	))
}

/// Disable the login button, show the spinner and swap the label for
/// `message` (the configured loading message when `None`).
pub fn show_loading(ctx: &UiContext, message: Option<&str>) {
	if let Some((button, text, spinner)) = controls(ctx) {
		let messages = ctx.config.messages();
		let message = message.unwrap_or(&messages.loading);
		debug!("Loading: {}", message);
		text.set_text(message);
		spinner.remove_class(HIDDEN_CLASS);
		button.set_disabled(true);
	}
}

pub fn hide_loading(ctx: &UiContext) {
	if let Some((button, text, spinner)) = controls(ctx) {
		text.set_text(&ctx.config.messages().login_label);
		spinner.add_class(HIDDEN_CLASS);
		button.set_disabled(false);
	}
}

pub fn is_loading(ctx: &UiContext) -> bool {
	ctx.element(ids::LOGIN_BUTTON).map(|b| b.is_disabled()).unwrap_or(false)
}
