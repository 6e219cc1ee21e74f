use std::time::Duration;

use log::*;

use crate::config::css_seconds;
use crate::context::UiContext;
use crate::dom::{Document, Element, ElementRef};

pub const SHAKE_STYLE_ID: &str = "login-shake-keyframes";

pub const SHAKE_KEYFRAMES: &str = "
@keyframes shake {
    0%, 100% { transform: translateX(0); }
    10%, 30%, 50%, 70%, 90% { transform: translateX(-5px); }
    20%, 40%, 60%, 80% { transform: translateX(5px); }
}
";

/// Add the `shake` keyframes to the page. Safe to call more than once.
pub fn inject_styles(ctx: &UiContext) {
	ctx.document.inject_style(SHAKE_STYLE_ID, SHAKE_KEYFRAMES);
}

/// Hide every animated element, then fade and slide each one in, the n-th
/// starting `n * stagger` after the call. Returns how many were animated.
pub fn animate_entrance(ctx: &UiContext) -> usize {
	let anim = &ctx.config.animation;
	let elements = ctx.document.elements_by_class(&anim.classes);
	let duration = css_seconds(anim.duration_ms);
	let transition = format!("opacity {} ease, transform {} ease", duration, duration);

	for (index, element) in elements.iter().enumerate() {
		element.set_style("opacity", "0");
		element.set_style("transform", &format!("translateY({}px)", anim.offset_px));

		let element = element.clone();
		let transition = transition.clone();
		let delay = Duration::from_millis(anim.stagger_ms.saturating_mul(index as u64));
		ctx.scheduler.schedule(delay, Box::new(move || {
			if !element.is_connected() {
				return;
			}
			element.set_style("transition", &transition);
			element.set_style("opacity", "1");
			element.set_style("transform", "translateY(0)");
		}));
	}
	debug!("Animating {} elements", elements.len());
	elements.len()
}

/// Start the shake animation on `element` and clear it once it has run.
pub fn shake(ctx: &UiContext, element: &ElementRef) {
	let millis = ctx.config.animation.shake_ms;
	element.set_style("animation", &format!("shake {} ease-in-out", css_seconds(millis)));
	let element = element.clone();
	ctx.scheduler.schedule(Duration::from_millis(millis), Box::new(move || {
		if element.is_connected() {
			element.set_style("animation", "");
		}
	}));
}

#[cfg(test)]
pub mod test {
	use super::*;
	use crate::config::PageConfig;
	use crate::headless::Headless;

	#[test]
	pub fn test_entrance_is_staggered() {
		let h = Headless::new(PageConfig::default());
		assert_eq!(animate_entrance(&h.ctx), 8);
		let animated = h.page.elements_by_class(&h.ctx.config.animation.classes);

		for el in &animated {
			assert_eq!(el.style("opacity"), "0");
			assert_eq!(el.style("transform"), "translateY(20px)");
		}

		// first element fires immediately
		h.clock.advance(Duration::ZERO);
		assert_eq!(animated[0].style("opacity"), "1");
		assert_eq!(animated[0].style("transform"), "translateY(0)");
		assert_eq!(animated[0].style("transition"), "opacity 0.5s ease, transform 0.5s ease");
		assert_eq!(animated[1].style("opacity"), "0");

		h.clock.advance(Duration::from_millis(399));
		let shown = animated.iter().filter(|e| e.style("opacity") == "1").count();
		assert_eq!(shown, 4);

		h.clock.advance(Duration::from_millis(301));
		assert!(animated.iter().all(|e| e.style("opacity") == "1"));
		assert_eq!(h.clock.pending(), 0);
	}

	#[test]
	pub fn test_huge_stagger_does_not_overflow() {
		let mut config = PageConfig::default();
		config.animation.stagger_ms = u64::MAX;
		let h = Headless::new(config);
		assert_eq!(animate_entrance(&h.ctx), 8);
		h.clock.advance(Duration::ZERO);
		let animated = h.page.elements_by_class(&h.ctx.config.animation.classes);
		assert_eq!(animated[0].style("opacity"), "1");
		assert_eq!(animated[1].style("opacity"), "0");
		assert_eq!(h.clock.pending(), 7);
	}

	#[test]
	pub fn test_entrance_skips_removed_elements() {
		let h = Headless::new(PageConfig::default());
		let page = &h.page;
		let late = page.append("div", Some("late"), &["credential-card"]);
		animate_entrance(&h.ctx);
		page.remove("late");
		h.clock.run_all();
		assert_eq!(late.style("opacity"), "0");
		assert_eq!(late.style("transition"), "");
	}

	#[test]
	pub fn test_entrance_with_nothing_to_animate() {
		let h = Headless::with_page(
			crate::headless::HeadlessDocument::new(),
			std::rc::Rc::new(crate::storage::MemoryStore::new()),
			PageConfig::default(),
		);
		assert_eq!(animate_entrance(&h.ctx), 0);
		assert_eq!(h.clock.pending(), 0);
	}

	#[test]
	pub fn test_styles_injected_once() {
		let h = Headless::new(PageConfig::default());
		inject_styles(&h.ctx);
		inject_styles(&h.ctx);
		let styles = h.page.injected_styles();
		assert_eq!(styles.len(), 1);
		assert_eq!(styles[0].0, SHAKE_STYLE_ID);
		assert!(styles[0].1.contains("@keyframes shake"));
	}
}
