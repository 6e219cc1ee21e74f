use log::*;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{EventTarget, KeyboardEvent};

use loginpage::events::{DomEvent, EventKind, Events, Handler, Subscription, Target};

use crate::dom::{report, WebDocument};

impl Events for WebDocument {
	fn listen(&self, target: Target<'_>, kind: EventKind, handler: Handler) -> Option<Subscription> {
		let target: EventTarget = match target {
			Target::Document => self.document.clone().into(),
			Target::Element(id) => self.document.get_element_by_id(id)?.into(),
		};
		let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
			let dom_event = match kind {
				EventKind::KeyPress => {
					let key = event.dyn_ref::<KeyboardEvent>().map(|k| k.key()).unwrap_or_default();
					DomEvent::key_press(&key)
				},
				_ => DomEvent::new(kind),
			};
			handler(&dom_event);
			if dom_event.default_prevented() {
				event.prevent_default();
			}
		});

		let name = kind.dom_name();
		if let Err(e) = target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
			warn!("Listening for {} failed: {:?}", name, e);
			return None;
		}
		Some(Subscription::new(move || {
			report("Removing listener", target.remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref()));
			drop(callback);
		}))
	}
}
