use std::rc::Rc;

/// Element ids the login page is expected to carry.
pub mod ids {
	pub const USERNAME: &str = "username";
	pub const PASSWORD: &str = "password";
	pub const LOGIN_FORM: &str = "loginForm";
	pub const REMEMBER: &str = "remember";
	pub const LOGIN_BUTTON: &str = "loginBtn";
	pub const LOGIN_TEXT: &str = "loginText";
	pub const LOGIN_SPINNER: &str = "loginSpinner";
}

pub const HIDDEN_CLASS: &str = "hidden";

/// A single node of the page. Every method takes `&self`: the page is shared
/// and only ever mutated from the UI thread.
pub trait Element {
	fn style(&self, property: &str) -> String;
	fn set_style(&self, property: &str, value: &str);

	fn text(&self) -> String;
	fn set_text(&self, text: &str);

	/// Current value of an input control, empty for anything else.
	fn value(&self) -> String;
	fn set_value(&self, value: &str);

	fn is_checked(&self) -> bool;
	fn set_checked(&self, checked: bool);

	fn is_disabled(&self) -> bool;
	fn set_disabled(&self, disabled: bool);

	fn has_class(&self, class: &str) -> bool;
	fn add_class(&self, class: &str);
	fn remove_class(&self, class: &str);

	/// False once the node has been removed from the page.
	fn is_connected(&self) -> bool;

	/// Dispatch a synthetic `submit` event at this node.
	fn dispatch_submit(&self);
}

pub type ElementRef = Rc<dyn Element>;

pub trait Document {
	fn element_by_id(&self, id: &str) -> Option<ElementRef>;

	/// Elements carrying any of `classes`, in document order, each at most once.
	fn elements_by_class(&self, classes: &[String]) -> Vec<ElementRef>;

	fn focus_is_input(&self) -> bool;

	/// Add a `<style>` element with the given id, unless one already exists.
	fn inject_style(&self, id: &str, css: &str);
}
