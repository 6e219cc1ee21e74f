pub mod animation;
pub mod config;
pub mod context;
pub mod controller;
pub mod dom;
pub mod events;
pub mod feedback;
pub mod field;
pub mod headless;
pub mod loading;
pub mod remember;
pub mod storage;
pub mod timer;

pub use config::PageConfig;
pub use context::UiContext;
pub use controller::LoginPage;
