pub mod app;
pub mod context;
pub mod vm;
pub mod views;

pub use app::{App, AppState};
pub use context::{AppContext, ServicesApp, UiApp, build_app_context};
