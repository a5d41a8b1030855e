pub mod app;
pub mod errors;
pub mod event_source;
pub mod filters;
pub mod panic_handler;
pub mod render;
pub mod scale;
pub mod settings;
pub mod widget;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::{App, AppAction, run_app_with_event_source};
