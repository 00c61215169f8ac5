//! UI module - overlay for health bars and other screen-space requests.

mod overlay;
mod plugin;

pub use overlay::{draw_request, draw_ui_requests, fill_ratio};
pub use plugin::UiPlugin;
