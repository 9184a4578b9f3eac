// Gateway module for TUI - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod app;
mod event;
mod input;
mod markdown;
mod render;
mod theme;
mod ui;

// Public re-exports - the ONLY way to access TUI functionality
pub use app::App;
pub use event::UiEvent;
pub use input::{map_key, Action, Focus};
pub use markdown::parse_markdown;
pub use theme::Theme;
pub use ui::{run_critical_error, run_ui};
