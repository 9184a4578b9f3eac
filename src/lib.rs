pub mod app;
pub mod cipher;
pub mod cli;
pub mod constants;
pub mod content;
pub mod gate;
pub mod router;
pub mod runtime;
pub mod tui;
pub mod utils;
pub mod views;

pub use app::{load_settings, AppState, Settings};
pub use cipher::{CipherAdapter, CipherError};
pub use content::{AppConfig, LoadError};
pub use tui::run_ui;
pub use utils::NoirError;
