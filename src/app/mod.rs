// Gateway module for app - settings and the immutable application state
// Callers go through these re-exports, never the private submodules

mod settings;
mod state;

pub use settings::{
    get_config_dir, init_settings, load_settings, load_settings_from, save_settings,
    ContentSettings, GateSettings, InitReport, Settings, UiSettings,
};
pub use state::AppState;
