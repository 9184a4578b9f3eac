/// Constants module to avoid magic numbers in the codebase

// Content
pub const DEFAULT_CONTENT_SOURCE: &str = "assets/config.json";
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 10;

// Gate timings (cosmetic)
pub const GATE_FOCUS_DELAY_MS: u64 = 50;
pub const GATE_DECRYPT_DELAY_MS: u64 = 300;
pub const GATE_SHAKE_MS: u64 = 500;

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 50;
pub const UI_SCROLL_LINES: u16 = 3;
pub const UI_MENU_WIDTH: u16 = 24;

// Views
pub const UNKNOWN_ALIAS: &str = "UNKNOWN";
pub const SKILL_NAME_WIDTH: usize = 20;
pub const REDACTED_CONTACTS: &str = "EMAIL-REDACTED-PHONE-REDACTED-TELEGRAM-REDACTED";

/// Markers meaning "real ciphertext not configured yet".
pub const PLACEHOLDER_MARKERS: &[&str] = &["PASTE_CIPHERTEXT_HERE", "ВСТАВЬ_СЮДА"];

// Settings locations
pub const SETTINGS_APP_NAME: &str = "noir";
pub const SETTINGS_FILE_NAME: &str = "config.toml";
pub const LOCAL_SETTINGS_PATH: &str = ".noir/config.toml";
pub const ENV_PREFIX: &str = "NOIR_";
pub const LOG_FILE_NAME: &str = "noir.log";
