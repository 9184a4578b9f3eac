use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_CONTENT_SOURCE, ENV_PREFIX, GATE_DECRYPT_DELAY_MS, GATE_FOCUS_DELAY_MS,
    GATE_SHAKE_MS, HTTP_REQUEST_TIMEOUT_SECS, LOCAL_SETTINGS_PATH, SETTINGS_APP_NAME,
    SETTINGS_FILE_NAME, UI_REFRESH_INTERVAL_MS,
};
use crate::content::AppConfig;

/// Runtime settings for the terminal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where the portfolio document lives
    #[serde(default)]
    pub content: ContentSettings,

    /// Contact gate timings
    #[serde(default)]
    pub gate: GateSettings,

    /// UI configuration
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSettings {
    /// File path or http(s) URL of the JSON document
    pub source: String,
    /// Timeout for the single HTTP fetch
    pub timeout_secs: u64,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            source: DEFAULT_CONTENT_SOURCE.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateSettings {
    /// Pause before the key field takes focus
    pub focus_delay_ms: u64,
    /// Pause between submit and the decryption attempt
    pub decrypt_delay_ms: u64,
    /// How long the field shakes after a denial
    pub shake_ms: u64,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            focus_delay_ms: GATE_FOCUS_DELAY_MS,
            decrypt_delay_ms: GATE_DECRYPT_DELAY_MS,
            shake_ms: GATE_SHAKE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Color theme (noir, phosphor)
    pub theme: String,
    /// Show the clock in the header
    pub show_clock: bool,
    /// Input poll interval
    pub tick_rate_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: "noir".to_string(),
            show_clock: true,
            tick_rate_ms: UI_REFRESH_INTERVAL_MS,
        }
    }
}

/// Defaults, then the given TOML files in order, then `NOIR_` environment variables
fn layered(files: &[PathBuf]) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));

    for file in files {
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }
    }

    // NOIR_GATE__DECRYPT_DELAY_MS=0 -> gate.decrypt_delay_ms
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load settings from the global and project-local files
pub fn load_settings() -> Result<Settings> {
    let global = get_config_dir()?.join(SETTINGS_FILE_NAME);
    let local = PathBuf::from(LOCAL_SETTINGS_PATH);

    layered(&[global, local])
        .extract()
        .context("Failed to load configuration")
}

/// Load settings from one explicit file (plus the environment)
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", path.display());
    }

    layered(&[path.to_path_buf()])
        .extract()
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", SETTINGS_APP_NAME) {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join(SETTINGS_APP_NAME);
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save settings to file
pub fn save_settings(settings: &Settings, path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p,
        None => get_config_dir()?.join(SETTINGS_FILE_NAME),
    };

    let toml_string = toml::to_string_pretty(settings)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(path)
}

/// What `init_settings` created; existing files are left alone
#[derive(Debug, Default)]
pub struct InitReport {
    pub settings_file: Option<PathBuf>,
    pub content_file: Option<PathBuf>,
}

/// Create the default settings file and a sample content document if missing
pub fn init_settings(content_path: &Path) -> Result<InitReport> {
    let mut report = InitReport::default();

    let settings_file = get_config_dir()?.join(SETTINGS_FILE_NAME);
    if !settings_file.exists() {
        report.settings_file = Some(save_settings(&Settings::default(), Some(settings_file))?);
    }

    if !content_path.exists() {
        if let Some(parent) = content_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let sample = serde_json::to_string_pretty(&AppConfig::sample())?;
        std::fs::write(content_path, sample)
            .with_context(|| format!("Failed to write {}", content_path.display()))?;
        report.content_file = Some(content_path.to_path_buf());
    }

    Ok(report)
}
