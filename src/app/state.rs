use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::app::Settings;
use crate::cipher::CipherAdapter;
use crate::content::AppConfig;

/// Application state, built once after the content loads and never mutated
#[derive(Debug, Clone)]
pub struct AppState {
    /// Portfolio content
    pub config: Arc<AppConfig>,
    /// Runtime settings
    pub settings: Settings,
    /// Shared decryption boundary
    pub cipher: Arc<CipherAdapter>,
    /// Where the content came from, for the header
    pub source: String,
    pub loaded_at: DateTime<Local>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        settings: Settings,
        cipher: CipherAdapter,
        source: impl Into<String>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            settings,
            cipher: Arc::new(cipher),
            source: source.into(),
            loaded_at: Local::now(),
        }
    }

    /// Alias shown in the header
    pub fn alias(&self) -> &str {
        self.config
            .profile
            .alias()
            .unwrap_or(crate::constants::UNKNOWN_ALIAS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Profile;

    fn state_for(pseudo: Option<&str>) -> AppState {
        let config = AppConfig {
            profile: Profile {
                pseudo: pseudo.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        };
        AppState::new(config, Settings::default(), CipherAdapter::unavailable(), "test")
    }

    #[test]
    fn test_alias_fallback() {
        assert_eq!(state_for(Some("GHOST")).alias(), "GHOST");
        assert_eq!(state_for(None).alias(), "UNKNOWN");
        assert_eq!(state_for(Some("")).alias(), "UNKNOWN");
    }
}
