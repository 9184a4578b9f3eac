use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::{
    app::{get_config_dir, load_settings, load_settings_from, AppState, Settings},
    cipher::{CipherAdapter, CryptoJsAes},
    cli::{handle_command, Cli, Commands},
    constants::LOG_FILE_NAME,
    content::{self, LoadError},
    tui::{run_critical_error, run_ui, App, Theme},
    utils::{init_logger, LogTarget, NoirError},
};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    settings: Settings,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let settings = if let Some(config_path) = &cli.config {
            load_settings_from(config_path)?
        } else {
            match load_settings() {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("⚠️  Failed to load settings: {}. Using defaults.", e);
                    Settings::default()
                }
            }
        };

        let settings = apply_overrides(settings, &cli)?;
        Ok(Self { cli, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether this invocation ends in the full-screen terminal
    fn opens_terminal(&self) -> bool {
        matches!(self.cli.command, None | Some(Commands::Browse))
    }

    fn log_file(&self) -> Result<PathBuf> {
        match &self.cli.log_file {
            Some(path) => Ok(path.clone()),
            None => {
                let dir = get_config_dir()?;
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
                Ok(dir.join(LOG_FILE_NAME))
            }
        }
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        if self.opens_terminal() {
            let log_file = self.log_file()?;
            init_logger(self.cli.verbose, LogTarget::File(&log_file))?;
        } else {
            init_logger(self.cli.verbose, LogTarget::Stderr)?;
        }

        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.settings).await? {
                return Ok(());
            }
        }

        // A failed load ends in the critical view, never in the shell
        let state = match self.build_state().await {
            Ok(state) => state,
            Err(e) => {
                error!(">> SYSTEM: {}", e);
                let theme = Theme::by_name(&self.settings.ui.theme).unwrap_or_default();
                run_critical_error(&e.reason(), &theme).await?;
                return Err(NoirError::from(e).into());
            }
        };
        info!("Opening {} as {}", self.cli.path, state.alias());

        let app = App::new(Arc::new(state), &self.cli.path);
        run_ui(app).await
    }

    /// Resolve the content source, load it once and assemble the state
    async fn build_state(&self) -> Result<AppState, LoadError> {
        let source = content::source_from_spec(
            &self.settings.content.source,
            Duration::from_secs(self.settings.content.timeout_secs),
        )?;
        let config = content::load(source.as_ref()).await?;

        let cipher = if self.cli.no_cipher {
            warn!("Starting without the decryption primitive");
            CipherAdapter::unavailable()
        } else {
            CipherAdapter::new(Arc::new(CryptoJsAes))
        };

        Ok(AppState::new(
            config,
            self.settings.clone(),
            cipher,
            source.describe(),
        ))
    }
}

/// Fold CLI flags into the loaded settings
fn apply_overrides(mut settings: Settings, cli: &Cli) -> Result<Settings, NoirError> {
    if let Some(content) = &cli.content {
        settings.content.source = content.clone();
    }

    if Theme::by_name(&settings.ui.theme).is_none() {
        return Err(NoirError::ConfigError(format!(
            "unknown theme '{}' (available: {})",
            settings.ui.theme,
            Theme::available().join(", ")
        )));
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_content_flag_overrides_settings() {
        let cli = Cli::try_parse_from(["noir", "--content", "https://example.com/c.json"]).unwrap();
        let settings = apply_overrides(Settings::default(), &cli).unwrap();
        assert_eq!(settings.content.source, "https://example.com/c.json");
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        let cli = Cli::try_parse_from(["noir"]).unwrap();
        let mut settings = Settings::default();
        settings.ui.theme = "solarized".to_string();

        let err = apply_overrides(settings, &cli).unwrap_err();
        assert!(matches!(err, NoirError::ConfigError(_)));
        assert!(err.to_string().contains("noir, phosphor"));
    }

    fn orchestrator_for(source: &str, extra: &[&str]) -> Orchestrator {
        let mut args = vec!["noir", "--content", source];
        args.extend_from_slice(extra);
        let cli = Cli::try_parse_from(args).unwrap();
        let settings = apply_overrides(Settings::default(), &cli).unwrap();
        Orchestrator { cli, settings }
    }

    #[tokio::test]
    async fn test_blank_source_is_a_load_failure() {
        let orchestrator = orchestrator_for(" ", &[]);
        let err = orchestrator.build_state().await.unwrap_err();
        assert!(matches!(err, LoadError::InvalidSource(_)));
        assert!(err.reason().contains("Invalid content source"));
    }

    #[tokio::test]
    async fn test_missing_file_is_a_load_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let orchestrator = orchestrator_for(path.to_str().unwrap(), &[]);

        let err = orchestrator.build_state().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_state_from_content_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"profile": {"pseudo": "GHOST"}, "projects": []}"#).unwrap();

        let orchestrator = orchestrator_for(path.to_str().unwrap(), &["--no-cipher"]);
        let state = orchestrator.build_state().await.unwrap();
        assert_eq!(state.alias(), "GHOST");
        assert!(!state.cipher.is_available());
        assert!(state.source.contains("config.json"));
    }

    #[test]
    fn test_config_file_flag() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[gate]\ndecrypt_delay_ms = 0\n\n[content]\nsource = \"other.json\"\n")
            .unwrap();

        let cli = Cli::try_parse_from(["noir", "-c", path.to_str().unwrap(), "routes"]).unwrap();
        let orchestrator = Orchestrator::new(cli).unwrap();
        assert_eq!(orchestrator.settings().gate.decrypt_delay_ms, 0);
        assert_eq!(orchestrator.settings().content.source, "other.json");
        assert!(!orchestrator.opens_terminal());
    }
}
