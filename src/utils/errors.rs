use thiserror::Error;

use crate::content::LoadError;

/// Main error type for Noir
#[derive(Error, Debug)]
pub enum NoirError {
    #[error("Content error: {0}")]
    Content(#[from] LoadError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
