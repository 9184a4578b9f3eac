use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use super::types::AppConfig;

/// Reasons the content document could not be loaded
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Config load failed (HTTP {status})")]
    HttpStatus { url: String, status: u16 },

    #[error("Config fetch failed: {0}")]
    Network(String),

    #[error("Config read failed ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid content source: {0}")]
    InvalidSource(String),
}

impl LoadError {
    /// Short reason for the critical-error view
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// A place the content document can be read from
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Read the raw document, exactly once
    async fn fetch(&self) -> Result<String, LoadError>;

    /// Human-readable location, for logs and the header
    fn describe(&self) -> String;
}

/// Content served over HTTP(S)
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Content read from the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSource for FileSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick a source from a user-supplied location: URLs go over HTTP, anything else is a path
pub fn source_from_spec(spec: &str, timeout: Duration) -> Result<Box<dyn ContentSource>, LoadError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(LoadError::InvalidSource("empty location".to_string()));
    }

    if spec.starts_with("http://") || spec.starts_with("https://") {
        Ok(Box::new(HttpSource::new(spec, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(spec)))
    }
}

/// Load and parse the content document. One read, no retries.
pub async fn load(source: &dyn ContentSource) -> Result<AppConfig, LoadError> {
    info!(">> SYSTEM: Initiating protocols... ({})", source.describe());

    let raw = source.fetch().await?;
    debug!("Read {} bytes of content", raw.len());

    let config: AppConfig = serde_json::from_str(&raw)?;
    info!(
        ">> SYSTEM: Config loaded successfully ({} case files)",
        config.projects.len()
    );

    Ok(config)
}
