use crate::http_client::{EnhancedHttpClient, HttpClientConfig};
use crate::models::SearchColumn;
use crate::source_utils::RandomDelay;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Mirrors tried in order until one responds
    #[serde(default = "default_mirrors")]
    pub mirrors: Vec<String>,

    #[serde(default)]
    pub column: SearchColumn,

    /// Number of results returned when none is requested
    #[serde(default = "default_results")]
    pub results: usize,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub pacing: PacingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Timeout for HTTP requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Enable cookie support
    #[serde(default = "default_true")]
    pub enable_cookies: bool,

    /// Enable gzip/brotli compression
    #[serde(default = "default_true")]
    pub enable_compression: bool,

    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Random pause between result pages, in milliseconds
#[derive(Debug, Deserialize, Clone)]
pub struct PacingConfig {
    #[serde(default = "default_min_delay")]
    pub min_delay_ms: u64,

    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

fn default_mirrors() -> Vec<String> {
    vec![
        "https://libgen.is".to_string(),
        "https://libgen.rs".to_string(),
        "https://libgen.st".to_string(),
    ]
}
fn default_results() -> usize { 5 }
fn default_true() -> bool { true }
fn default_timeout() -> u64 { 30 }
fn default_min_delay() -> u64 { 250 }
fn default_max_delay() -> u64 { 1000 }

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            enable_cookies: true,
            enable_compression: true,
            user_agent: None,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirrors: default_mirrors(),
            column: SearchColumn::default(),
            results: default_results(),
            http: HttpConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str::<Config>(&content)?)
    }

    pub fn pacer(&self) -> RandomDelay {
        RandomDelay::new(
            Duration::from_millis(self.pacing.min_delay_ms),
            Duration::from_millis(self.pacing.max_delay_ms),
        )
    }
}

impl HttpConfig {
    /// Create the HTTP client from this configuration
    pub fn create_http_client(&self) -> Result<EnhancedHttpClient, reqwest::Error> {
        let config = HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            enable_cookies: self.enable_cookies,
            enable_gzip: self.enable_compression,
            user_agent: self.user_agent.clone(),
        };

        EnhancedHttpClient::with_config(config)
    }
}
