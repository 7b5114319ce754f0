use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Base URL of the classifier; `/predict` is appended.
    pub endpoint: String,
    pub timeout_ms: u64,
    pub log_level: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log_level: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Values that beat the config file (flags and their env fallbacks).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
}

pub fn join_base_path(base: &str, path: &str) -> Result<String, AppError> {
    if base.trim().is_empty() {
        return Err("endpoint is empty".into());
    }
    let normalized_base = base.trim().trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}

fn validate_config(config: &AnalyzerConfig) -> Result<(), AppError> {
    let url = reqwest::Url::parse(config.endpoint.trim()).map_err(|e| AppError {
        message: format!("endpoint {:?} is not a valid URL: {}", config.endpoint, e),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("endpoint {:?} must use http or https", config.endpoint).into());
    }
    if config.timeout_ms == 0 {
        return Err("timeout_ms must be greater than zero".into());
    }
    Ok(())
}

pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig, AppError> {
    let Some(path) = path else {
        return Ok(AnalyzerConfig::default());
    };
    let raw = std::fs::read_to_string(path).map_err(|e| AppError {
        message: format!("failed to read config {}: {}", path.display(), e),
    })?;
    toml::from_str(&raw).map_err(|e| AppError {
        message: format!("failed to parse config {}: {}", path.display(), e),
    })
}

/// File (if any), then overrides, then validation.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<AnalyzerConfig, AppError> {
    let mut config = load_config(path)?;
    if let Some(endpoint) = overrides.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(timeout_ms) = overrides.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    validate_config(&config)?;
    Ok(config)
}
