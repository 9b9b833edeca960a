//! Application configuration loading.

use crate::error::{AppError, AppResult};
use crate::sim::SimConfig;
use pmm_strategy::StrategyConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

impl AppConfig {
    /// Load from the given path, or from `PMM_CONFIG`, or from
    /// `config/default.toml`. A missing file falls back to built-in
    /// defaults with a warning; a malformed file is an error.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let env_path = std::env::var("PMM_CONFIG").ok();
        let path = path
            .map(str::to_string)
            .or(env_path)
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        if Path::new(&path).exists() {
            Self::from_file(&path)
        } else {
            warn!(path = %path, "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| AppError::Config(format!("failed to parse {path}: {e}")))?;
        config
            .strategy
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(config)
    }
}
