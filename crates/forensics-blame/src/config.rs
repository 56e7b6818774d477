//! Resolver configuration
//!
//! Resolves configuration from multiple sources with priority:
//! 1. Environment variables
//! 2. Config file (TOML)
//! 3. Defaults

use crate::log::{DEFAULT_MAX_ERRORS, FilteredLog};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// What the resolver does when a factory returns an error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactoryErrorPolicy {
    /// Log the error and continue with the next factory
    #[default]
    Skip,
    /// Log the error and fall back to the null blamer immediately
    Abort,
}

impl FromStr for FactoryErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!("unknown factory error policy '{other}'")),
        }
    }
}

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub factory_error_policy: FactoryErrorPolicy,
    /// Factory names never consulted during resolution
    pub disabled_factories: Vec<String>,
    /// Error lines kept by logs created with [`ResolverConfig::new_log`]
    pub max_log_errors: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            factory_error_policy: FactoryErrorPolicy::Skip,
            disabled_factories: Vec::new(),
            max_log_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

impl ResolverConfig {
    pub fn is_disabled(&self, factory: &str) -> bool {
        self.disabled_factories.iter().any(|name| name == factory)
    }

    /// Create a log using the configured error cap
    pub fn new_log(&self, title: impl Into<String>) -> FilteredLog {
        FilteredLog::with_max_errors(title, self.max_log_errors)
    }
}

/// Resolve configuration from defaults, an optional file and the environment.
///
/// A missing file is skipped. A file that cannot be parsed is reported as a
/// warning and ignored.
pub fn resolve_config(path: Option<&Path>) -> ResolverConfig {
    let mut config = ResolverConfig::default();

    if let Some(path) = path.filter(|p| p.exists()) {
        match load_config_file(path) {
            Ok(file_config) => config = file_config,
            Err(e) => warn!("Failed to load blame config at {}: {e}", path.display()),
        }
    }

    apply_env_overrides(&mut config);
    config
}

/// Load config from a TOML file
pub fn load_config_file(path: &Path) -> Result<ResolverConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: ResolverConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Apply environment variable overrides
fn apply_env_overrides(config: &mut ResolverConfig) {
    if let Ok(value) = std::env::var("FORENSICS_FACTORY_ERRORS") {
        match value.parse::<FactoryErrorPolicy>() {
            Ok(policy) => config.factory_error_policy = policy,
            Err(e) => warn!("Ignoring FORENSICS_FACTORY_ERRORS: {e}"),
        }
    }

    if let Ok(value) = std::env::var("FORENSICS_DISABLED_FACTORIES") {
        config.disabled_factories = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Ok(value) = std::env::var("FORENSICS_MAX_LOG_ERRORS") {
        match value.trim().parse::<usize>() {
            Ok(max) => config.max_log_errors = max,
            Err(e) => warn!("Ignoring FORENSICS_MAX_LOG_ERRORS={value}: {e}"),
        }
    }
}
