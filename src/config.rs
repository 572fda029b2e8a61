//! Analyzer configuration.
//!
//! ```toml
//! [analysis]
//! fade_out = true
//!
//! [rules.FOLD001]
//! enabled = true
//! severity = "warning"
//! ```
//!
//! Every table and key is optional. Rule ids are checked against the
//! registry when the file is loaded.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tugfold_core::diagnostic::{DiagnosticDescriptor, Severity};
use tugfold_core::error::FoldError;

use crate::registry::RuleRegistry;

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "tugfold.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown rule '{id}' in config")]
    UnknownRule { id: String },
}

impl From<ConfigError> for FoldError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownRule { id } => FoldError::UnknownRule { id },
            other => FoldError::InvalidConfig {
                message: other.to_string(),
            },
        }
    }
}

/// Top-level analyzer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Settings shared by every rule.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Per-rule settings keyed by descriptor id.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

/// Settings shared by every rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Attach fade-out spans to diagnostics.
    #[serde(default = "default_true")]
    pub fade_out: bool,
}

/// Settings for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Overrides the descriptor's default severity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fade_out: default_true(),
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            severity: None,
        }
    }
}

impl AnalyzerConfig {
    /// Parse configuration text and check its rule ids against `registry`.
    pub fn parse(text: &str, registry: &RuleRegistry) -> Result<Self, ConfigError> {
        let config: AnalyzerConfig = toml::from_str(text)?;
        config.validate(registry)?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path, registry: &RuleRegistry) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, registry)
    }

    /// Load `tugfold.toml` from `dir`, or the defaults if there is none.
    pub fn load_from_dir(dir: &Path, registry: &RuleRegistry) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path, registry)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject rule tables for ids the registry does not know.
    pub fn validate(&self, registry: &RuleRegistry) -> Result<(), ConfigError> {
        match self.rules.keys().find(|id| !registry.contains(id)) {
            Some(id) => Err(ConfigError::UnknownRule { id: id.clone() }),
            None => Ok(()),
        }
    }

    pub fn rule_enabled(&self, id: &str) -> bool {
        self.rules.get(id).map_or(true, |rule| rule.enabled)
    }

    /// The configured severity for `descriptor`, or its default.
    pub fn severity_for(&self, descriptor: &DiagnosticDescriptor) -> Severity {
        self.rules
            .get(descriptor.id)
            .and_then(|rule| rule.severity)
            .unwrap_or(descriptor.default_severity)
    }
}
