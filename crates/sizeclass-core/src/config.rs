#![forbid(unsafe_code)]

//! Breakpoint tables as configuration data.
//!
//! [`BreakpointConfig`] lets an application declare its breakpoints in TOML
//! or JSON instead of code.
//!
//! # Loading
//!
//! ```toml
//! # breakpoints.toml
//! [breakpoints]
//! mobile = 0
//! tablet = 720
//! desktop = 1200
//! ```
//!
//! ```rust,ignore
//! let table = BreakpointConfig::from_toml_file("breakpoints.toml")?.into_table()?;
//! ```
//!
//! Key order in the file is irrelevant: the table sorts by threshold.
//! A missing `[breakpoints]` section falls back to the defaults below, but
//! any other top-level key (e.g. a misspelled `[breakpoint]`) is rejected.
//!
//! # Defaults
//!
//! `BreakpointConfig::default()` is the mobile/tablet/desktop preset
//! (0 / 720 / 1200).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BreakpointError;
use crate::table::BreakpointTable;

/// Declarative breakpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakpointConfig {
    /// Breakpoint name -> minimum width.
    pub breakpoints: BTreeMap<String, f64>,
}

impl Default for BreakpointConfig {
    fn default() -> Self {
        Self {
            breakpoints: BTreeMap::from([
                ("mobile".to_string(), 0.0),
                ("tablet".to_string(), 720.0),
                ("desktop".to_string(), 1200.0),
            ]),
        }
    }
}

impl BreakpointConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check the configuration, collecting every problem.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.breakpoints.is_empty() {
            errors.push("breakpoints: at least one breakpoint is required".to_string());
        }
        for (name, threshold) in &self.breakpoints {
            if name.trim().is_empty() {
                errors.push("breakpoints: names must not be empty".to_string());
            }
            if threshold.is_nan() {
                errors.push(format!("breakpoints.{name}: threshold must be a number"));
            }
        }

        errors
    }

    /// Validate and build the table.
    pub fn into_table(self) -> Result<BreakpointTable<String>, ConfigError> {
        let errors = self.validate();
        if !errors.is_empty() {
            tracing::warn!(errors = errors.len(), "rejected breakpoint config");
            return Err(ConfigError::Validation(errors));
        }
        BreakpointTable::new(self.breakpoints).map_err(ConfigError::Table)
    }
}

/// Errors that can occur when loading a breakpoint configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// The table itself rejected the entries.
    #[error("invalid table: {0}")]
    Table(#[source] BreakpointError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
