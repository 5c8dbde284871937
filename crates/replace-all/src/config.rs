//! Persisted settings.
//!
//! Settings live in a small JSON file. Missing fields take their defaults, and a missing file
//! means all defaults.

use crate::error::ConfigError;
use crate::init::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// User-facing replace-all settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether the replace input row starts expanded.
    pub replace_row_expanded: bool,
    /// How long to wait for the match source at startup.
    pub init_retry: RetryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            replace_row_expanded: true,
            init_retry: RetryPolicy::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from `path`, falling back to defaults if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match fs::read_to_string(path.as_ref()) {
            Ok(json) => Self::from_json(&json),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Write settings to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "replace_row_expanded": false }"#).unwrap();
        assert!(!settings.replace_row_expanded);
        assert_eq!(settings.init_retry, RetryPolicy::default());

        let settings = Settings::from_json(r#"{ "init_retry": { "max_retries": 3 } }"#).unwrap();
        assert!(settings.replace_row_expanded);
        assert_eq!(settings.init_retry.max_retries, 3);
        assert_eq!(settings.init_retry.interval_ms, 1000);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
