//! Configuration options for feed loading and validation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options controlling how tables are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Strip leading and trailing whitespace from every cell.
    pub trim_fields: bool,

    /// Load independent tables on the rayon thread pool.
    pub parallel: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            trim_fields: true,
            parallel: true,
        }
    }
}

impl LoaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trim_fields(mut self, enable: bool) -> Self {
        self.trim_fields = enable;
        self
    }

    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }
}

/// Options controlling a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Run independent validators on the rayon thread pool.
    ///
    /// Notices are merged in registration order either way.
    pub parallel: bool,

    /// Names of validators that must not run.
    pub disabled_validators: Vec<String>,

    pub loader: LoaderOptions,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            disabled_validators: Vec::new(),
            loader: LoaderOptions::default(),
        }
    }
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run everything on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            loader: LoaderOptions::default().with_parallel(false),
            ..Self::default()
        }
    }

    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    pub fn with_disabled_validator(mut self, name: impl Into<String>) -> Self {
        self.disabled_validators.push(name.into());
        self
    }

    pub fn with_loader(mut self, loader: LoaderOptions) -> Self {
        self.loader = loader;
        self
    }

    pub fn is_disabled(&self, validator: &str) -> bool {
        self.disabled_validators.iter().any(|name| name == validator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidationConfig::default();
        assert!(config.parallel);
        assert!(config.loader.trim_fields);
        assert!(config.loader.parallel);
        assert!(config.disabled_validators.is_empty());
    }

    #[test]
    fn test_from_json_keeps_defaults_for_missing_keys() {
        let config =
            ValidationConfig::from_json(r#"{"disabled_validators": ["route_names"]}"#).unwrap();
        assert!(config.parallel);
        assert!(config.is_disabled("route_names"));
        assert!(!config.is_disabled("calendar_date_range"));

        let config = ValidationConfig::from_json(r#"{"loader": {"trim_fields": false}}"#).unwrap();
        assert!(!config.loader.trim_fields);
        assert!(config.loader.parallel);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = ValidationConfig::from_json("{parallel: yes}").unwrap_err();
        assert!(err.to_string().starts_with("invalid validation config"));
    }

    #[test]
    fn test_builders() {
        let config = ValidationConfig::sequential().with_disabled_validator("route_names");
        assert!(!config.parallel);
        assert!(!config.loader.parallel);
        assert_eq!(config.disabled_validators, ["route_names"]);
    }
}
