//! Batch configuration parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::{schema_violations, SchemaError, SchemaViolation};

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    SchemaUnavailable(#[from] SchemaError),

    #[error("Config does not match schema: {}", join_violations(.0))]
    SchemaError(Vec<SchemaViolation>),

    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Column names in the input table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnConfig {
    /// Column holding the raw result
    pub result: String,

    /// Column holding the test name
    pub test_name: String,

    /// Column the outcome code is written to (added when absent)
    pub outcome: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            result: "Result".to_string(),
            test_name: "Standard Test Name".to_string(),
            outcome: "Outcome".to_string(),
        }
    }
}

/// Console report settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Example rows kept per outcome
    pub sample_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { sample_limit: 10 }
    }
}

/// Configuration for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BatchConfig {
    pub columns: ColumnConfig,
    pub report: ReportConfig,
}

impl BatchConfig {
    /// Parse a config from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let has_content = yaml
            .lines()
            .map(str::trim)
            .any(|line| !line.is_empty() && !line.starts_with('#'));
        if !has_content {
            return Self::from_value(serde_json::Value::Null);
        }

        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse a config from JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a config from a file, choosing JSON for `.json` and YAML otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        // An empty document means "all defaults"
        let value = if value.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            value
        };

        let violations = schema_violations(&value)?;
        if !violations.is_empty() {
            return Err(ConfigError::SchemaError(violations));
        }

        let config: BatchConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the sample limit.
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.report.sample_limit = limit;
        self
    }

    /// Validate the config structure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let columns = &self.columns;

        for (key, name) in [
            ("columns.result", &columns.result),
            ("columns.test_name", &columns.test_name),
            ("columns.outcome", &columns.outcome),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{} is empty", key)));
            }
        }

        if columns.outcome == columns.result || columns.outcome == columns.test_name {
            return Err(ConfigError::ValidationError(format!(
                "Outcome column '{}' would overwrite an input column",
                columns.outcome
            )));
        }

        Ok(())
    }
}
