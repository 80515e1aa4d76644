//! JSON Schema validation for batch configuration.
//!
//! Configuration documents are checked against
//! schema/batch-config.schema.json before they are deserialized, so a
//! misspelled key is reported instead of silently falling back to defaults.

use std::fmt;
use std::sync::OnceLock;

use thiserror::Error;

/// Embedded configuration schema (loaded at compile time).
const CONFIG_SCHEMA_JSON: &str = include_str!("../../../../schema/batch-config.schema.json");

static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// The embedded schema itself could not be used.
#[derive(Error, Debug, Clone)]
#[error("Config schema unavailable: {0}")]
pub struct SchemaError(String);

/// One place where a config document breaks the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value, `/` for the document root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn config_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    COMPILED_SCHEMA
        .get_or_init(|| {
            let schema: serde_json::Value = serde_json::from_str(CONFIG_SCHEMA_JSON)
                .map_err(|e| format!("embedded schema is not JSON: {}", e))?;
            jsonschema::options()
                .build(&schema)
                .map_err(|e| format!("embedded schema does not compile: {}", e))
        })
        .as_ref()
        .map_err(|e| SchemaError(e.clone()))
}

/// Every schema violation in a config document, in document order.
///
/// An empty list means the document is valid.
pub fn schema_violations(document: &serde_json::Value) -> Result<Vec<SchemaViolation>, SchemaError> {
    let validator = config_validator()?;

    Ok(validator
        .iter_errors(document)
        .map(|error| {
            let path = error.instance_path.to_string();
            SchemaViolation {
                path: if path.is_empty() { "/".to_string() } else { path },
                message: error.to_string(),
            }
        })
        .collect())
}
