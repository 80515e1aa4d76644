//! Batch configuration.
//!
//! Configuration is structured data validated against JSON Schema. Every
//! field has a default, so an absent or empty file runs with the standard
//! column names.

mod schema;
mod settings;

pub use schema::{schema_violations, SchemaError, SchemaViolation};
pub use settings::{BatchConfig, ColumnConfig, ConfigError, ReportConfig};
