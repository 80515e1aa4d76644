//! # labflag-core
//!
//! Deterministic classification of free-text laboratory results.
//!
//! This crate maps a raw result string and its test name to one of three
//! outcomes:
//! - `bn`: below the normal range
//! - `n`: within the normal range (also the default)
//! - `an`: above the normal range
//!
//! ## Key Guarantees
//!
//! 1. **Total**: Every input maps to an outcome; nothing panics or errors
//! 2. **Deterministic**: Same input always produces same output
//! 3. **Traceable**: Every outcome names the rule that decided it
//! 4. **Thread-safe**: The classifier holds no mutable state
//!
//! ## Example
//!
//! ```rust
//! use labflag_core::{classify, classify_traced, Outcome, RuleKind};
//!
//! assert_eq!(classify(Some("47%"), "Hematocrit"), Outcome::AboveNormal);
//! assert_eq!(classify(None, "Hematocrit"), Outcome::Normal);
//!
//! let verdict = classify_traced(Some("9:01"), "Bleeding Time");
//! assert_eq!(verdict.rule, RuleKind::TimedCoagulation);
//! ```

pub mod batch;
pub mod classifier;
pub mod config;
pub mod report;
pub mod rules;
pub mod table;
pub mod types;

// Re-export main types at crate root
pub use batch::run_batch;
pub use classifier::Classifier;
pub use config::{BatchConfig, ColumnConfig, ConfigError, ReportConfig};
pub use report::{OutcomeReport, ReportSample};
pub use rules::{Rule, RuleInput};
pub use table::{LabTable, TableError};
pub use types::{LabObservation, Outcome, RuleKind, Verdict};

use lazy_static::lazy_static;

lazy_static! {
    static ref STANDARD_CLASSIFIER: Classifier = Classifier::new();
}

/// Classify a laboratory result.
///
/// This is the main entry point for labflag.
///
/// # Arguments
///
/// * `result` - The raw result text, `None` when the value is missing
/// * `test_name` - The test the result belongs to
///
/// # Returns
///
/// The `Outcome`. Unparseable or unrecognized results are `Normal`.
pub fn classify(result: Option<&str>, test_name: &str) -> Outcome {
    classify_traced(result, test_name).outcome
}

/// Classify a laboratory result and report which rule decided it.
pub fn classify_traced(result: Option<&str>, test_name: &str) -> Verdict {
    STANDARD_CLASSIFIER.classify(result, test_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_missing_value_default() {
        assert_eq!(classify(None, "any test"), Outcome::Normal);
        assert_eq!(classify(Some("."), "x"), Outcome::Normal);
        assert_eq!(classify(Some(""), "x"), Outcome::Normal);
        assert_eq!(classify(Some("#NAME?"), "x"), Outcome::Normal);
        assert_eq!(classify(Some("nan"), "x"), Outcome::Normal);
    }

    #[test]
    fn test_table_tie_break_through_entry_point() {
        // "free t4" [0.8, 1.8] precedes "tsh" [0.4, 4.0] in the range table
        assert_eq!(classify(Some("< 0.5"), "tsh / free t4"), Outcome::BelowNormal);
        assert_eq!(classify(Some("< 0.5"), "tsh"), Outcome::Normal);
    }

    proptest! {
        #[test]
        fn prop_classify_is_total(result in proptest::option::of(".*"), test in ".*") {
            let outcome = classify(result.as_deref(), &test);
            prop_assert!(Outcome::ALL.contains(&outcome));
        }

        #[test]
        fn prop_classify_is_idempotent(result in ".{0,40}", test in ".{0,40}") {
            let first = classify_traced(Some(&result), &test);
            let second = classify_traced(Some(&result), &test);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_traced_agrees_with_plain(result in "[0-9<>:%.,\"` *a-z+-]{0,16}", test in "(tsh|hematocrit|bleeding time|urea|hiv|blood group|free t3)") {
            let verdict = classify_traced(Some(&result), &test);
            prop_assert_eq!(verdict.outcome, classify(Some(&result), &test));
        }

        #[test]
        fn prop_hematocrit_percentages(value in 0u32..100) {
            let outcome = classify(Some(&format!("{}%", value)), "packed cell volume");
            let expected = if value < 36 {
                Outcome::BelowNormal
            } else if value > 46 {
                Outcome::AboveNormal
            } else {
                Outcome::Normal
            };
            prop_assert_eq!(outcome, expected);
        }
    }
}
