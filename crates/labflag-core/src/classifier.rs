//! Classifier: runs the rule chain over one observation.
//!
//! The classifier applies a strict evaluation policy:
//! 1. A missing or placeholder result is NORMAL before any rule runs
//! 2. Rules run in chain order; the first rule that decides wins
//! 3. If no rule decides, the result is NORMAL
//!
//! There is no error path. Every input maps to exactly one outcome.

use tracing::trace;

use crate::rules::patterns::is_missing_sentinel;
use crate::rules::{standard_chain, Rule, RuleInput};
use crate::types::{LabObservation, Outcome, RuleKind, Verdict};

/// The Classifier owns an ordered rule chain.
pub struct Classifier {
    rules: Vec<Box<dyn Rule>>,
}

impl Classifier {
    /// Classifier with the standard rule chain.
    pub fn new() -> Self {
        Self {
            rules: standard_chain(),
        }
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Classify a raw result against its test name.
    ///
    /// # Arguments
    ///
    /// * `result` - Raw result text, `None` when missing
    /// * `test_name` - Free-text test name, matched case-insensitively
    ///
    /// # Returns
    ///
    /// A `Verdict` with the outcome and the rule that decided it.
    pub fn classify(&self, result: Option<&str>, test_name: &str) -> Verdict {
        let raw = match result.map(str::trim) {
            Some(raw) if !is_missing_sentinel(raw) => raw,
            _ => return Verdict::new(Outcome::Normal, RuleKind::MissingValue),
        };

        let input = RuleInput::new(raw, test_name);

        for rule in &self.rules {
            if let Some(outcome) = rule.apply(&input) {
                trace!(rule = %rule.kind(), outcome = %outcome, result = raw, "rule decided");
                return Verdict::new(outcome, rule.kind());
            }
        }

        Verdict::new(Outcome::Normal, RuleKind::Fallback)
    }

    /// Classify one table observation.
    pub fn classify_observation(&self, observation: &LabObservation) -> Verdict {
        self.classify(observation.result.as_deref(), &observation.test_name)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
