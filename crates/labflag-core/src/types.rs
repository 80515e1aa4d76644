//! Core types shared across the classifier, table adapter and report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical outcome assigned to a laboratory result.
///
/// Serialized with the short codes used in the persisted `Outcome` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "bn")]
    BelowNormal,
    #[serde(rename = "n")]
    Normal,
    #[serde(rename = "an")]
    AboveNormal,
}

impl Outcome {
    /// All outcomes in report order.
    pub const ALL: [Outcome; 3] = [Outcome::BelowNormal, Outcome::Normal, Outcome::AboveNormal];

    /// Short code written to the outcome column.
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::BelowNormal => "bn",
            Outcome::Normal => "n",
            Outcome::AboveNormal => "an",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::BelowNormal => "BELOW NORMAL",
            Outcome::Normal => "NORMAL",
            Outcome::AboveNormal => "ABOVE NORMAL",
        }
    }

    /// Place `value` against an inclusive `[low, high]` band.
    ///
    /// NaN compares false on both sides and lands in `Normal`.
    pub fn from_band(value: f64, low: f64, high: f64) -> Self {
        if value < low {
            Outcome::BelowNormal
        } else if value > high {
            Outcome::AboveNormal
        } else {
            Outcome::Normal
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// Which step of the rule chain produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Missing or placeholder result, decided before the chain runs.
    MissingValue,
    Attachment,
    Hematocrit,
    TimedCoagulation,
    BloodGroup,
    Serology,
    WeakPositive,
    Comparison,
    CommaDecimal,
    DoubleDot,
    LiteralFinding,
    NoisyNumeric,
    /// Nothing matched.
    Fallback,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::MissingValue => "missing_value",
            RuleKind::Attachment => "attachment",
            RuleKind::Hematocrit => "hematocrit",
            RuleKind::TimedCoagulation => "timed_coagulation",
            RuleKind::BloodGroup => "blood_group",
            RuleKind::Serology => "serology",
            RuleKind::WeakPositive => "weak_positive",
            RuleKind::Comparison => "comparison",
            RuleKind::CommaDecimal => "comma_decimal",
            RuleKind::DoubleDot => "double_dot",
            RuleKind::LiteralFinding => "literal_finding",
            RuleKind::NoisyNumeric => "noisy_numeric",
            RuleKind::Fallback => "fallback",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One row of input: a raw result and the test it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabObservation {
    /// Raw result text; `None` when the cell is empty.
    pub result: Option<String>,

    /// Free-text test name.
    pub test_name: String,
}

impl LabObservation {
    pub fn new(result: Option<String>, test_name: impl Into<String>) -> Self {
        Self {
            result,
            test_name: test_name.into(),
        }
    }
}

/// Outcome of classifying one observation, with the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub outcome: Outcome,
    pub rule: RuleKind,
}

impl Verdict {
    pub fn new(outcome: Outcome, rule: RuleKind) -> Self {
        Self { outcome, rule }
    }
}
