//! Rules deciding on wording rather than numbers.

use tracing::trace;

use crate::types::{Outcome, RuleKind};

use super::patterns::{
    contains_any, has_negative_indicator, has_positive_indicator, BLOOD_GROUP_LETTERS,
    INFECTION_MARKER_TESTS, INFLAMMATION_MARKER_TESTS, POSITIVE_IS_NORMAL_TESTS,
};
use super::{Rule, RuleInput};

/// Attached or referenced reports ("CBC attached") carry no measurement.
pub struct AttachmentRule;

impl AttachmentRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AttachmentRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for AttachmentRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Attachment
    }

    fn describe(&self) -> &'static str {
        "result mentions an attachment: normal"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        input.lower.contains("attach").then_some(Outcome::Normal)
    }
}

/// Any ABO group is a normal finding.
pub struct BloodGroupRule;

impl BloodGroupRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BloodGroupRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for BloodGroupRule {
    fn kind(&self) -> RuleKind {
        RuleKind::BloodGroup
    }

    fn describe(&self) -> &'static str {
        "blood group test with an A/B/O letter: normal"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        if !input.test.contains("blood group") {
            return None;
        }

        let upper = input.raw.to_uppercase();
        contains_any(&upper, BLOOD_GROUP_LETTERS).then_some(Outcome::Normal)
    }
}

/// Positive / negative wording.
///
/// Positive wins over negative when both appear, so "not detected" reads
/// as positive through its "detected" suffix.
pub struct SerologyRule;

impl SerologyRule {
    pub fn new() -> Self {
        Self
    }

    fn positive_outcome(&self, input: &RuleInput<'_>) -> Outcome {
        if input.test_mentions(POSITIVE_IS_NORMAL_TESTS) {
            Outcome::Normal
        } else if input.test_mentions(INFECTION_MARKER_TESTS) {
            trace!(test = %input.test, "positive infection marker");
            Outcome::AboveNormal
        } else if input.test_mentions(INFLAMMATION_MARKER_TESTS) {
            trace!(test = %input.test, "positive inflammation marker");
            Outcome::AboveNormal
        } else {
            Outcome::AboveNormal
        }
    }
}

impl Default for SerologyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SerologyRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Serology
    }

    fn describe(&self) -> &'static str {
        "positive wording: above normal unless expected; negative wording: normal"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        if has_positive_indicator(&input.lower) {
            return Some(self.positive_outcome(input));
        }

        has_negative_indicator(&input.lower).then_some(Outcome::Normal)
    }
}

/// "Weak positive" results.
///
/// Sits after [`SerologyRule`], which already claims every result carrying a
/// positive indicator, so in the standard chain this never fires.
pub struct WeakPositiveRule;

impl WeakPositiveRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WeakPositiveRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for WeakPositiveRule {
    fn kind(&self) -> RuleKind {
        RuleKind::WeakPositive
    }

    fn describe(&self) -> &'static str {
        "weak positive wording: above normal"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        (input.lower.contains("weak") && has_positive_indicator(&input.lower))
            .then_some(Outcome::AboveNormal)
    }
}

/// Fixed culture / microscopy phrases, checked in order.
const LITERAL_FINDINGS: &[(&str, Outcome)] = &[
    ("no growth", Outcome::Normal),
    ("hyphae of fungi", Outcome::AboveNormal),
    ("suspected", Outcome::AboveNormal),
];

pub struct LiteralFindingRule;

impl LiteralFindingRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LiteralFindingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for LiteralFindingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::LiteralFinding
    }

    fn describe(&self) -> &'static str {
        "no growth: normal; fungal hyphae or suspected findings: above normal"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        LITERAL_FINDINGS
            .iter()
            .find(|(phrase, _)| input.lower.contains(phrase))
            .map(|(_, outcome)| *outcome)
    }
}
