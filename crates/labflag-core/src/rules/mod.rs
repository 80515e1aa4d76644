//! The rule chain.
//!
//! Each rule inspects a normalized result and either decides the outcome
//! or passes. Rules are evaluated in a fixed order and the first decision
//! wins, so reordering the chain changes behaviour.
//!
//! | # | Rule | Decides on |
//! |---|------|------------|
//! | 1 | [`AttachmentRule`] | "attach" anywhere in the result |
//! | 2 | [`HematocritRule`] | `%` results for packed cell volume |
//! | 3 | [`TimedCoagulationRule`] | `m:ss` bleeding / clotting times |
//! | 4 | [`BloodGroupRule`] | ABO letters on blood group tests |
//! | 5 | [`SerologyRule`] | positive / negative wording |
//! | 6 | [`WeakPositiveRule`] | "weak" with a positive indicator |
//! | 7 | [`ComparisonRule`] | `< 5`, `> 100` against the range table |
//! | 8 | [`CommaDecimalRule`] | quoted decimal-comma numbers |
//! | 9 | [`DoubleDotRule`] | `5..81` typos |
//! | 10 | [`LiteralFindingRule`] | fixed microbiology phrases |
//! | 11 | [`NoisyNumericRule`] | numbers wrapped in stray glyphs |

mod numeric;
pub mod patterns;
pub mod ranges;
mod text;
mod timing;

pub use numeric::{
    CommaDecimalRule, ComparisonRule, DoubleDotRule, HematocritRule, NoisyNumericRule,
};
pub use text::{AttachmentRule, BloodGroupRule, LiteralFindingRule, SerologyRule, WeakPositiveRule};
pub use timing::TimedCoagulationRule;

use crate::types::{Outcome, RuleKind};

/// A normalized observation as seen by the rules.
#[derive(Debug, Clone)]
pub struct RuleInput<'a> {
    /// Result text, trimmed.
    pub raw: &'a str,

    /// Result text, trimmed and lowercased.
    pub lower: String,

    /// Test name, lowercased and trimmed.
    pub test: String,
}

impl<'a> RuleInput<'a> {
    pub fn new(raw: &'a str, test_name: &str) -> Self {
        let raw = raw.trim();
        Self {
            raw,
            lower: raw.to_lowercase(),
            test: test_name.to_lowercase().trim().to_string(),
        }
    }

    /// Check if the test name contains any of the fragments.
    pub fn test_mentions(&self, fragments: &[&str]) -> bool {
        patterns::contains_any(&self.test, fragments)
    }
}

/// Trait implemented by every rule in the chain.
pub trait Rule: Send + Sync {
    /// Which rule this is.
    fn kind(&self) -> RuleKind;

    /// One-line description of what the rule decides on.
    fn describe(&self) -> &'static str;

    /// Decide the outcome, or `None` to let the next rule try.
    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome>;
}

/// Build the canonical chain in evaluation order.
pub fn standard_chain() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(AttachmentRule::new()),
        Box::new(HematocritRule::new()),
        Box::new(TimedCoagulationRule::new()),
        Box::new(BloodGroupRule::new()),
        Box::new(SerologyRule::new()),
        Box::new(WeakPositiveRule::new()),
        Box::new(ComparisonRule::new()),
        Box::new(CommaDecimalRule::new()),
        Box::new(DoubleDotRule::new()),
        Box::new(LiteralFindingRule::new()),
        Box::new(NoisyNumericRule::new()),
    ]
}
