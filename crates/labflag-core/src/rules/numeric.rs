//! Rules that recover a number from an irregular result and place it in a
//! reference band.
//!
//! A result that does not parse is not an error: the rule passes and the
//! next one gets a chance.

use tracing::trace;

use crate::types::{Outcome, RuleKind};

use super::patterns::{extract_comparison_value, extract_noisy_value, parse_float};
use super::ranges::{
    lookup_band, lookup_test_range, Band, COMMA_DECIMAL_BANDS, DOUBLE_DOT_BANDS,
    NOISY_NUMERIC_BANDS,
};
use super::{Rule, RuleInput};

const HEMATOCRIT_TESTS: &[&str] = &["packed cell volume", "hematocrit"];
const HEMATOCRIT_BAND: Band = Band::new(36.0, 46.0);

/// Percentages on packed cell volume / hematocrit.
pub struct HematocritRule;

impl HematocritRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HematocritRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for HematocritRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Hematocrit
    }

    fn describe(&self) -> &'static str {
        "percentage on a hematocrit test: normal between 36% and 46%"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        if !input.raw.contains('%') || !input.test_mentions(HEMATOCRIT_TESTS) {
            return None;
        }

        let value = parse_float(&input.raw.replace('%', ""))?;
        Some(HEMATOCRIT_BAND.place(value))
    }
}

/// Inequality results looked up in the reference range table.
///
/// The direction comes from the operator present anywhere in the result,
/// `<` taking precedence over `>`. A `<` result can only be flagged low and a
/// `>` result only high. With only `≤`/`≥` the rule passes.
pub struct ComparisonRule;

impl ComparisonRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ComparisonRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ComparisonRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Comparison
    }

    fn describe(&self) -> &'static str {
        "inequality result checked against the reference range table"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        let value = extract_comparison_value(input.raw)?;
        let entry = lookup_test_range(&input.test)?;

        trace!(fragment = entry.fragment, value, "comparison range matched");

        if input.raw.contains('<') {
            Some(if value < entry.band.low {
                Outcome::BelowNormal
            } else {
                Outcome::Normal
            })
        } else if input.raw.contains('>') {
            Some(if value > entry.band.high {
                Outcome::AboveNormal
            } else {
                Outcome::Normal
            })
        } else {
            None
        }
    }
}

/// Quoted numbers written with a decimal comma, e.g. `"12,2"`.
pub struct CommaDecimalRule;

impl CommaDecimalRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CommaDecimalRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for CommaDecimalRule {
    fn kind(&self) -> RuleKind {
        RuleKind::CommaDecimal
    }

    fn describe(&self) -> &'static str {
        "quoted decimal-comma number on AST, HbA1c, TSH or vitamin D"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        if !input.raw.contains(',') || !input.raw.contains('"') {
            return None;
        }

        let cleaned = input.raw.replace('"', "").replace(',', ".");
        let value = parse_float(&cleaned)?;
        let band = lookup_band(COMMA_DECIMAL_BANDS, &input.test)?;
        Some(band.place(value))
    }
}

/// Doubled decimal point typos, e.g. `5..81`.
pub struct DoubleDotRule;

impl DoubleDotRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DoubleDotRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DoubleDotRule {
    fn kind(&self) -> RuleKind {
        RuleKind::DoubleDot
    }

    fn describe(&self) -> &'static str {
        "doubled decimal point on free T3, free T4 or LH"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        if !input.raw.contains("..") {
            return None;
        }

        let value = parse_float(&input.raw.replace("..", "."))?;
        let band = lookup_band(DOUBLE_DOT_BANDS, &input.test)?;
        Some(band.place(value))
    }
}

/// Numbers wrapped in stray glyphs: `69*`, `` `196 ``, `28.;91`, `` 31`.43 ``.
pub struct NoisyNumericRule;

impl NoisyNumericRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoisyNumericRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NoisyNumericRule {
    fn kind(&self) -> RuleKind {
        RuleKind::NoisyNumeric
    }

    fn describe(&self) -> &'static str {
        "number with stray glyphs on cholesterol, chloride or urea"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        let band = lookup_band(NOISY_NUMERIC_BANDS, &input.test)?;
        let value = extract_noisy_value(input.raw)?;
        Some(band.place(value))
    }
}
