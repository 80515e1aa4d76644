//! Bleeding and clotting times reported as `minutes:seconds`.

use crate::types::{Outcome, RuleKind};

use super::patterns::parse_int;
use super::{Rule, RuleInput};

/// Normal bleeding time: 2 to 9 minutes.
const BLEEDING_SECONDS: (i64, i64) = (120, 540);

/// Normal clotting time: 5 to 15 minutes.
const CLOTTING_SECONDS: (i64, i64) = (300, 900);

pub struct TimedCoagulationRule;

impl TimedCoagulationRule {
    pub fn new() -> Self {
        Self
    }

    /// Total seconds of an `m:ss` result; exactly two integer parts.
    fn total_seconds(raw: &str) -> Option<i64> {
        let mut parts = raw.split(':');
        let minutes = parse_int(parts.next()?)?;
        let seconds = parse_int(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(minutes.saturating_mul(60).saturating_add(seconds))
    }
}

impl Default for TimedCoagulationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for TimedCoagulationRule {
    fn kind(&self) -> RuleKind {
        RuleKind::TimedCoagulation
    }

    fn describe(&self) -> &'static str {
        "m:ss bleeding time (2-9 min) or clotting time (5-15 min)"
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<Outcome> {
        if !input.raw.contains(':') {
            return None;
        }

        // bleeding takes precedence when a test name mentions both
        let (low, high) = if input.test.contains("bleeding") {
            BLEEDING_SECONDS
        } else if input.test.contains("clotting") {
            CLOTTING_SECONDS
        } else {
            return None;
        };

        let total = Self::total_seconds(input.raw)?;
        Some(if total < low {
            Outcome::BelowNormal
        } else if total > high {
            Outcome::AboveNormal
        } else {
            Outcome::Normal
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(result: &str, test: &str) -> Option<Outcome> {
        TimedCoagulationRule::new().apply(&RuleInput::new(result, test))
    }

    #[test]
    fn test_bleeding_time_boundaries() {
        assert_eq!(apply("1:30", "bleeding time"), Some(Outcome::BelowNormal));
        assert_eq!(apply("2:00", "bleeding time"), Some(Outcome::Normal));
        assert_eq!(apply("9:00", "bleeding time"), Some(Outcome::Normal));
        assert_eq!(apply("9:01", "bleeding time"), Some(Outcome::AboveNormal));
    }

    #[test]
    fn test_clotting_time_boundaries() {
        assert_eq!(apply("4:59", "clotting time"), Some(Outcome::BelowNormal));
        assert_eq!(apply("5:00", "Clotting Time"), Some(Outcome::Normal));
        assert_eq!(apply("15:00", "clotting time"), Some(Outcome::Normal));
        assert_eq!(apply("15:01", "clotting time"), Some(Outcome::AboveNormal));
    }

    #[test]
    fn test_bleeding_wins_when_both_mentioned() {
        // 4:00 is normal bleeding but short clotting
        assert_eq!(apply("4:00", "bleeding and clotting time"), Some(Outcome::Normal));
    }

    #[test]
    fn test_malformed_times_pass() {
        assert_eq!(apply("1:30:00", "bleeding time"), None);
        assert_eq!(apply("1.5:30", "bleeding time"), None);
        assert_eq!(apply("abc:30", "bleeding time"), None);
        assert_eq!(apply("1:", "bleeding time"), None);
        assert_eq!(apply("90", "bleeding time"), None);
        assert_eq!(apply("1:30", "prothrombin time"), None);
    }

    #[test]
    fn test_seconds_are_not_range_checked() {
        // 1 minute 90 seconds = 150 s
        assert_eq!(apply("1:90", "bleeding time"), Some(Outcome::Normal));
        assert_eq!(apply(" 3 : 05 ", "bleeding time"), Some(Outcome::Normal));
    }

    #[test]
    fn test_huge_minutes_saturate() {
        assert_eq!(
            apply("99999999999999999999:00", "bleeding time"),
            Some(Outcome::AboveNormal)
        );
        assert_eq!(
            apply("-99999999999999999999:00", "clotting time"),
            Some(Outcome::BelowNormal)
        );
    }

    #[test]
    fn test_other_script_digits() {
        assert_eq!(apply("٩:٠١", "bleeding time"), Some(Outcome::AboveNormal));
        assert_eq!(apply("٥:٠٠", "clotting time"), Some(Outcome::Normal));
    }
}
