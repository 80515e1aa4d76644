//! Shared vocabulary and detection patterns for rules.
//!
//! Indicator word lists, compiled regexes and the lenient number parsers
//! used by more than one rule live here, so every rule reads the same
//! vocabulary.

use std::borrow::Cow;
use std::num::IntErrorKind;

use lazy_static::lazy_static;
use regex::Regex;

// =========================================================================
// FREE-TEXT VOCABULARY
// =========================================================================

/// Substrings marking a positive / reactive result, misspellings included.
pub const POSITIVE_INDICATORS: &[&str] = &[
    "positive",
    "+ve",
    "+v",
    "positve",
    "possitive",
    "posative",
    "posetive",
    "reactiv",
    "detected",
    "presence",
];

/// Substrings marking a negative / non-reactive result.
pub const NEGATIVE_INDICATORS: &[&str] = &[
    "negative",
    "-ve",
    "-v",
    "negativ",
    "negatv",
    "negetive",
    "not detected",
    "absent",
    "no reactive",
];

/// Tests where a positive result is expected.
pub const POSITIVE_IS_NORMAL_TESTS: &[&str] = &["blood group", "covid-19 igg"];

/// Infection and disease markers.
pub const INFECTION_MARKER_TESTS: &[&str] = &[
    "brucella",
    "typhoid",
    "helicobacter",
    "hepatitis",
    "hiv",
    "pregnancy",
    "beta-hcg",
];

/// Inflammation markers, where positive means elevated.
pub const INFLAMMATION_MARKER_TESTS: &[&str] = &["c-reactive", "crp", "rheumatoid", "occult blood"];

/// Results that carry no measurement at all.
pub const MISSING_SENTINELS: &[&str] = &[".", "", "#NAME?", "nan"];

/// ABO letters; `AB` is subsumed by `A` but kept with the rest of the group set.
pub const BLOOD_GROUP_LETTERS: &[&str] = &["A", "B", "O", "AB"];

lazy_static! {
    // =========================================================================
    // COMPARISON OPERATOR PATTERNS
    // =========================================================================

    /// Inequality results, tried in order. The third pattern tolerates
    /// thousands separators; commas are stripped before parsing.
    pub static ref COMPARISON_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"[<>≤≥]\s*(\d+(?:\.\d+)?)").unwrap(),
        Regex::new(r"(\d+(?:\.\d+)?)\s*[<>]").unwrap(),
        Regex::new(r"[<>≤≥]\s*(\d+(?:,\d+)*(?:\.\d+)?)").unwrap(),
    ];

    // =========================================================================
    // NOISY GLYPH PATTERNS
    // =========================================================================

    /// Numbers mangled by stray punctuation: `69*`, `` `196 ``, `28.;91`,
    /// `` 31`.43 ``. Two-group patterns carry integer and fraction parts.
    pub static ref NOISY_NUMERIC_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(\d+)\s*\*").unwrap(),
        Regex::new(r"`(\d+)").unwrap(),
        Regex::new(r"(\d+)\.;(\d+)").unwrap(),
        Regex::new(r"(\d+)`\.(\d+)").unwrap(),
    ];
}

/// Check if `haystack` contains any of `needles`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Check if content carries a positive indicator.
pub fn has_positive_indicator(lower: &str) -> bool {
    contains_any(lower, POSITIVE_INDICATORS)
}

/// Check if content carries a negative indicator.
pub fn has_negative_indicator(lower: &str) -> bool {
    contains_any(lower, NEGATIVE_INDICATORS)
}

/// Check if a trimmed result is a placeholder for "no value".
pub fn is_missing_sentinel(trimmed: &str) -> bool {
    MISSING_SENTINELS.contains(&trimmed)
}

/// First code point of each run of ten Unicode decimal digits (`Nd`).
const DECIMAL_DIGIT_ZEROS: &[u32] = &[
    0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810,
    0x1946, 0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0,
    0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0,
    0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0,
    0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE,
    0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Value of a decimal digit from any script.
fn decimal_digit_value(c: char) -> Option<u8> {
    if c.is_ascii_digit() {
        return Some(c as u8 - b'0');
    }
    let code = u32::from(c);
    DECIMAL_DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .map(|&zero| (code - zero) as u8)
}

/// Rewrite decimal digits from other scripts (`٤٧`, `１２`) as ASCII.
fn ascii_digits(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| match decimal_digit_value(c) {
                Some(digit) => char::from(b'0' + digit),
                None => c,
            })
            .collect(),
    )
}

/// Drop `_` separators, which are only valid between two digits.
fn strip_digit_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }
    underscores_between_digits(text).then(|| Cow::Owned(text.replace('_', "")))
}

/// Parse a float leniently.
///
/// Surrounding whitespace is ignored, signs, exponents and `inf`/`nan`
/// spellings are accepted, decimal digits from any script count, and
/// underscores are allowed only between digits.
pub fn parse_float(text: &str) -> Option<f64> {
    let normalized = ascii_digits(text.trim());
    strip_digit_separators(&normalized)?.parse().ok()
}

/// Parse an integer leniently, with the same whitespace, digit and
/// underscore handling as [`parse_float`].
///
/// Integers are unbounded in the source data, so a well-formed value that
/// does not fit an `i64` clamps to `i64::MAX` / `i64::MIN`.
pub fn parse_int(text: &str) -> Option<i64> {
    let normalized = ascii_digits(text.trim());
    match strip_digit_separators(&normalized)?.parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn underscores_between_digits(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    })
}

/// Extract the magnitude of an inequality result such as `< 5` or `100>`.
///
/// Each pattern is tried on its first match only; a capture that fails to
/// parse moves on to the next pattern.
pub fn extract_comparison_value(text: &str) -> Option<f64> {
    COMPARISON_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        parse_float(&caps.get(1)?.as_str().replace(',', ""))
    })
}

/// Extract a number wrapped in stray glyphs, first pattern in order wins.
pub fn extract_noisy_value(text: &str) -> Option<f64> {
    NOISY_NUMERIC_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        match (caps.get(1), caps.get(2)) {
            (Some(whole), Some(fraction)) => {
                parse_float(&format!("{}.{}", whole.as_str(), fraction.as_str()))
            }
            (Some(whole), None) => parse_float(whole.as_str()),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_indicators() {
        assert!(has_positive_indicator("weakly positive"));
        assert!(has_positive_indicator("+ve"));
        assert!(has_positive_indicator("possitive"));
        assert!(has_positive_indicator("non reactive"));
        assert!(!has_positive_indicator("negative"));
    }

    #[test]
    fn test_not_detected_matches_both_lists() {
        // "detected" is a substring of "not detected"
        assert!(has_positive_indicator("not detected"));
        assert!(has_negative_indicator("not detected"));
    }

    #[test]
    fn test_missing_sentinels() {
        assert!(is_missing_sentinel("."));
        assert!(is_missing_sentinel(""));
        assert!(is_missing_sentinel("#NAME?"));
        assert!(is_missing_sentinel("nan"));
        assert!(!is_missing_sentinel("NaN"));
        assert!(!is_missing_sentinel("0"));
    }

    #[test]
    fn test_parse_float_is_lenient() {
        assert_eq!(parse_float(" 35 "), Some(35.0));
        assert_eq!(parse_float("+4.5"), Some(4.5));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("1e2"), Some(100.0));
        assert_eq!(parse_float("1_000"), Some(1000.0));
        assert_eq!(parse_float("inf"), Some(f64::INFINITY));
        assert!(parse_float("nan").unwrap().is_nan());
        assert_eq!(parse_float("_1"), None);
        assert_eq!(parse_float("1__0"), None);
        assert_eq!(parse_float("12.2.1"), None);
        assert_eq!(parse_float("abc"), None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(" 9 "), Some(9));
        assert_eq!(parse_int("-1"), Some(-1));
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_parsers_accept_digits_from_other_scripts() {
        assert_eq!(parse_float("٤٧"), Some(47.0));
        assert_eq!(parse_float("٣.٥"), Some(3.5));
        assert_eq!(parse_float("１２"), Some(12.0));
        assert_eq!(parse_float("४२"), Some(42.0));
        assert_eq!(parse_int("٩"), Some(9));
        assert_eq!(parse_int("٠١"), Some(1));
        // superscripts and fractions are numeric but not decimal digits
        assert_eq!(parse_float("²"), None);
        assert_eq!(parse_float("½"), None);
    }

    #[test]
    fn test_parse_int_clamps_overflow() {
        assert_eq!(parse_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_int("9_999_999_999_999_999_999"), Some(i64::MAX));
        assert_eq!(parse_int("99999999999999999999x"), None);
    }

    #[test]
    fn test_extraction_with_other_script_digits() {
        assert_eq!(extract_comparison_value("> ١٠"), Some(10.0));
        assert_eq!(extract_noisy_value("٦٩*"), Some(69.0));
    }

    #[test]
    fn test_comparison_extraction() {
        assert_eq!(extract_comparison_value("< 5"), Some(5.0));
        assert_eq!(extract_comparison_value(">100"), Some(100.0));
        assert_eq!(extract_comparison_value("≤ 0.5"), Some(0.5));
        assert_eq!(extract_comparison_value("≥10"), Some(10.0));
        assert_eq!(extract_comparison_value("7.5 <"), Some(7.5));
        assert_eq!(extract_comparison_value("12 mg/dl"), None);
    }

    #[test]
    fn test_comparison_extraction_stops_at_thousands_separator() {
        // The plain pattern already matches "1" before the comma-aware one runs.
        assert_eq!(extract_comparison_value("> 1,100"), Some(1.0));
    }

    #[test]
    fn test_noisy_extraction() {
        assert_eq!(extract_noisy_value("69*"), Some(69.0));
        assert_eq!(extract_noisy_value("69 *"), Some(69.0));
        assert_eq!(extract_noisy_value("`196"), Some(196.0));
        assert_eq!(extract_noisy_value("28.;91"), Some(28.91));
        assert_eq!(extract_noisy_value("31`.43"), Some(31.43));
        assert_eq!(extract_noisy_value("plain 42"), None);
    }
}
