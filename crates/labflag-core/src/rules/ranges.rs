//! Reference ranges.
//!
//! Every table here is an ordered slice, never a map: fragments overlap
//! ("serum triglycerides" / "triglycerides", "free t4" / "tsh" in a combined
//! panel name) and the first fragment found in the test name wins.

use crate::types::Outcome;

/// Inclusive normal band for a numeric result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Band with no lower bound; only the upper side is flagged.
    pub const fn upper(high: f64) -> Self {
        Self {
            low: f64::NEG_INFINITY,
            high,
        }
    }

    pub fn place(&self, value: f64) -> Outcome {
        Outcome::from_band(value, self.low, self.high)
    }
}

/// One entry of the comparison-operator range table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestRange {
    /// Lowercase fragment matched by substring against the test name.
    pub fragment: &'static str,
    pub band: Band,
}

const fn range(fragment: &'static str, low: f64, high: f64) -> TestRange {
    TestRange {
        fragment,
        band: Band::new(low, high),
    }
}

/// Normal ranges applied to inequality results (`< 5`, `> 100`).
pub const TEST_RANGES: &[TestRange] = &[
    range("albumin-to-creatinine ratio", 0.0, 30.0),
    range("alpha-fetoprotein", 0.0, 10.0),
    range("anti-cyclic citrullinated peptide", 0.0, 20.0),
    range("anti-thyroid peroxidase antibody", 0.0, 35.0),
    range("beta-hcg", 0.0, 5.0),
    range("ca 19-9", 0.0, 37.0),
    range("carcinoembryonic antigen", 0.0, 3.0),
    range("d-dimer", 0.0, 0.5),
    range("estradiol", 15.0, 350.0),
    range("fecal calprotectein", 0.0, 50.0),
    range("fecal occult blood", 0.0, 7.0),
    range("follicle-stimulating hormone", 1.5, 12.4),
    range("free t4", 0.8, 1.8),
    range("gamma-glutamyl transferase", 7.0, 64.0),
    range("hiv antibody", 0.0, 1.0),
    range("high-sensitivity troponin t", 0.0, 14.0),
    range("immunoglobulin e", 0.0, 100.0),
    range("luteinizing hormone", 1.7, 8.6),
    range("n-terminal pro-b-type natriuretic peptide", 0.0, 125.0),
    range("parathyroid hormone", 15.0, 65.0),
    range("progesterone", 0.2, 25.0),
    range("prolactin", 4.0, 23.0),
    range("prostate-specific antigen", 0.0, 4.0),
    range("rheumatoid factor", 0.0, 14.0),
    range("serum ferritin", 15.0, 150.0),
    range("serum triglycerides", 0.0, 150.0),
    range("stool for calprotectin", 0.0, 50.0),
    range("tsh", 0.4, 4.0),
    range("testosterone", 300.0, 1000.0),
    range("thyroglobulin", 1.4, 78.0),
    range("tissue transglutaminase", 0.0, 20.0),
    range("triglycerides", 0.0, 150.0),
    range("triiodothyronine", 80.0, 200.0),
    range("urine albumin", 0.0, 30.0),
    range("vitamin b12", 200.0, 900.0),
    range("vitamin d3", 30.0, 100.0),
];

/// Find the first range whose fragment occurs in a lowercased test name.
pub fn lookup_test_range(test_name: &str) -> Option<&'static TestRange> {
    TEST_RANGES
        .iter()
        .find(|entry| test_name.contains(entry.fragment))
}

/// A band selected by any of several test-name fragments.
pub type KeyedBand = (&'static [&'static str], Band);

/// Quoted results written with a decimal comma (`"12,2"`).
pub const COMMA_DECIMAL_BANDS: &[KeyedBand] = &[
    (&["ast", "aspartate"], Band::new(8.0, 40.0)),
    (&["hba1c"], Band::new(4.0, 5.6)),
    (&["tsh"], Band::new(0.4, 4.0)),
    (&["vitamin d"], Band::new(30.0, 100.0)),
];

/// Results with a doubled decimal point (`5..81`).
pub const DOUBLE_DOT_BANDS: &[KeyedBand] = &[
    (&["free t3"], Band::new(2.3, 4.2)),
    (&["free t4"], Band::new(0.8, 1.8)),
    (&["luteinizing hormone"], Band::new(1.0, 20.0)),
];

/// Results wrapped in stray glyphs (`69*`, `` `196 ``).
pub const NOISY_NUMERIC_BANDS: &[KeyedBand] = &[
    (&["cholesterol"], Band::upper(200.0)),
    (&["chloride"], Band::new(98.0, 107.0)),
    (&["urea"], Band::new(7.0, 45.0)),
];

/// Find the first keyed band with a fragment occurring in the test name.
pub fn lookup_band(table: &[KeyedBand], test_name: &str) -> Option<Band> {
    table
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| test_name.contains(f)))
        .map(|(_, band)| *band)
}
