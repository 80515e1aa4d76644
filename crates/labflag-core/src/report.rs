//! Outcome report: distribution and example rows of a batch run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{LabObservation, Outcome, RuleKind, Verdict};

/// One example row kept for the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSample {
    /// Zero-based row index in the input table
    pub row: usize,
    pub test_name: String,
    pub result: Option<String>,
    pub outcome: Outcome,
    pub rule: RuleKind,
}

/// Count, share and examples for one outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub outcome: Outcome,
    pub count: usize,

    /// Share of all rows, 0-100
    pub percentage: f64,

    /// First rows with this outcome, in input order
    pub samples: Vec<ReportSample>,
}

/// Summary of a classified table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub total: usize,

    /// One entry per outcome, in `Outcome::ALL` order
    pub outcomes: Vec<OutcomeSummary>,

    pub generated_at: DateTime<Utc>,
}

impl OutcomeReport {
    /// Summary for one outcome.
    pub fn summary(&self, outcome: Outcome) -> Option<&OutcomeSummary> {
        self.outcomes.iter().find(|s| s.outcome == outcome)
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.summary(outcome).map(|s| s.count).unwrap_or(0)
    }

    pub fn percentage(&self, outcome: Outcome) -> f64 {
        self.summary(outcome).map(|s| s.percentage).unwrap_or(0.0)
    }

    /// Summaries ordered by count, largest first.
    pub fn by_frequency(&self) -> Vec<&OutcomeSummary> {
        let mut ordered: Vec<&OutcomeSummary> = self.outcomes.iter().collect();
        ordered.sort_by(|a, b| b.count.cmp(&a.count));
        ordered
    }
}

impl fmt::Display for OutcomeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed {} records", self.total)?;

        writeln!(f)?;
        writeln!(f, "Outcome distribution:")?;
        for summary in self.by_frequency() {
            writeln!(f, "  {:<3} {:>8}", summary.outcome.code(), summary.count)?;
        }

        writeln!(f)?;
        writeln!(f, "Percentage distribution:")?;
        for summary in self.by_frequency() {
            writeln!(f, "  {:<3} {:>7.2}%", summary.outcome.code(), summary.percentage)?;
        }

        writeln!(f)?;
        writeln!(f, "=== EXAMPLES OF EACH CATEGORY ===")?;
        for summary in &self.outcomes {
            writeln!(f)?;
            writeln!(
                f,
                "{} ({}) examples:",
                summary.outcome.label(),
                summary.outcome.code()
            )?;
            for sample in &summary.samples {
                writeln!(
                    f,
                    "  {}: '{}' -> {}",
                    sample.test_name,
                    sample.result.as_deref().unwrap_or(""),
                    sample.outcome
                )?;
            }
        }

        Ok(())
    }
}

/// Accumulates verdicts row by row into an [`OutcomeReport`].
pub struct ReportBuilder {
    sample_limit: usize,
    total: usize,
    summaries: Vec<OutcomeSummary>,
}

impl ReportBuilder {
    pub fn new(sample_limit: usize) -> Self {
        Self {
            sample_limit,
            total: 0,
            summaries: Outcome::ALL
                .iter()
                .map(|&outcome| OutcomeSummary {
                    outcome,
                    count: 0,
                    percentage: 0.0,
                    samples: Vec::new(),
                })
                .collect(),
        }
    }

    /// Record the verdict for one row.
    pub fn record(&mut self, row: usize, observation: &LabObservation, verdict: Verdict) {
        self.total += 1;

        let Some(summary) = self
            .summaries
            .iter_mut()
            .find(|s| s.outcome == verdict.outcome)
        else {
            return;
        };

        summary.count += 1;
        if summary.samples.len() < self.sample_limit {
            summary.samples.push(ReportSample {
                row,
                test_name: observation.test_name.clone(),
                result: observation.result.clone(),
                outcome: verdict.outcome,
                rule: verdict.rule,
            });
        }
    }

    pub fn finish(mut self) -> OutcomeReport {
        for summary in &mut self.summaries {
            summary.percentage = if self.total == 0 {
                0.0
            } else {
                summary.count as f64 * 100.0 / self.total as f64
            };
        }

        OutcomeReport {
            total: self.total,
            outcomes: self.summaries,
            generated_at: Utc::now(),
        }
    }
}
