//! Batch driver: classify every row of a table and write the outcome column.

use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::config::BatchConfig;
use crate::report::{OutcomeReport, ReportBuilder};
use crate::table::{LabTable, TableError};

/// Classify every row of `table` with the standard chain.
///
/// The outcome column named in `config` is overwritten or appended; all
/// other cells and the row order are untouched.
pub fn run_batch(table: &mut LabTable, config: &BatchConfig) -> Result<OutcomeReport, TableError> {
    run_batch_with(&Classifier::new(), table, config)
}

/// Classify every row of `table` with a given classifier.
pub fn run_batch_with(
    classifier: &Classifier,
    table: &mut LabTable,
    config: &BatchConfig,
) -> Result<OutcomeReport, TableError> {
    let observations = table.observations(&config.columns)?;
    debug!(rows = observations.len(), "classifying table");

    let mut builder = ReportBuilder::new(config.report.sample_limit);
    let mut codes = Vec::with_capacity(observations.len());

    for (row, observation) in observations.iter().enumerate() {
        let verdict = classifier.classify_observation(observation);
        builder.record(row, observation, verdict);
        codes.push(verdict.outcome.code().to_string());
    }

    table.set_column(&config.columns.outcome, codes)?;

    let report = builder.finish();
    info!(total = report.total, "batch classified");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    const INPUT: &str = "\
Standard Test Name,Result,Lab
Packed Cell Volume,35%,north
Bleeding Time,9:01,north
Hepatitis B,negative,south
TSH,> 10,south
Urine Culture,,east
";

    #[test]
    fn test_batch_appends_outcome_column() {
        let mut table = LabTable::from_reader(INPUT.as_bytes()).unwrap();
        let report = run_batch(&mut table, &BatchConfig::default()).unwrap();

        assert_eq!(
            table.headers(),
            &["Standard Test Name", "Result", "Lab", "Outcome"]
        );
        assert_eq!(table.column("Outcome").unwrap(), vec!["bn", "an", "n", "an", "n"]);
        assert_eq!(table.column("Lab").unwrap(), vec!["north", "north", "south", "south", "east"]);

        assert_eq!(report.total, 5);
        assert_eq!(report.count(Outcome::AboveNormal), 2);
        assert_eq!(report.count(Outcome::BelowNormal), 1);
        assert_eq!(report.count(Outcome::Normal), 2);
    }

    #[test]
    fn test_batch_overwrites_existing_outcome() {
        let input = "Standard Test Name,Outcome,Result\nHematocrit,stale,47%\n";
        let mut table = LabTable::from_reader(input.as_bytes()).unwrap();
        run_batch(&mut table, &BatchConfig::default()).unwrap();

        assert_eq!(table.headers(), &["Standard Test Name", "Outcome", "Result"]);
        assert_eq!(table.column("Outcome").unwrap(), vec!["an"]);
    }

    #[test]
    fn test_batch_with_custom_columns() {
        let config = BatchConfig::from_yaml(
            "columns:\n  result: Value\n  test_name: Test\n  outcome: Flag\n",
        )
        .unwrap();
        let mut table = LabTable::from_reader("Test,Value\nhematocrit,30%\n".as_bytes()).unwrap();
        run_batch(&mut table, &config).unwrap();
        assert_eq!(table.column("Flag").unwrap(), vec!["bn"]);
    }

    #[test]
    fn test_batch_missing_column_leaves_table_untouched() {
        let mut table = LabTable::from_reader("Result\n5\n".as_bytes()).unwrap();
        let before = table.clone();
        assert!(run_batch(&mut table, &BatchConfig::default()).is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_empty_table() {
        let mut table = LabTable::from_reader("Standard Test Name,Result\n".as_bytes()).unwrap();
        let report = run_batch(&mut table, &BatchConfig::default()).unwrap();
        assert_eq!(report.total, 0);
        assert_eq!(table.headers().last().unwrap(), "Outcome");
    }
}
