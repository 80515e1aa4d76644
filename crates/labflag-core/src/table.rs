//! In-memory CSV table.
//!
//! The table is read in full, keeps every column as text exactly as it
//! appeared, and is written back with the same column and row order.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::config::ColumnConfig;
use crate::types::LabObservation;

/// Errors that can occur when reading or writing a table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to access table file: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Row on line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Column has {found} values but table has {expected} rows")]
    LengthMismatch { expected: usize, found: usize },
}

/// A CSV table held as text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl LabTable {
    /// Read a table from a CSV file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.display(), rows = table.len(), "table loaded");
        Ok(table)
    }

    /// Read a table from any CSV source with a header row.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let width = headers.len();
        let mut table = Self {
            headers,
            rows: Vec::new(),
        };

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row = record.iter().map(str::to_string).collect();
            table.push_row(row, line, width)?;
        }

        Ok(table)
    }

    fn push_row(&mut self, mut row: Vec<String>, line: u64, width: usize) -> Result<(), TableError> {
        if row.len() > width {
            return Err(TableError::RaggedRow {
                line,
                expected: width,
                found: row.len(),
            });
        }
        row.resize(width, String::new());
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// All values of a column in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let index = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// One observation per row, in row order.
    ///
    /// An empty result cell is a missing value.
    pub fn observations(&self, columns: &ColumnConfig) -> Result<Vec<LabObservation>, TableError> {
        let result_index = self.require_column(&columns.result)?;
        let test_index = self.require_column(&columns.test_name)?;

        Ok(self
            .rows
            .iter()
            .map(|row| {
                let result = &row[result_index];
                LabObservation::new(
                    (!result.is_empty()).then(|| result.clone()),
                    row[test_index].clone(),
                )
            })
            .collect())
    }

    /// Overwrite a column, or append it as the last column when absent.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<(), TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                expected: self.rows.len(),
                found: values.len(),
            });
        }

        match self.column_index(name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }

        Ok(())
    }

    /// Write the table as CSV to a file, replacing it.
    ///
    /// The rows are staged in a temporary file next to `path` and renamed
    /// over it, so a failed write leaves the previous contents intact.
    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)?;
        if let Some(metadata) = fs::metadata(path).ok().filter(|m| m.is_file()) {
            staged.as_file().set_permissions(metadata.permissions())?;
        }
        self.write_to(staged.as_file_mut())?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|err| TableError::Io(err.error))?;

        debug!(path = %path.display(), rows = self.len(), "table written");
        Ok(())
    }

    /// Write the table as CSV to any sink.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), TableError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Patient,Standard Test Name,Result,Unit
1,Hematocrit,47%,%
2,Bleeding Time,1:30,min
3,Hepatitis B,,
";

    fn sample() -> LabTable {
        LabTable::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_reads_headers_and_rows() {
        let table = sample();
        assert_eq!(table.headers(), &["Patient", "Standard Test Name", "Result", "Unit"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.column("Result").unwrap(), vec!["47%", "1:30", ""]);
    }

    #[test]
    fn test_observations_in_row_order() {
        let observations = sample().observations(&ColumnConfig::default()).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].result.as_deref(), Some("47%"));
        assert_eq!(observations[1].test_name, "Bleeding Time");
        assert_eq!(observations[2].result, None);
    }

    #[test]
    fn test_missing_column() {
        let table = LabTable::from_reader("Result\n5\n".as_bytes()).unwrap();
        let err = table.observations(&ColumnConfig::default()).unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(ref name) if name == "Standard Test Name"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = LabTable::from_reader("a,b,c\n1\n".as_bytes()).unwrap();
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = LabTable::from_reader("a,b\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::RaggedRow { expected: 2, found: 3, .. }));
    }

    #[test]
    fn test_set_column_appends_then_overwrites() {
        let mut table = sample();
        table
            .set_column("Outcome", vec!["an".into(), "bn".into(), "n".into()])
            .unwrap();
        assert_eq!(table.headers().last().unwrap(), "Outcome");
        assert_eq!(table.column("Outcome").unwrap(), vec!["an", "bn", "n"]);

        table
            .set_column("Outcome", vec!["n".into(), "n".into(), "n".into()])
            .unwrap();
        assert_eq!(table.headers().len(), 5);
        assert_eq!(table.column("Outcome").unwrap(), vec!["n", "n", "n"]);
    }

    #[test]
    fn test_set_column_length_mismatch() {
        let mut table = sample();
        let err = table.set_column("Outcome", vec!["n".into()]).unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { expected: 3, found: 1 }));
    }

    #[test]
    fn test_write_preserves_cells_and_quoting() {
        let table = LabTable::from_reader(
            "Standard Test Name,Result\nAST,\"\"\"12,2\"\"\"\nUrea,69*\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(table.column("Result").unwrap(), vec!["\"12,2\"", "69*"]);

        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        let reread = LabTable::from_reader(out.as_slice()).unwrap();
        assert_eq!(reread, table);
    }

    #[test]
    fn test_write_path_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(&path, SAMPLE).unwrap();

        let mut table = LabTable::from_path(&path).unwrap();
        table
            .set_column("Outcome", vec!["an".into(), "bn".into(), "n".into()])
            .unwrap();
        table.write_path(&path).unwrap();

        assert_eq!(LabTable::from_path(&path).unwrap(), table);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_keeps_target_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("results.csv");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "kept").unwrap();

        let err = sample().write_path(&target).unwrap_err();
        assert!(matches!(err, TableError::Io(_)));
        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "kept");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_path_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = sample()
            .write_path(dir.path().join("absent").join("results.csv"))
            .unwrap_err();
        assert!(matches!(err, TableError::Io(_)));
    }
}
