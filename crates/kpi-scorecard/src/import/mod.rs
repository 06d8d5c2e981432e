mod normalizer;
mod parser;

use crate::scorecard::Record;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RecordImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    DuplicateColumn(String),
    EmptyField {
        line: u64,
        column: &'static str,
    },
    InvalidScore {
        line: u64,
        column: String,
        value: String,
    },
}

impl std::fmt::Display for RecordImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordImportError::Io(err) => write!(f, "failed to read KPI export: {}", err),
            RecordImportError::Csv(err) => write!(f, "invalid KPI CSV data: {}", err),
            RecordImportError::MissingColumn(column) => {
                write!(f, "KPI export is missing the '{}' column", column)
            }
            RecordImportError::DuplicateColumn(column) => {
                write!(f, "KPI export has more than one '{}' column", column)
            }
            RecordImportError::EmptyField { line, column } => {
                write!(f, "line {}: '{}' must not be empty", line, column)
            }
            RecordImportError::InvalidScore {
                line,
                column,
                value,
            } => write!(
                f,
                "line {}: score '{}' for KPI '{}' is not a finite number",
                line, value, column
            ),
        }
    }
}

impl std::error::Error for RecordImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordImportError::Io(err) => Some(err),
            RecordImportError::Csv(err) => Some(err),
            RecordImportError::MissingColumn(_)
            | RecordImportError::DuplicateColumn(_)
            | RecordImportError::EmptyField { .. }
            | RecordImportError::InvalidScore { .. } => None,
        }
    }
}

impl From<std::io::Error> for RecordImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RecordImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads weekly KPI exports: one row per manager, employee and week, with
/// every column other than those three treated as a KPI score.
pub struct RecordImporter;

impl RecordImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, RecordImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Record>, RecordImportError> {
        parser::parse_records(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_cleanup_strips_bom_and_collapses_whitespace() {
        assert_eq!(
            normalizer::clean_header("\u{feff}Sales   Conversion "),
            "Sales Conversion"
        );
        assert_eq!(normalizer::header_key(" EMPLOYEE"), "employee");
    }

    #[test]
    fn parses_identity_columns_and_kpis() {
        let csv = "Manager,Employee,Week,Sales Conversion,CSAT,Attendance\n\
Alice,John,Week 1,80,72.5,90\n\
Alice,Maria,Week 1,55,60,100\n";
        let records = RecordImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(records.len(), 2);
        let john = &records[0];
        assert_eq!(john.owner, "Alice");
        assert_eq!(john.subject, "John");
        assert_eq!(john.period, "Week 1");
        assert_eq!(john.kpi_score("Sales Conversion"), Some(80.0));
        assert_eq!(john.kpi_score("CSAT"), Some(72.5));
        assert_eq!(john.kpi_scores.len(), 3);
    }

    #[test]
    fn identity_columns_may_appear_anywhere_with_any_case() {
        let csv = "CSAT,week,EMPLOYEE,manager\n88,Week 4,Ana,Bob\n";
        let records = RecordImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(records[0].owner, "Bob");
        assert_eq!(records[0].subject, "Ana");
        assert_eq!(records[0].period, "Week 4");
        assert_eq!(records[0].kpi_score("CSAT"), Some(88.0));
    }

    #[test]
    fn blank_kpi_cells_are_left_out_of_the_record() {
        let csv = "Manager,Employee,Week,CSAT,Attendance\nBob,Carlos,Week 2,,95\n";
        let records = RecordImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(records[0].kpi_score("CSAT"), None);
        assert_eq!(records[0].kpi_score("Attendance"), Some(95.0));
    }

    #[test]
    fn missing_identity_column_is_reported() {
        let csv = "Manager,Week,CSAT\nAlice,Week 1,70\n";
        let error = RecordImporter::from_reader(Cursor::new(csv)).expect_err("no employee column");
        match error {
            RecordImportError::MissingColumn(column) => assert_eq!(column, "Employee"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn kpi_headers_cleaning_to_the_same_name_are_rejected() {
        let csv = "Manager,Employee,Week,CSAT, CSAT\nAlice,John,Week 1,70,90\n";
        match RecordImporter::from_reader(Cursor::new(csv)).expect_err("duplicate CSAT") {
            RecordImportError::DuplicateColumn(column) => assert_eq!(column, "CSAT"),
            other => panic!("expected duplicate column, got {other:?}"),
        }

        let csv = "Manager,Employee,Week,Sales Conversion,Sales  Conversion\nAlice,John,Week 1,70,90\n";
        let error = RecordImporter::from_reader(Cursor::new(csv)).expect_err("collapsed spaces");
        assert_eq!(
            error.to_string(),
            "KPI export has more than one 'Sales Conversion' column"
        );
    }

    #[test]
    fn non_numeric_scores_carry_line_and_column() {
        let csv = "Manager,Employee,Week,CSAT\nAlice,John,Week 1,70\nAlice,John,Week 2,great\n";
        let error = RecordImporter::from_reader(Cursor::new(csv)).expect_err("bad score");
        match error {
            RecordImportError::InvalidScore {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "CSAT");
                assert_eq!(value, "great");
            }
            other => panic!("expected invalid score, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_scores_are_rejected() {
        let csv = "Manager,Employee,Week,CSAT\nAlice,John,Week 1,NaN\n";
        assert!(matches!(
            RecordImporter::from_reader(Cursor::new(csv)),
            Err(RecordImportError::InvalidScore { .. })
        ));
    }

    #[test]
    fn empty_subject_is_rejected() {
        let csv = "Manager,Employee,Week,CSAT\nAlice,,Week 1,70\n";
        match RecordImporter::from_reader(Cursor::new(csv)).expect_err("empty employee") {
            RecordImportError::EmptyField { line, column } => {
                assert_eq!(line, 2);
                assert_eq!(column, "Employee");
            }
            other => panic!("expected empty field, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = RecordImporter::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            RecordImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
