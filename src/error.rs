//! Error types for the summary pipelines.
//!
//! [`SummaryError`] covers run- and file-level conditions. Only
//! `MissingDirectory`, `NoFilesFound` and `NoValidAggregates` end a run; the
//! rest are logged where they happen and turned into a skip.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("data directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("no CSV files found in {}", .0.display())]
    NoFilesFound(PathBuf),

    #[error("skipping {}: unreadable file: {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("skipping {}: missing columns {missing:?} (found: {found:?})", .path.display())]
    MissingRequiredColumns {
        path: PathBuf,
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("skipping row {line} of {}: {source}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        #[source]
        source: RowError,
    },

    #[error("no valid data to analyze")]
    NoValidAggregates,
}

impl SummaryError {
    /// True for the conditions that terminate a run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SummaryError::MissingDirectory(_)
                | SummaryError::NoFilesFound(_)
                | SummaryError::NoValidAggregates
        )
    }
}

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("row has {len} fields, needs at least {needed}")]
    ShortRow { len: usize, needed: usize },

    #[error("invalid number {value:?} in column {column}")]
    InvalidNumber { column: &'static str, value: String },

    #[error("empty interface value")]
    EmptyInterface,

    #[error("unreadable record: {0}")]
    Unreadable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(SummaryError::NoFilesFound(PathBuf::from("data")).is_fatal());
        assert!(SummaryError::MissingDirectory(PathBuf::from("data")).is_fatal());
        assert!(SummaryError::NoValidAggregates.is_fatal());

        let skipped = SummaryError::MissingRequiredColumns {
            path: PathBuf::from("a.csv"),
            missing: vec!["accuracy".into()],
            found: vec!["interface".into(), "time_s".into()],
        };
        assert!(!skipped.is_fatal());
    }

    #[test]
    fn test_missing_columns_message_names_file() {
        let err = SummaryError::MissingRequiredColumns {
            path: PathBuf::from("session3.csv"),
            missing: vec!["accuracy".into()],
            found: vec!["interface".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("session3.csv"));
        assert!(msg.contains("accuracy"));
    }

    #[test]
    fn test_malformed_row_message() {
        let err = SummaryError::MalformedRow {
            path: PathBuf::from("s.csv"),
            line: 4,
            source: RowError::InvalidNumber {
                column: "time_s",
                value: "abc".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "skipping row 4 of s.csv: invalid number \"abc\" in column time_s"
        );
    }
}
