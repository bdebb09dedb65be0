//! CSV discovery and tolerant loading.
//!
//! Files are read one at a time and closed before the next is opened. Files
//! and rows that do not fit the schema are logged and skipped; only an
//! unusable directory stops the run.

use csv::ReaderBuilder;
use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::analyzers::schema::RowSchema;
use crate::analyzers::types::LoadReport;
use crate::error::{RowError, SummaryError};
use crate::parser::Header;

/// Lists the `.csv` files directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// [`SummaryError::MissingDirectory`] if `dir` cannot be listed,
/// [`SummaryError::NoFilesFound`] if it holds no CSV files.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>, SummaryError> {
    let missing = || SummaryError::MissingDirectory(dir.to_path_buf());

    if !dir.is_dir() {
        return Err(missing());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|_| missing())?
        .filter_map(|entry| csv_entry(dir, entry))
        .collect();

    if files.is_empty() {
        return Err(SummaryError::NoFilesFound(dir.to_path_buf()));
    }

    files.sort();
    info!(dir = %dir.display(), count = files.len(), "Found CSV files");
    Ok(files)
}

fn csv_entry(dir: &Path, entry: io::Result<DirEntry>) -> Option<PathBuf> {
    let path = match entry {
        Ok(entry) => entry.path(),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Directory entry skipped");
            return None;
        }
    };

    (path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("csv")).then_some(path)
}

/// Reads every file with `schema`, collecting the records that validate.
pub fn load_records<S: RowSchema>(schema: &S, files: &[PathBuf]) -> (Vec<S::Record>, LoadReport) {
    let mut records = Vec::new();
    let mut report = LoadReport {
        files_found: files.len(),
        ..Default::default()
    };

    for path in files {
        info!(file = %path.display(), pipeline = schema.name(), "Reading CSV file");
        match load_file(schema, path, &mut records, &mut report) {
            Ok(()) => report.files_read += 1,
            Err(e) => {
                warn!(error = %e, "File skipped");
                report.files_skipped += 1;
            }
        }
    }

    info!(
        rows_accepted = report.rows_accepted,
        rows_skipped = report.rows_skipped,
        rows_ignored = report.rows_ignored,
        files_skipped = report.files_skipped,
        "Finished reading CSV files"
    );

    (records, report)
}

fn load_file<S: RowSchema>(
    schema: &S,
    path: &Path,
    records: &mut Vec<S::Record>,
    report: &mut LoadReport,
) -> Result<(), SummaryError> {
    let unreadable = |source| SummaryError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(unreadable)?;
    let header = Header::from_record(rdr.headers().map_err(unreadable)?);

    let Some(columns) = schema.bind(&header) else {
        return Err(SummaryError::MissingRequiredColumns {
            path: path.to_path_buf(),
            missing: header.missing(schema.required_columns()),
            found: header.columns().to_vec(),
        });
    };

    for (i, result) in rdr.records().enumerate() {
        // header is line 1
        let fallback_line = i as u64 + 2;
        let (line, outcome) = match result {
            Ok(row) => (
                row.position().map_or(fallback_line, |p| p.line()),
                schema.parse_row(&columns, &row),
            ),
            Err(e) => (
                e.position().map_or(fallback_line, |p| p.line()),
                Err(RowError::Unreadable(e.to_string())),
            ),
        };

        match outcome {
            Ok(Some(record)) => {
                records.push(record);
                report.rows_accepted += 1;
            }
            Ok(None) => {
                debug!(file = %path.display(), line, "Row not relevant, ignored");
                report.rows_ignored += 1;
            }
            Err(source) => {
                let e = SummaryError::MalformedRow {
                    path: path.to_path_buf(),
                    line,
                    source,
                };
                warn!(error = %e, "Row skipped");
                report.rows_skipped += 1;
            }
        }
    }

    Ok(())
}
