//! Field-level parsing for experiment CSV rows.

use csv::StringRecord;

use crate::error::RowError;

/// A CSV header with every column name trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn from_record(record: &StringRecord) -> Self {
        Self {
            columns: record.iter().map(normalize_column).collect(),
        }
    }

    /// Index of the first column with the given (already normalized) name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Required columns that this header lacks, in the order they were asked for.
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.position(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalizes an interface name into its grouping key.
pub fn normalize_interface(raw: &str) -> Result<String, RowError> {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        return Err(RowError::EmptyInterface);
    }
    Ok(key)
}

/// Parses a number written with either `.` or `,` as decimal separator.
///
/// # Errors
///
/// Returns [`RowError::InvalidNumber`] for empty, unparsable or non-finite input.
pub fn parse_decimal(column: &'static str, raw: &str) -> Result<f64, RowError> {
    let invalid = || RowError::InvalidNumber {
        column,
        value: raw.to_string(),
    };

    let cleaned = raw.trim().replace(',', ".");
    let value: f64 = cleaned.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_parse_decimal_dot_and_comma_agree() {
        assert_eq!(parse_decimal("time_s", "3.5"), Ok(3.5));
        assert_eq!(parse_decimal("time_s", "3,5"), Ok(3.5));
        assert_eq!(parse_decimal("accuracy", "90"), Ok(90.0));
        assert_eq!(parse_decimal("accuracy", " 92,25 "), Ok(92.25));
    }

    #[test]
    fn test_parse_decimal_random_values_ignore_separator() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let value: f64 = rng.gen_range(-1.0e6..1.0e6);
            let dot = value.to_string();
            let comma = dot.replace('.', ",");

            assert_eq!(parse_decimal("time_s", &dot), Ok(value), "{dot}");
            assert_eq!(parse_decimal("time_s", &comma), Ok(value), "{comma}");
        }
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(parse_decimal("time_s", "").is_err());
        assert!(parse_decimal("time_s", "fast").is_err());
        assert!(parse_decimal("time_s", "1,2,3").is_err());
        assert!(parse_decimal("time_s", "NaN").is_err());
        assert!(parse_decimal("time_s", "inf").is_err());
    }

    #[test]
    fn test_parse_decimal_error_carries_column() {
        let err = parse_decimal("accuracy", "x").unwrap_err();
        assert_eq!(
            err,
            RowError::InvalidNumber {
                column: "accuracy",
                value: "x".into()
            }
        );
    }

    #[test]
    fn test_header_is_normalized() {
        let header = Header::from_record(&StringRecord::from(vec![" Interface", "TIME_S ", "taskType"]));
        assert_eq!(header.columns(), &["interface", "time_s", "tasktype"]);
        assert_eq!(header.position("time_s"), Some(1));
        assert_eq!(header.position("tasktype"), Some(2));
    }

    #[test]
    fn test_header_missing_columns() {
        let header = Header::from_record(&StringRecord::from(vec!["interface", "time_s"]));
        assert_eq!(
            header.missing(&["interface", "time_s", "accuracy"]),
            vec!["accuracy".to_string()]
        );
        assert!(header.missing(&["interface"]).is_empty());
    }

    #[test]
    fn test_normalize_interface() {
        assert_eq!(normalize_interface("  Keyboard ").unwrap(), "keyboard");
        assert_eq!(normalize_interface(" "), Err(RowError::EmptyInterface));
    }
}
