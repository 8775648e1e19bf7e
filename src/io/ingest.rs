//! CSV ingest and x-value parsing.
//!
//! Input files are plain rows of comma-separated numbers with no header.
//! Empty fields become `None`; everything else must parse as `f64`.

use std::fs::File;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use log::{debug, warn};

use crate::error::{AppError, ErrorKind};

/// Parsed CSV rows. `None` marks an empty field.
pub type Dataset = Vec<Vec<Option<f64>>>;

/// Read a numeric CSV file.
pub fn read_csv(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == IoErrorKind::NotFound {
            AppError::file_not_found(format!("Error: File '{}' not found.", path.display()))
        } else {
            AppError::io(format!("Failed to open CSV '{}': {e}", path.display()))
        }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut data = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 1;
        let record =
            result.map_err(|e| AppError::invalid_input(format!("CSV parse error on line {line}: {e}")))?;

        let row = record
            .iter()
            .enumerate()
            .map(|(col, field)| parse_field(field, line, col + 1))
            .collect::<Result<Vec<_>, _>>()?;
        data.push(row);
    }

    debug!("read {} row(s) from {}", data.len(), path.display());
    Ok(data)
}

/// Like `read_csv`, but a missing file is reported and yields an empty dataset.
///
/// Callers that need real data must check for emptiness themselves.
pub fn read_csv_or_empty(path: &Path) -> Result<Dataset, AppError> {
    match read_csv(path) {
        Err(err) if err.kind() == ErrorKind::FileNotFound => {
            warn!("{err}");
            eprintln!("{err}");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Pull the non-empty values of one column (0-based) out of a dataset.
pub fn column_values(data: &Dataset, column: usize) -> Vec<f64> {
    let mut skipped = 0usize;
    let values: Vec<f64> = data
        .iter()
        .filter_map(|row| match row.get(column).copied().flatten() {
            Some(v) => Some(v),
            None => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!("skipped {skipped} blank cell(s) in column {}", column + 1);
    }
    values
}

/// Parse a comma-separated list of x-values (e.g. `0, 0.5, 1`).
pub fn parse_x_values(input: &str) -> Result<Vec<f64>, AppError> {
    input
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(idx, token)| {
            if token.is_empty() {
                return Err(AppError::invalid_input(format!(
                    "x-value {} is empty in '{}'.",
                    idx + 1,
                    input.trim()
                )));
            }
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| AppError::invalid_input(format!("x-value '{token}' is not a real number.")))
        })
        .collect()
}

fn parse_field(field: &str, line: usize, col: usize) -> Result<Option<f64>, AppError> {
    if field.is_empty() {
        return Ok(None);
    }
    field
        .parse::<f64>()
        .map(Some)
        .map_err(|_| AppError::invalid_input(format!("Line {line}, column {col}: '{field}' is not a number.")))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dtab_ingest_{}_{name}", std::process::id()))
    }

    #[test]
    fn parse_x_values_accepts_spaces() {
        assert_eq!(parse_x_values("0, 0.5,1 , -2e1").unwrap(), vec![0.0, 0.5, 1.0, -20.0]);
    }

    #[test]
    fn parse_x_values_rejects_garbage() {
        for bad in ["", "1,,2", "1, two", "1, nan", "inf"] {
            let err = parse_x_values(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{bad:?}");
        }
    }

    #[test]
    fn read_csv_maps_empty_fields_to_none() {
        let path = temp_path("ragged.csv");
        fs::write(&path, "1,4\n2,5\n3,\n").unwrap();

        let data = read_csv(&path).unwrap();
        assert_eq!(
            data,
            vec![
                vec![Some(1.0), Some(4.0)],
                vec![Some(2.0), Some(5.0)],
                vec![Some(3.0), None],
            ]
        );
        assert_eq!(column_values(&data, 1), vec![4.0, 5.0]);
        assert_eq!(column_values(&data, 5), Vec::<f64>::new());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn read_csv_rejects_non_numeric_fields() {
        let path = temp_path("words.csv");
        fs::write(&path, "1,abc\n").unwrap();

        let err = read_csv(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.message().contains("abc"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_reported() {
        let path = temp_path("does_not_exist.csv");
        let err = read_csv(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.message().contains("not found"));

        assert!(read_csv_or_empty(&path).unwrap().is_empty());
    }
}
