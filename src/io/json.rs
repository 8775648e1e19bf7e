//! Read/write table JSON files.
//!
//! The JSON file is the self-describing companion of the CSV output:
//! - the operation and its inputs (expression, x-values, level count)
//! - the computed table in its natural (row-major, unpadded) shape
//! - a generation timestamp

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::{JobConfig, Operation, Table};
use crate::error::{AppError, ErrorKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x_values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<usize>,
    pub table: Table,
}

impl TableFile {
    pub fn new(job: &JobConfig, table: &Table) -> Self {
        Self {
            tool: "dtab".to_string(),
            generated: Utc::now(),
            operation: job.operation,
            expression: job.expression.clone(),
            x_values: job.x_values.clone(),
            levels: job.levels,
            table: table.clone(),
        }
    }
}

/// Encode a table JSON document without touching the filesystem.
///
/// JSON has no representation for `inf`/`NaN` (serde_json would emit `null`,
/// which cannot be read back), so tables holding overflowed cells are refused.
pub fn encode_table_json(file: &TableFile) -> Result<String, AppError> {
    if let Some((row, col, value)) = first_non_finite(&file.table) {
        return Err(AppError::invalid_input(format!(
            "Cannot export table JSON: cell {col} of row {row} is {value}, which JSON cannot represent."
        )));
    }
    serde_json::to_string_pretty(file).map_err(|e| AppError::io(format!("Failed to encode table JSON: {e}")))
}

/// Write already-encoded JSON text.
pub fn write_json_text(path: &Path, text: &str) -> Result<(), AppError> {
    std::fs::write(path, text)
        .map_err(|e| AppError::io(format!("Failed to write table JSON '{}': {e}", path.display())))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Encode and write a table JSON file.
pub fn write_table_json(path: &Path, file: &TableFile) -> Result<(), AppError> {
    let text = encode_table_json(file)?;
    write_json_text(path, &text)
}

fn first_non_finite(table: &Table) -> Option<(usize, usize, f64)> {
    let rows: Vec<&[f64]> = match table {
        Table::Levels(levels) => levels.iter().map(Vec::as_slice).collect(),
        Table::Flat(values) => vec![values.as_slice()],
        Table::Triangle(_) => return None,
    };
    rows.iter().enumerate().find_map(|(r, row)| {
        row.iter()
            .position(|v| !v.is_finite())
            .map(|c| (r, c, row[c]))
    })
}

/// Read a table JSON file.
pub fn read_table_json(path: &Path) -> Result<TableFile, AppError> {
    let file = File::open(path).map_err(|e| {
        let kind = if e.kind() == std::io::ErrorKind::NotFound {
            ErrorKind::FileNotFound
        } else {
            ErrorKind::Io
        };
        AppError::new(kind, format!("Failed to open table JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file).map_err(|e| AppError::invalid_input(format!("Invalid table JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn pascal_job_round_trips() {
        let path = std::env::temp_dir().join(format!("dtab_json_{}_pascal.json", std::process::id()));
        let job = JobConfig {
            operation: Operation::Pascal,
            expression: None,
            x_values: Vec::new(),
            levels: Some(3),
            output: PathBuf::from("out.csv"),
            export_json: Some(path.clone()),
            precision: None,
            print: false,
        };
        let table = Table::Triangle(vec![vec![1], vec![1, 1], vec![1, 2, 1]]);
        let file = TableFile::new(&job, &table);

        write_table_json(&path, &file).unwrap();
        let back = read_table_json(&path).unwrap();
        assert_eq!(back, file);
        assert_eq!(back.table, table);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"operation\": \"pascal\""));
        assert!(!text.contains("expression"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn overflowed_table_is_refused_before_writing() {
        let path = std::env::temp_dir().join(format!("dtab_json_{}_overflow.json", std::process::id()));
        let job = JobConfig {
            operation: Operation::Forward,
            expression: Some("x".to_string()),
            x_values: vec![-1e308, 1e308],
            levels: None,
            output: PathBuf::from("out.csv"),
            export_json: Some(path.clone()),
            precision: None,
            print: false,
        };
        let table = Table::Levels(vec![vec![-1e308, 1e308], vec![f64::INFINITY]]);

        let err = write_table_json(&path, &TableFile::new(&job, &table)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.message().contains("row 1"));
        assert!(!path.exists());
    }

    #[test]
    fn finite_levels_round_trip() {
        let path = std::env::temp_dir().join(format!("dtab_json_{}_levels.json", std::process::id()));
        let job = JobConfig {
            operation: Operation::Central,
            expression: Some("x**2".to_string()),
            x_values: vec![0.0, 1.0, 2.0],
            levels: None,
            output: PathBuf::from("out.csv"),
            export_json: Some(path.clone()),
            precision: None,
            print: false,
        };
        let file = TableFile::new(&job, &Table::Flat(vec![2.0]));

        write_table_json(&path, &file).unwrap();
        assert_eq!(read_table_json(&path).unwrap(), file);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_json_is_file_not_found() {
        let path = std::env::temp_dir().join("dtab_json_missing_never_written.json");
        assert_eq!(read_table_json(&path).unwrap_err().kind(), ErrorKind::FileNotFound);
    }
}
