//! Table serialization and CSV export.
//!
//! Tables are row-major and ragged (each difference level is one shorter than
//! the previous). For output we pad every row on the right with a blank marker
//! and transpose, so each level becomes one aligned CSV column.

use std::fs::File;
use std::path::Path;

use log::{debug, info};

use crate::domain::Cell;
use crate::error::AppError;

/// Pad ragged rows with `None` and transpose to column-major order.
///
/// Output row `k` is `[rows[0][k], rows[1][k], ...]`. The padding marker is
/// `None`, never a numeric zero.
pub fn serialize<T: Clone>(rows: &[Vec<T>]) -> Result<Vec<Vec<Option<T>>>, AppError> {
    let max_len = rows
        .iter()
        .map(Vec::len)
        .max()
        .ok_or_else(|| AppError::empty_table("Cannot write an empty table (no rows)."))?;

    let grid = (0..max_len)
        .map(|k| rows.iter().map(|row| row.get(k).cloned()).collect())
        .collect();
    Ok(grid)
}

/// Render one cell. Floats keep a decimal point (`1.0`) unless a fixed
/// precision is requested; integers are written as-is; padding is empty.
pub fn format_cell(cell: Option<&Cell>, precision: Option<usize>) -> String {
    match (cell, precision) {
        (None, _) => String::new(),
        (Some(Cell::Int(v)), _) => v.to_string(),
        (Some(Cell::Float(v)), Some(p)) => format!("{v:.p$}"),
        (Some(Cell::Float(v)), None) => format!("{v:?}"),
    }
}

/// Serialize `rows` and write the transposed grid to `path`.
///
/// The grid is fully built before the file is created, so a failure never
/// leaves a partial CSV behind.
pub fn write_table_csv(path: &Path, rows: &[Vec<Cell>], precision: Option<usize>) -> Result<(), AppError> {
    let grid = serialize(rows)?;
    let records: Vec<Vec<String>> = grid
        .iter()
        .map(|record| record.iter().map(|c| format_cell(c.as_ref(), precision)).collect())
        .collect();

    debug!(
        "writing {} record(s) x {} column(s) to {}",
        records.len(),
        rows.len(),
        path.display()
    );

    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create output CSV '{}': {e}", path.display())))?;
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);

    for record in &records {
        writer
            .write_record(record)
            .map_err(|e| AppError::io(format!("Failed to write output CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush output CSV '{}': {e}", path.display())))?;

    info!("wrote {}", path.display());
    Ok(())
}
