//! Shared "table pipeline" logic used by both the CLI and the menu.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> sample expression -> build table -> serialize -> write
//!
//! Validation, sampling, table building, serialization and JSON encoding all
//! run before any file is created, so a failure in any of them leaves no
//! output behind. Only a filesystem error while writing the JSON companion can
//! leave the CSV in place.

use log::debug;

use crate::domain::{JobConfig, Operation, Table};
use crate::error::AppError;
use crate::io::json::{TableFile, encode_table_json, write_json_text};
use crate::math::{backward_difference, central_difference, forward_difference, pascal_triangle};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Sampled y-values (empty for Pascal).
    pub y_values: Vec<f64>,
    pub table: Table,
}

/// Validate the job and compute its table without touching the filesystem.
pub fn compute(job: &JobConfig) -> Result<RunOutput, AppError> {
    job.validate()?;

    let y_values = match (job.operation.needs_samples(), job.expression.as_deref()) {
        (true, Some(expression)) => {
            let ys = crate::expr::sample(expression, &job.x_values)?;
            debug!("sampled {} point(s) of '{expression}'", ys.len());
            ys
        }
        _ => Vec::new(),
    };

    let table = match job.operation {
        Operation::Forward => Table::Levels(forward_difference(&y_values)?),
        Operation::Backward => Table::Levels(backward_difference(&y_values)?),
        Operation::Central => Table::Flat(central_difference(&y_values)?),
        Operation::Pascal => {
            let levels = job
                .levels
                .ok_or_else(|| AppError::invalid_input("Pascal Triangle requires a number of levels."))?;
            Table::Triangle(pascal_triangle(levels)?)
        }
    };
    debug!("{} produced {} row(s)", job.operation.display_name(), table.row_count());

    Ok(RunOutput { y_values, table })
}

/// Compute the table and write the CSV (and optional JSON) outputs.
pub fn run_job(job: &JobConfig) -> Result<RunOutput, AppError> {
    let run = compute(job)?;
    write_outputs(job, &run.table)?;
    Ok(run)
}

/// Write the CSV output, then the JSON companion if requested.
///
/// The JSON text is encoded first so an unrepresentable table fails before
/// the CSV exists.
pub fn write_outputs(job: &JobConfig, table: &Table) -> Result<(), AppError> {
    let json = match &job.export_json {
        Some(path) => Some((path, encode_table_json(&TableFile::new(job, table))?)),
        None => None,
    };

    crate::io::export::write_table_csv(&job.output, &table.rows(), job.precision)?;

    if let Some((path, text)) = json {
        write_json_text(path, &text)?;
    }
    Ok(())
}
