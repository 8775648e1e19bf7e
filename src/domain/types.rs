//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the engines and the serializer
//! - exported to JSON next to the CSV output
//! - reloaded later for comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which table to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Forward,
    Backward,
    Central,
    Pascal,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Forward,
        Operation::Backward,
        Operation::Central,
        Operation::Pascal,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Operation::Forward => "Forward Difference",
            Operation::Backward => "Backward Difference",
            Operation::Central => "Central Difference",
            Operation::Pascal => "Pascal Triangle",
        }
    }

    /// Menu number (1-based) used by the interactive console.
    pub fn menu_number(self) -> usize {
        match self {
            Operation::Forward => 1,
            Operation::Backward => 2,
            Operation::Central => 3,
            Operation::Pascal => 4,
        }
    }

    pub fn from_menu_number(choice: usize) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.menu_number() == choice)
    }

    /// Whether the operation consumes an expression + x-values.
    pub fn needs_samples(self) -> bool {
        !matches!(self, Operation::Pascal)
    }
}

/// A computed table, ready for printing and serialization.
///
/// `Levels` holds a forward/backward difference table (level 0 is the input),
/// `Flat` holds central differences, `Triangle` holds Pascal rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "rows")]
pub enum Table {
    Levels(Vec<Vec<f64>>),
    Flat(Vec<f64>),
    Triangle(Vec<Vec<u64>>),
}

/// One rendered value in a table. Integers stay exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Float(f64),
    Int(u64),
}

impl Table {
    /// Row-major view used by the serializer.
    ///
    /// A flat table is a single row, so it ends up as one CSV column.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        match self {
            Table::Levels(levels) => levels
                .iter()
                .map(|level| level.iter().copied().map(Cell::Float).collect())
                .collect(),
            Table::Flat(values) => vec![values.iter().copied().map(Cell::Float).collect()],
            Table::Triangle(rows) => rows
                .iter()
                .map(|row| row.iter().copied().map(Cell::Int).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Table::Levels(levels) => levels.len(),
            Table::Flat(_) => 1,
            Table::Triangle(rows) => rows.len(),
        }
    }
}

/// Fully resolved inputs for one run.
///
/// Built either from CLI flags or from the interactive menu, then validated
/// before any engine runs.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub operation: Operation,
    /// Expression in terms of `x` (difference operations only).
    pub expression: Option<String>,
    pub x_values: Vec<f64>,
    /// Level count (Pascal only).
    pub levels: Option<usize>,
    pub output: PathBuf,
    pub export_json: Option<PathBuf>,
    /// Decimal places for float cells; `None` = shortest round-trip form.
    pub precision: Option<usize>,
    /// Print the table to stdout before writing.
    pub print: bool,
}

impl JobConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.output.as_os_str().is_empty() {
            return Err(AppError::invalid_input("Output file name must not be empty."));
        }

        if self.operation.needs_samples() {
            match self.expression.as_deref().map(str::trim) {
                None | Some("") => {
                    return Err(AppError::invalid_input(format!(
                        "{} requires an expression in terms of x.",
                        self.operation.display_name()
                    )));
                }
                Some(_) => {}
            }
            if self.x_values.is_empty() {
                return Err(AppError::invalid_input("No x-values supplied."));
            }
            if let Some(bad) = self.x_values.iter().find(|v| !v.is_finite()) {
                return Err(AppError::invalid_input(format!("x-value is not a real number: {bad}")));
            }
        } else {
            match self.levels {
                None => {
                    return Err(AppError::invalid_input(
                        "Pascal Triangle requires a number of levels.",
                    ));
                }
                Some(0) => {
                    return Err(AppError::invalid_input(
                        "Number of levels for Pascal Triangle must be at least 1.",
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
