//! Interactive console menu.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the menu provides the "run `dtab` and answer prompts" UX
//!
//! Prompts are read from any `BufRead` and written to any `Write`, so the whole
//! dialogue can be driven from a byte buffer in tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::domain::{JobConfig, Operation};
use crate::error::AppError;
use crate::io::ingest::parse_x_values;

/// Run the menu dialogue up to the table inputs and return the job (not yet
/// validated). The output path is the configured default until
/// `prompt_output_path` is answered, which happens after the table is printed.
pub fn prompt_job<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    settings: &Settings,
) -> Result<JobConfig, AppError> {
    print_menu(output)?;

    let choice = prompt(input, output, "Choose an option (1-4): ")?;
    let operation = choice
        .parse::<usize>()
        .ok()
        .and_then(Operation::from_menu_number)
        .ok_or_else(|| AppError::invalid_input("Invalid choice!"))?;

    let mut job = JobConfig {
        operation,
        expression: None,
        x_values: Vec::new(),
        levels: None,
        output: settings.default_output.clone(),
        export_json: None,
        precision: settings.precision,
        print: true,
    };

    if operation.needs_samples() {
        let expression = prompt(
            input,
            output,
            "Enter the expression in terms of x (e.g., x**2 + 3*x + 2): ",
        )?;
        let x_values = prompt(input, output, "Enter x values separated by commas: ")?;
        job.expression = Some(expression);
        job.x_values = parse_x_values(&x_values)?;
    } else {
        let levels = prompt(input, output, "Enter number of levels for Pascal Triangle: ")?;
        let levels = levels
            .parse::<usize>()
            .map_err(|_| AppError::invalid_input(format!("Number of levels must be a whole number, got '{levels}'.")))?;
        job.levels = Some(levels);
    }

    Ok(job)
}

/// Ask for the output CSV file name; an empty answer keeps the default.
pub fn prompt_output_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    settings: &Settings,
) -> Result<PathBuf, AppError> {
    let file_name = prompt(
        input,
        output,
        &format!(
            "Enter output CSV file name [{}]: ",
            settings.default_output.display()
        ),
    )?;
    if file_name.is_empty() {
        return Ok(settings.default_output.clone());
    }
    Ok(PathBuf::from(file_name))
}

fn print_menu<W: Write>(output: &mut W) -> Result<(), AppError> {
    let mut text = String::from("Numerical Method Assignment\n");
    for op in Operation::ALL {
        text.push_str(&format!("{}. {}\n", op.menu_number(), op.display_name()));
    }
    output
        .write_all(text.as_bytes())
        .map_err(|e| AppError::io(format!("Failed to write menu: {e}")))
}

/// Print `label`, read one line, and return it trimmed.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String, AppError> {
    write!(output, "{label}")
        .and_then(|_| output.flush())
        .map_err(|e| AppError::io(format!("Failed to write prompt: {e}")))?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::io(format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Err(AppError::invalid_input("No input received."));
    }
    Ok(line.trim().to_string())
}
