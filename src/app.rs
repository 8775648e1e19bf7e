//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments (or runs the interactive menu)
//! - builds and validates a `JobConfig`
//! - computes the table, prints it, and writes the outputs

use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Parser;
use log::debug;

use crate::cli::{Command, OutputArgs, PascalArgs, SampleArgs};
use crate::config::Settings;
use crate::domain::{JobConfig, Operation, Table};
use crate::error::AppError;
use crate::io::ingest::{column_values, parse_x_values, read_csv_or_empty};

pub mod pipeline;

/// Entry point for the `dtab` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // `dtab` with no arguments behaves like `dtab menu`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    // After parsing, so `--help` and an explicit `--precision` never trip over
    // a bad DTAB_PRECISION.
    let settings = Settings::from_env(cli.command.precision_flag())?;

    let mut stdout = io::stdout();
    let job = match cli.command {
        Command::Forward(args) => sample_job(Operation::Forward, args, &settings)?,
        Command::Backward(args) => sample_job(Operation::Backward, args, &settings)?,
        Command::Central(args) => sample_job(Operation::Central, args, &settings)?,
        Command::Pascal(args) => pascal_job(args, &settings),
        Command::Menu => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            run_menu(&mut input, &mut stdout, &settings)?;
            return Ok(());
        }
    };

    handle_job(&job, &mut stdout)
}

fn handle_job<W: Write>(job: &JobConfig, output: &mut W) -> Result<(), AppError> {
    debug!("job: {job:?}");
    let run = pipeline::compute(job)?;
    if job.print {
        print_table(&run.table, output)?;
    }
    finish_job(job, &run.table, output)
}

/// Menu flow: answer the table prompts, see the table, then name the file.
pub fn run_menu<R: BufRead, W: Write>(input: &mut R, output: &mut W, settings: &Settings) -> Result<JobConfig, AppError> {
    let mut job = crate::cli::menu::prompt_job(input, output, settings)?;
    debug!("job: {job:?}");
    let run = pipeline::compute(&job)?;
    print_table(&run.table, output)?;

    job.output = crate::cli::menu::prompt_output_path(input, output, settings)?;
    job.validate()?;
    finish_job(&job, &run.table, output)?;
    Ok(job)
}

fn print_table<W: Write>(table: &Table, output: &mut W) -> Result<(), AppError> {
    write!(output, "{}", crate::report::format_table(table))
        .map_err(|e| AppError::io(format!("Failed to print table: {e}")))
}

fn finish_job<W: Write>(job: &JobConfig, table: &Table, output: &mut W) -> Result<(), AppError> {
    pipeline::write_outputs(job, table)?;

    let mut text = format!("Output written to '{}'\n", job.output.display());
    if let Some(path) = &job.export_json {
        text.push_str(&format!("Table JSON written to '{}'\n", path.display()));
    }
    output
        .write_all(text.as_bytes())
        .map_err(|e| AppError::io(format!("Failed to write summary: {e}")))
}

pub fn sample_job(operation: Operation, args: SampleArgs, settings: &Settings) -> Result<JobConfig, AppError> {
    let x_values = match (&args.x_values, &args.x_file) {
        (Some(list), _) => parse_x_values(list)?,
        (None, Some(path)) => x_values_from_csv(path, args.column)?,
        (None, None) => {
            return Err(AppError::invalid_input(
                "Provide x-values with --x \"0,1,2\" or --x-file <CSV>.",
            ));
        }
    };

    let mut job = job_from_output_args(operation, &args.out, settings);
    job.expression = Some(args.expression);
    job.x_values = x_values;
    Ok(job)
}

pub fn pascal_job(args: PascalArgs, settings: &Settings) -> JobConfig {
    let mut job = job_from_output_args(Operation::Pascal, &args.out, settings);
    job.levels = Some(args.levels);
    job
}

fn job_from_output_args(operation: Operation, out: &OutputArgs, settings: &Settings) -> JobConfig {
    JobConfig {
        operation,
        expression: None,
        x_values: Vec::new(),
        levels: None,
        output: out.output.clone().unwrap_or_else(|| settings.default_output.clone()),
        export_json: out.json.clone(),
        precision: out.precision.or(settings.precision),
        print: !out.quiet,
    }
}

/// Load x-values from a 1-based CSV column. A missing file is reported and
/// yields no values, which validation then rejects.
fn x_values_from_csv(path: &Path, column: usize) -> Result<Vec<f64>, AppError> {
    if column == 0 {
        return Err(AppError::invalid_input("--column is 1-based; 0 is not a column."));
    }
    let data = read_csv_or_empty(path)?;
    Ok(column_values(&data, column - 1))
}

/// Rewrite argv so `dtab` defaults to `dtab menu`.
///
/// Rules:
/// - `dtab`           -> `dtab menu`
/// - anything else    -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    if argv.len() <= 1 {
        argv.push("menu".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::error::ErrorKind;

    fn out_args() -> OutputArgs {
        OutputArgs {
            output: None,
            json: None,
            precision: None,
            quiet: false,
        }
    }

    #[test]
    fn bare_invocation_opens_the_menu() {
        assert_eq!(rewrite_args(vec!["dtab".into()]), vec!["dtab", "menu"]);
        assert_eq!(
            rewrite_args(vec!["dtab".into(), "--help".into()]),
            vec!["dtab", "--help"]
        );
    }

    #[test]
    fn settings_fill_unset_flags() {
        let settings = Settings {
            precision: Some(3),
            default_output: PathBuf::from("from_env.csv"),
        };
        let job = pascal_job(PascalArgs { levels: 4, out: out_args() }, &settings);
        assert_eq!(job.output, PathBuf::from("from_env.csv"));
        assert_eq!(job.precision, Some(3));
        assert_eq!(job.levels, Some(4));

        let mut out = out_args();
        out.output = Some(PathBuf::from("flag.csv"));
        out.precision = Some(1);
        let job = pascal_job(PascalArgs { levels: 4, out }, &settings);
        assert_eq!(job.output, PathBuf::from("flag.csv"));
        assert_eq!(job.precision, Some(1));
    }

    #[test]
    fn precision_flag_shields_a_bad_env_value() {
        let cli = crate::cli::Cli::try_parse_from(["dtab", "pascal", "--levels", "3", "--precision", "2"]).unwrap();
        let bad_env = |key: &str| (key == crate::config::PRECISION_VAR).then(|| "lots".to_string());

        let settings = Settings::from_lookup(bad_env, cli.command.precision_flag()).unwrap();
        assert_eq!(settings.precision, Some(2));

        let cli = crate::cli::Cli::try_parse_from(["dtab", "pascal", "--levels", "3"]).unwrap();
        let err = Settings::from_lookup(bad_env, cli.command.precision_flag()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn menu_asks_for_the_file_after_printing_the_table() {
        let path = std::env::temp_dir().join(format!("dtab_app_{}_menu.csv", std::process::id()));
        let script = format!("4\n3\n{}\n", path.display());
        let mut input = io::Cursor::new(script.into_bytes());
        let mut output = Vec::new();

        let job = run_menu(&mut input, &mut output, &Settings::default()).unwrap();
        assert_eq!(job.output, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,1,1\n,1,2\n,,1\n");

        let transcript = String::from_utf8(output).unwrap();
        let table_at = transcript.find("Output:").unwrap();
        let prompt_at = transcript.find("Enter output CSV file name").unwrap();
        assert!(table_at < prompt_at);
        assert!(transcript.ends_with(&format!("Output written to '{}'\n", path.display())));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn menu_failure_before_the_table_never_asks_for_a_file() {
        let mut input = io::Cursor::new(b"1\n1/x\n-1,0,1\nnever.csv\n".to_vec());
        let mut output = Vec::new();

        let err = run_menu(&mut input, &mut output, &Settings::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Evaluation);
        assert!(!String::from_utf8(output).unwrap().contains("file name"));
    }

    #[test]
    fn sample_job_requires_x_values() {
        let args = SampleArgs {
            expression: "x".into(),
            x_values: None,
            x_file: None,
            column: 1,
            out: out_args(),
        };
        let err = sample_job(Operation::Forward, args, &Settings::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn x_values_can_come_from_a_csv_column() {
        let path = std::env::temp_dir().join(format!("dtab_app_{}_xs.csv", std::process::id()));
        fs::write(&path, "0,10\n1,\n2,30\n").unwrap();

        let args = SampleArgs {
            expression: "x".into(),
            x_values: None,
            x_file: Some(path.clone()),
            column: 2,
            out: out_args(),
        };
        let job = sample_job(Operation::Central, args, &Settings::default()).unwrap();
        assert_eq!(job.x_values, vec![10.0, 30.0]);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_x_file_fails_validation() {
        let args = SampleArgs {
            expression: "x".into(),
            x_values: None,
            x_file: Some(PathBuf::from("/definitely/not/here.csv")),
            column: 1,
            out: out_args(),
        };
        let job = sample_job(Operation::Forward, args, &Settings::default()).unwrap();
        assert!(job.x_values.is_empty());
        assert_eq!(job.validate().unwrap_err().kind(), ErrorKind::InvalidInput);
    }
}
