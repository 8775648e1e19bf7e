//! Command-line parsing for the difference-table tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numeric code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod menu;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dtab", version, about = "Finite-difference and Pascal triangle tables as CSV")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Forward-difference table of an expression sampled at x-values.
    Forward(SampleArgs),
    /// Backward-difference table of an expression sampled at x-values.
    Backward(SampleArgs),
    /// Central differences of an expression sampled at x-values.
    Central(SampleArgs),
    /// Pascal's triangle with the given number of levels.
    Pascal(PascalArgs),
    /// Interactive console menu (the default when no arguments are given).
    Menu,
}

impl Command {
    /// The `--precision` flag, for subcommands that take one.
    pub fn precision_flag(&self) -> Option<usize> {
        match self {
            Command::Forward(args) | Command::Backward(args) | Command::Central(args) => args.out.precision,
            Command::Pascal(args) => args.out.precision,
            Command::Menu => None,
        }
    }
}

/// Options shared by every subcommand that writes a table.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Output CSV file (defaults to $DTAB_OUTPUT or output.csv).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Also write the table with its inputs as JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,

    /// Decimal places for float cells (defaults to $DTAB_PRECISION or shortest form).
    #[arg(long)]
    pub precision: Option<usize>,

    /// Do not print the table to the terminal.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Options for the difference subcommands.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Expression in terms of x, e.g. "x**2 + 3*x + 2".
    #[arg(short = 'e', long = "expr")]
    pub expression: String,

    /// Comma-separated x-values, e.g. "0,1,2,3".
    #[arg(short = 'x', long = "x", value_name = "LIST", conflicts_with = "x_file")]
    pub x_values: Option<String>,

    /// Read x-values from a CSV file instead.
    #[arg(long, value_name = "CSV")]
    pub x_file: Option<PathBuf>,

    /// Column (1-based) of --x-file holding the x-values.
    #[arg(long, default_value_t = 1)]
    pub column: usize,

    #[command(flatten)]
    pub out: OutputArgs,
}

/// Options for the Pascal triangle subcommand.
#[derive(Debug, Args, Clone)]
pub struct PascalArgs {
    /// Number of levels (rows), at least 1.
    #[arg(short = 'n', long)]
    pub levels: usize,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forward_with_inline_x_values() {
        let cli = Cli::try_parse_from(["dtab", "forward", "-e", "x**2", "-x", "0,1,2", "-o", "t.csv"]).unwrap();
        let Command::Forward(args) = cli.command else {
            panic!("expected forward");
        };
        assert_eq!(args.expression, "x**2");
        assert_eq!(args.x_values.as_deref(), Some("0,1,2"));
        assert_eq!(args.out.output, Some(PathBuf::from("t.csv")));
        assert!(!args.out.quiet);
    }

    #[test]
    fn x_list_and_x_file_conflict() {
        let res = Cli::try_parse_from(["dtab", "central", "-e", "x", "-x", "1,2,3", "--x-file", "a.csv"]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_pascal() {
        let cli = Cli::try_parse_from(["dtab", "pascal", "--levels", "5", "--json", "p.json", "-q"]).unwrap();
        let Command::Pascal(args) = cli.command else {
            panic!("expected pascal");
        };
        assert_eq!(args.levels, 5);
        assert_eq!(args.out.json, Some(PathBuf::from("p.json")));
        assert!(args.out.quiet);
    }

    #[test]
    fn precision_flag_is_exposed_per_command() {
        let cli = Cli::try_parse_from(["dtab", "central", "-e", "x", "-x", "1,2,3", "--precision", "3"]).unwrap();
        assert_eq!(cli.command.precision_flag(), Some(3));
        let cli = Cli::try_parse_from(["dtab", "pascal", "-n", "2"]).unwrap();
        assert_eq!(cli.command.precision_flag(), None);
        let cli = Cli::try_parse_from(["dtab", "menu"]).unwrap();
        assert_eq!(cli.command.precision_flag(), None);
    }

    #[test]
    fn pascal_levels_must_be_an_integer() {
        assert!(Cli::try_parse_from(["dtab", "pascal", "--levels", "2.5"]).is_err());
        assert!(Cli::try_parse_from(["dtab", "pascal", "--levels", "-1"]).is_err());
    }
}
