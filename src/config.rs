//! Environment-backed settings.
//!
//! `.env` is loaded by `app::run` before these are read. CLI flags win over
//! anything set here.

use std::path::PathBuf;

use crate::error::AppError;

pub const PRECISION_VAR: &str = "DTAB_PRECISION";
pub const OUTPUT_VAR: &str = "DTAB_OUTPUT";

const DEFAULT_OUTPUT: &str = "output.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Decimal places for float cells; `None` = shortest round-trip form.
    pub precision: Option<usize>,
    /// Output path used when none is given.
    pub default_output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: None,
            default_output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Settings {
    /// Read settings from the environment. `precision_flag` is the CLI value,
    /// if any; when present the environment precision is neither read nor
    /// validated.
    pub fn from_env(precision_flag: Option<usize>) -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok(), precision_flag)
    }

    /// Build settings from an arbitrary variable lookup (tests pass a closure).
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        precision_flag: Option<usize>,
    ) -> Result<Self, AppError> {
        let mut settings = Settings::default();

        if precision_flag.is_some() {
            settings.precision = precision_flag;
        } else if let Some(raw) = lookup(PRECISION_VAR).filter(|v| !v.trim().is_empty()) {
            let precision = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| AppError::invalid_input(format!("Invalid {PRECISION_VAR}: '{raw}'")))?;
            settings.precision = Some(precision);
        }

        if let Some(raw) = lookup(OUTPUT_VAR).filter(|v| !v.trim().is_empty()) {
            settings.default_output = PathBuf::from(raw.trim());
        }

        Ok(settings)
    }
}
