//! Application error type.
//!
//! Every failure that can reach the user is an `AppError`: a message, a coarse
//! `ErrorKind` for callers that need to branch, and the process exit code.

/// Coarse error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input file does not exist.
    FileNotFound,
    /// Malformed expression, bad x-values, bad level count, bad menu choice.
    InvalidInput,
    /// Attempt to serialize a table with zero rows.
    EmptyTable,
    /// Expression undefined at a sample point.
    Evaluation,
    /// Any other filesystem / terminal failure.
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidInput => 2,
            ErrorKind::FileNotFound => 3,
            ErrorKind::EmptyTable => 4,
            ErrorKind::Evaluation => 5,
            ErrorKind::Io => 6,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn file_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileNotFound, message)
    }

    pub fn empty_table(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyTable, message)
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Evaluation, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let kinds = [
            ErrorKind::FileNotFound,
            ErrorKind::InvalidInput,
            ErrorKind::EmptyTable,
            ErrorKind::Evaluation,
            ErrorKind::Io,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| k.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::invalid_input("Invalid choice!");
        assert_eq!(err.to_string(), "Invalid choice!");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.exit_code(), 2);
    }
}
