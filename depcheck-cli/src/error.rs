//! CLI-specific error types and exit code mapping

use depcheck_core::error::DepCheckError;
use depcheck_report::ReportScannerError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Report processing failed, or `--fail-on` matched an issue.
    #[error("scan error: {0}")]
    Scan(String),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                   |
    /// |------|-------------------------------------------|
    /// | 0    | Success                                   |
    /// | 1    | General / command error                   |
    /// | 2    | Configuration error                       |
    /// | 4    | Report could not be processed, or gated   |
    /// | 10   | IO error                                  |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Scan(_) => 4,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<DepCheckError> for CliError {
    fn from(e: DepCheckError) -> Self {
        match e {
            DepCheckError::Config(_) => Self::Config(e.to_string()),
            DepCheckError::Report(_) => Self::Scan(e.to_string()),
            DepCheckError::Io(io) => Self::Io(io),
        }
    }
}

impl From<ReportScannerError> for CliError {
    fn from(e: ReportScannerError) -> Self {
        match e {
            ReportScannerError::Config { .. } => Self::Config(e.to_string()),
            _ => Self::Scan(e.to_string()),
        }
    }
}
