/*!
 * Error types for the psalter application.
 *
 * This module contains custom error types for the I/O collaborators around
 * the compiler, using the thiserror crate for ergonomic error definitions.
 * The compiler itself is total and has no error type.
 */

use thiserror::Error;

/// Errors that can occur when reading fragment files
#[derive(Error, Debug)]
pub enum FragmentError {
    /// Category key not in the fixed category list
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Error reading a fragment file or directory
    #[error("Failed to read {path}: {message}")]
    Read {
        /// Path that could not be read
        path: String,
        /// Underlying error message
        message: String,
    },
}

/// Errors that can occur when saving or loading projects and body files
#[derive(Error, Debug)]
pub enum ExportError {
    /// Error from the CSV reader or writer
    #[error("CSV error: {0}")]
    Csv(String),

    /// Error writing the output file
    #[error("I/O error: {0}")]
    Io(String),

    /// Nothing to export
    #[error("Project is empty, nothing to export")]
    EmptyProject,
}

/// Errors that can occur when running the external typesetting engine
#[derive(Error, Debug)]
pub enum TypesetError {
    /// Companion files required by the main document are absent
    #[error("Missing required files: {}", .0.join(", "))]
    MissingResources(Vec<String>),

    /// The engine process could not be started
    #[error("Failed to start typesetting engine: {0}")]
    Spawn(String),

    /// The engine exited with a non-zero status
    #[error("Typesetting engine failed with status {}", describe_status(.status))]
    ProcessFailed {
        /// Exit code, if the process exited normally
        status: Option<i32>,
        /// Captured process output
        log: String,
    },

    /// The engine succeeded but the expected output is missing
    #[error("Typesetting finished but {path} was not produced")]
    MissingArtifact {
        /// Expected output path
        path: String,
        /// Captured process output
        log: String,
    },

    /// The engine did not finish in time
    #[error("Typesetting engine timed out after {secs} seconds")]
    TimedOut {
        /// Configured timeout
        secs: u64,
    },
}

impl TypesetError {
    /// The captured process log, when the engine got far enough to produce one
    pub fn log(&self) -> Option<&str> {
        match self {
            Self::ProcessFailed { log, .. } | Self::MissingArtifact { log, .. } => Some(log),
            _ => None,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "unknown (terminated by signal)".to_string(),
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from fragment loading
    #[error("Fragment error: {0}")]
    Fragment(#[from] FragmentError),

    /// Error from project export
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Error from the typesetting engine
    #[error("Typeset error: {0}")]
    Typeset(#[from] TypesetError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(error: csv::Error) -> Self {
        Self::Csv(error.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}
