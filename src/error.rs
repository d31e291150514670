//! Error types for the Cellgraph command line

use thiserror::Error;

/// Errors in command-line arguments
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid assignment '{0}': expected CELL=CONTENT")]
    InvalidAssignment(String),

    #[error("--save requires a FILE argument")]
    NoFilePath,
}
