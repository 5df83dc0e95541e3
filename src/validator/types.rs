use crate::error::AppError;
use crate::parser::{MissingTokens, TokenMapping};
use std::path::PathBuf;
use thiserror::Error;

/// Inputs that passed every precondition check
#[derive(Debug, Clone)]
pub struct ValidatedInputs {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mapping: TokenMapping,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid source folder: {path}")]
    InvalidSource { path: PathBuf },

    #[error("No destination folder given")]
    EmptyDestination,

    #[error(transparent)]
    MissingTokens(#[from] MissingTokens),

    #[error("Source and destination are the same folder")]
    IdenticalPaths { path: String },
}

impl ValidationError {
    /// User-facing text, shared with the CLI's error output
    pub fn format_error_message(&self) -> String {
        AppError::from(self.clone()).detailed_message()
    }
}
