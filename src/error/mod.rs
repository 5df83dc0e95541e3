mod codes;

pub use codes::ExitCode;

use crate::parser::MissingTokens;
use crate::scanner::ScannerError;
use crate::validator::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid source folder: {path}")]
    InvalidSource { path: PathBuf },

    #[error("No destination folder given")]
    EmptyDestination,

    #[error("{}", .0.format_error_message())]
    MissingTokens(MissingTokens),

    #[error("Source and destination are the same folder: {path}")]
    IdenticalPaths { path: String },

    #[error("No versioned scene files found under {root}")]
    NoCandidates { root: PathBuf },

    #[error("Could not determine the latest version")]
    NoLatest,

    #[error("Latest file name is not versioned: {file_name}")]
    UnparseableLatest { file_name: String },

    #[error("Failed to create directory {path}")]
    CreateDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::InvalidSource { .. } => ExitCode::InvalidSource,
            AppError::EmptyDestination => ExitCode::InvalidArguments,
            AppError::MissingTokens(_) => ExitCode::MissingTokens,
            AppError::IdenticalPaths { .. } => ExitCode::IdenticalPaths,
            AppError::NoCandidates { .. } => ExitCode::NoCandidates,
            AppError::NoLatest => ExitCode::UnparseableLatest,
            AppError::UnparseableLatest { .. } => ExitCode::UnparseableLatest,
            AppError::CreateDirError { .. } => ExitCode::DirectoryCreateError,
            AppError::ReadError { .. } => ExitCode::ReadError,
            AppError::WriteError { .. } => ExitCode::WriteError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::InvalidSource { .. } => {
                String::from("Please choose a valid Source Shot folder.")
            }

            AppError::EmptyDestination => String::from("Please choose a Destination Shot folder."),

            AppError::MissingTokens(missing) => missing.format_error_message(),

            AppError::IdenticalPaths { .. } => {
                String::from("Source and Destination folders must differ.")
            }

            AppError::NoCandidates { .. } => String::from(
                "No Maya ASCII files matching '*_v###.ma' found under source folder.",
            ),

            AppError::NoLatest => String::from("Could not determine the latest-version .ma file."),

            AppError::UnparseableLatest { file_name } => {
                format!(
                    "Latest .ma filename does not match pattern '*_v###.ma':\n  {}",
                    file_name
                )
            }

            AppError::CreateDirError { source, .. } => {
                format!("Could not create Destination folder:\n{}", source)
            }

            AppError::ReadError { path, source } => {
                format!(
                    "Failed to read source .ma:\n{}\n{}",
                    path.display(),
                    source
                )
            }

            AppError::WriteError { path, source } => {
                format!("Failed to write new .ma:\n{}\n{}", path.display(), source)
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidSource { path } => AppError::InvalidSource { path },
            ValidationError::EmptyDestination => AppError::EmptyDestination,
            ValidationError::MissingTokens(missing) => AppError::MissingTokens(missing),
            ValidationError::IdenticalPaths { path } => AppError::IdenticalPaths { path },
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::InvalidSource { path },
            ScannerError::NotADirectory(path) => AppError::InvalidSource { path },
            // The scanner only fails on the source folder itself
            ScannerError::PermissionDenied(path) => AppError::InvalidSource { path },
            ScannerError::IoError { path, .. } => AppError::InvalidSource { path },
        }
    }
}
