use std::io;
use thiserror::Error;

use crate::domain::DomainError;
use crate::io::IoError;

/// Top-level application errors unifying all layer errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] IoError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
