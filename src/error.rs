use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting files to or from base64
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid base64: {0}")]
    Base64Format(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl ConversionError {
    /// Returns the error category, as reported in a failed `ConversionResult`
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::FileNotFound(_) => ErrorKind::FileNotFound,
            ConversionError::Io(_) => ErrorKind::Io,
            ConversionError::Base64Format(_) => ErrorKind::Base64Format,
            ConversionError::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

impl From<base64::DecodeError> for ConversionError {
    fn from(err: base64::DecodeError) -> Self {
        ConversionError::Base64Format(err.to_string())
    }
}

/// Coarse error category, kept on failed results so callers can branch without string matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    FileNotFound,
    Io,
    Base64Format,
    Unknown,
}

pub type Result<T> = std::result::Result<T, ConversionError>;
