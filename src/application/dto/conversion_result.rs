//! Conversion result DTO

use crate::domain::entities::DetectedType;
use crate::error::{ConversionError, ErrorKind};
use crate::utils::format_file_size;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of one encode or decode call
///
/// Either a success carrying sizes (and a preview or an artifact), or a
/// failure carrying a non-empty message. Built only through the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
    original_size: u64,
    converted_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temporary_file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_type: Option<DetectedType>,
}

impl ConversionResult {
    /// Successful encode: `converted_size` is the full base64 length
    pub fn encoded(original_size: u64, converted_size: u64, preview: String) -> Self {
        Self {
            success: true,
            error_message: None,
            error_kind: None,
            original_size,
            converted_size,
            preview: Some(preview),
            temporary_file_path: None,
            file_type: None,
        }
    }

    /// Successful decode into `artifact`
    pub fn decoded(
        original_size: u64,
        converted_size: u64,
        artifact: PathBuf,
        file_type: DetectedType,
    ) -> Self {
        Self {
            success: true,
            error_message: None,
            error_kind: None,
            original_size,
            converted_size,
            preview: None,
            temporary_file_path: Some(artifact),
            file_type: Some(file_type),
        }
    }

    /// Failed call; an empty message is replaced by the error kind's name
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = format!("{:?}", kind);
        }
        Self {
            success: false,
            error_message: Some(message),
            error_kind: Some(kind),
            original_size: 0,
            converted_size: 0,
            preview: None,
            temporary_file_path: None,
            file_type: None,
        }
    }

    /// Failed call with `context` prefixed to the error's own message
    pub fn from_error(context: &str, err: &ConversionError) -> Self {
        Self::failure(err.kind(), format!("{}{}", context, err))
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// Source size in bytes
    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    /// Characters for an encode, bytes for a decode
    pub fn converted_size(&self) -> u64 {
        self.converted_size
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn temporary_file_path(&self) -> Option<&Path> {
        self.temporary_file_path.as_deref()
    }

    pub fn detected(&self) -> Option<DetectedType> {
        self.file_type
    }

    pub fn file_type(&self) -> Option<&'static str> {
        self.file_type.map(|t| t.label())
    }

    pub fn file_extension(&self) -> Option<&'static str> {
        self.file_type.map(|t| t.extension())
    }

    /// Returns a one-line human-readable summary
    pub fn summary(&self) -> String {
        if !self.success {
            return format!("Failed: {}", self.error_message().unwrap_or_default());
        }
        match self.file_type {
            Some(detected) => format!(
                "Decoded {} of base64 into {} ({})",
                format_file_size(self.original_size),
                format_file_size(self.converted_size),
                detected
            ),
            None => format!(
                "Encoded {} into {} base64 characters",
                format_file_size(self.original_size),
                self.converted_size
            ),
        }
    }
}
