//! Background conversion runner
//!
//! Runs the blocking service operations on tokio's blocking pool so an
//! interactive caller can await them without stalling its own thread.

use crate::application::ConversionService;
use crate::application::dto::ConversionResult;
use crate::domain::services::{Base64Codec, FileTypeDetector, SignatureDetector};
use crate::error::{ConversionError, ErrorKind, Result};
use crate::infrastructure::codec::StreamingCodec;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinError;

/// Async facade over a shared `ConversionService`
pub struct BackgroundConverter<C = StreamingCodec, D = SignatureDetector>
where
    C: Base64Codec + 'static,
    D: FileTypeDetector + 'static,
{
    service: Arc<ConversionService<C, D>>,
}

impl<C, D> BackgroundConverter<C, D>
where
    C: Base64Codec + 'static,
    D: FileTypeDetector + 'static,
{
    pub fn new(service: Arc<ConversionService<C, D>>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<ConversionService<C, D>> {
        &self.service
    }

    /// Runs `encode_file` on the blocking pool
    pub async fn encode_file(&self, path: impl Into<PathBuf>) -> ConversionResult {
        let service = Arc::clone(&self.service);
        let path = path.into();
        tokio::task::spawn_blocking(move || service.encode_file(&path))
            .await
            .unwrap_or_else(|e| Self::worker_failed(&e))
    }

    /// Runs `decode_base64_file` on the blocking pool
    pub async fn decode_base64_file(&self, path: impl Into<PathBuf>) -> ConversionResult {
        let service = Arc::clone(&self.service);
        let path = path.into();
        tokio::task::spawn_blocking(move || service.decode_base64_file(&path))
            .await
            .unwrap_or_else(|e| Self::worker_failed(&e))
    }

    /// Runs `get_full_base64` on the blocking pool
    pub async fn get_full_base64(&self, path: impl Into<PathBuf>) -> Result<String> {
        let service = Arc::clone(&self.service);
        let path = path.into();
        tokio::task::spawn_blocking(move || service.get_full_base64(&path))
            .await
            .map_err(|e| ConversionError::Unknown(e.to_string()))?
    }

    fn worker_failed(err: &JoinError) -> ConversionResult {
        tracing::warn!("Background conversion worker failed: {}", err);
        ConversionResult::failure(
            ErrorKind::Unknown,
            format!("Conversion worker stopped unexpectedly: {}", err),
        )
    }
}

impl<C, D> Clone for BackgroundConverter<C, D>
where
    C: Base64Codec + 'static,
    D: FileTypeDetector + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
