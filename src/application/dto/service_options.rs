//! Service options DTO

use crate::infrastructure::codec::DEFAULT_CHUNK_SIZE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for the conversion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOptions {
    /// Maximum characters of base64 shown by `encode_file`
    pub preview_length: usize,
    /// Directory for decoded and pasted artifacts
    pub temp_dir: PathBuf,
    /// Streaming buffer size
    pub chunk_size: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            preview_length: 100,
            temp_dir: std::env::temp_dir(),
            chunk_size: DEFAULT_CHUNK_SIZE, // 64 KiB
        }
    }
}

impl ServiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the preview length
    pub fn with_preview_length(mut self, length: usize) -> Self {
        self.preview_length = length;
        self
    }

    /// Sets the directory for temporary artifacts
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Sets the chunk size
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }
}
