//! Streaming base64 codec
//!
//! Moves data between a `FileStore` and base64 text in fixed-size chunks.
//! Previews read only the bytes they encode; full encodes and decodes stream
//! through the `base64` crate's reader/writer adapters.

use crate::domain::repositories::FileStore;
use crate::domain::services::{
    Base64Codec, DECODE_ENGINE, EncodePreview, check_structure, encoded_len, preview_input_len,
    strip_whitespace,
};
use crate::error::{ConversionError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use base64::read::DecoderReader;
use base64::write::EncoderStringWriter;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

/// Default size of the streaming buffer
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Base64 codec over a file store
#[derive(Clone)]
pub struct StreamingCodec {
    store: Arc<dyn FileStore>,
    chunk_size: usize,
}

impl StreamingCodec {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets the streaming buffer size (minimum 1 KiB)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1024);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn remove_partial(&self, path: &Path) {
        if self.store.exists(path) {
            if let Err(e) = self.store.remove(path) {
                tracing::warn!("Failed to remove partial output {}: {}", path.display(), e);
            }
        }
    }

    /// Copies decoded bytes from `reader` to `destination`
    ///
    /// Read errors can only come from malformed input, write errors are I/O.
    fn stream_decoded<R: Read>(&self, mut reader: R, destination: &Path) -> Result<u64> {
        let mut writer = BufWriter::with_capacity(self.chunk_size, self.store.create(destination)?);
        let mut buf = vec![0u8; self.chunk_size];
        let mut written = 0u64;

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ConversionError::Base64Format(e.to_string())),
            };
            writer.write_all(&buf[..n])?;
            written += n as u64;
        }

        writer.flush()?;
        Ok(written)
    }
}

impl Base64Codec for StreamingCodec {
    fn encode_preview(&self, path: &Path, preview_limit: usize) -> Result<EncodePreview> {
        let total_length = encoded_len(self.store.file_size(path)?);

        let wanted = preview_input_len(preview_limit);
        let mut head = Vec::with_capacity(wanted);
        self.store
            .open_read(path)?
            .take(wanted as u64)
            .read_to_end(&mut head)?;

        let mut text = STANDARD.encode(&head);
        text.truncate(preview_limit);

        Ok(EncodePreview { text, total_length })
    }

    fn encode_full(&self, path: &Path) -> Result<String> {
        let mut source = self.store.open_read(path)?;
        let mut encoder = EncoderStringWriter::new(&STANDARD);
        let mut buf = vec![0u8; self.chunk_size];

        loop {
            let n = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            encoder.write_all(&buf[..n])?;
        }

        Ok(encoder.into_inner())
    }

    fn decode_to_file(&self, source_text: &str, destination: &Path) -> Result<u64> {
        let cleaned = strip_whitespace(source_text);
        check_structure(&cleaned)?;

        let reader = DecoderReader::new(cleaned.as_bytes(), &DECODE_ENGINE);
        match self.stream_decoded(reader, destination) {
            Ok(written) => Ok(written),
            Err(e) => {
                self.remove_partial(destination);
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for StreamingCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingCodec")
            .field("chunk_size", &self.chunk_size)
            .finish_non_exhaustive()
    }
}
