//! File signature entity
//!
//! Represents the magic bytes that identify a specific file type, and the
//! (label, extension) pair a detection produces.

use serde::Serialize;
use std::fmt;

/// Extensions a web browser can usually render inline
const BROWSER_VIEWABLE: &[&str] = &[
    "html", "svg", "pdf", "png", "jpg", "gif", "webp", "bmp", "ico", "mp4", "webm", "mp3", "wav",
    "ogg", "txt", "json", "xml",
];

/// The outcome of a file type detection: a human-readable label and an extension (without dot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DetectedType {
    label: &'static str,
    extension: &'static str,
}

impl DetectedType {
    /// Returned when no rule matched
    pub const UNKNOWN: DetectedType = DetectedType::new("Unknown", "bin");
    /// Returned for zero-length content
    pub const EMPTY: DetectedType = DetectedType::new("Empty File", "bin");

    pub const fn new(label: &'static str, extension: &'static str) -> Self {
        Self { label, extension }
    }

    /// Returns the human-readable type label (e.g. "PNG Image")
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the extension to give the file, without the leading dot
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// Whether a browser can preview this type directly
    pub fn is_browser_viewable(&self) -> bool {
        BROWSER_VIEWABLE.contains(&self.extension)
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (.{})", self.label, self.extension)
    }
}

/// How a structural match is turned into a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disambiguation {
    /// The signature alone decides
    Exact,
    /// RIFF container: the form type at bytes 8..12 decides (WebP, AVI, WAV)
    RiffContainer,
    /// ZIP local header: archive content decides between Office formats and plain ZIP
    ZipContainer,
}

/// A file signature: magic bytes expected at a fixed offset
#[derive(Debug, Clone)]
pub struct FileSignature {
    /// The header bytes (magic bytes)
    header: &'static [u8],
    /// Offset from the start where the header should be found (usually 0)
    header_offset: usize,
    /// What a match implies
    detected: DetectedType,
    disambiguation: Disambiguation,
}

impl FileSignature {
    /// Creates a signature expected at offset 0
    pub fn new(header: &'static [u8], label: &'static str, extension: &'static str) -> Self {
        Self {
            header,
            header_offset: 0,
            detected: DetectedType::new(label, extension),
            disambiguation: Disambiguation::Exact,
        }
    }

    /// Moves the signature to a custom header offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.header_offset = offset;
        self
    }

    /// Marks the signature as needing a secondary check before it is trusted
    pub fn with_disambiguation(mut self, disambiguation: Disambiguation) -> Self {
        self.disambiguation = disambiguation;
        self
    }

    /// Returns the header bytes
    pub fn header(&self) -> &'static [u8] {
        self.header
    }

    /// Returns the header offset
    pub fn header_offset(&self) -> usize {
        self.header_offset
    }

    /// Returns the type implied by an exact match
    pub fn detected(&self) -> DetectedType {
        self.detected
    }

    pub fn disambiguation(&self) -> Disambiguation {
        self.disambiguation
    }

    /// Checks whether `data` carries this signature's header at its offset
    pub fn matches_header(&self, data: &[u8]) -> bool {
        let start = self.header_offset;
        let end = start + self.header.len();
        data.get(start..end) == Some(self.header)
    }
}
