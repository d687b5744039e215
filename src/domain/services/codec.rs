//! Base64 codec trait
//!
//! Defines the interface for converting between binary files and standard
//! (RFC 4648) base64 text, plus the pure helpers every codec shares.

use crate::error::{ConversionError, Result};
use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use std::path::Path;

/// Standard alphabet and padding for decoding
///
/// Non-zero trailing bits in the final symbol are discarded instead of
/// rejected, so `QR==` decodes to `A`.
pub const DECODE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// A bounded prefix of a file's base64 text plus the exact length of the full text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodePreview {
    /// At most `preview_limit` characters of base64
    pub text: String,
    /// Length of the complete base64 text for the whole file
    pub total_length: u64,
}

/// Trait for streaming base64 conversion of files
///
/// Implementations must never require the whole file in memory to build a
/// preview; only `encode_full` materialises the complete text.
pub trait Base64Codec: Send + Sync {
    /// Encodes just enough of the file to fill `preview_limit` characters
    ///
    /// The total length comes from the file size, not from encoding the file.
    fn encode_preview(&self, path: &Path, preview_limit: usize) -> Result<EncodePreview>;

    /// Encodes the whole file and returns the complete text
    fn encode_full(&self, path: &Path) -> Result<String>;

    /// Decodes `source_text` into a new file at `destination`
    ///
    /// Whitespace is ignored. Returns the number of bytes written.
    fn decode_to_file(&self, source_text: &str, destination: &Path) -> Result<u64>;

    /// Cheap structural validity check, see [`is_valid_base64`]
    fn is_valid_base64(&self, text: &str) -> bool {
        is_valid_base64(text)
    }
}

/// Exact base64 length for `input_len` bytes: `ceil(n / 3) * 4`
pub fn encoded_len(input_len: u64) -> u64 {
    input_len.div_ceil(3) * 4
}

/// Number of input bytes whose encoding covers `preview_limit` characters
///
/// Rounded up to whole 3-byte groups so the preview is never short.
pub fn preview_input_len(preview_limit: usize) -> usize {
    preview_limit.div_ceil(4) * 3
}

fn is_alphabet(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

/// Removes a leading byte order mark and every whitespace character
pub fn strip_whitespace(text: &str) -> String {
    text.strip_prefix('\u{feff}')
        .unwrap_or(text)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Equivalent to matching `^[A-Za-z0-9+/]*={0,2}$`
fn matches_alphabet_pattern(cleaned: &str) -> bool {
    let body = cleaned.trim_end_matches('=');
    cleaned.len() - body.len() <= 2 && body.chars().all(is_alphabet)
}

/// Best-effort check that `text` looks like standard base64
///
/// Strips whitespace, checks the alphabet and at most two trailing `=`,
/// requires a length divisible by 4, then decodes only the first 4-character
/// block (padded with `A` when shorter) with [`DECODE_ENGINE`].
pub fn is_valid_base64(text: &str) -> bool {
    let cleaned = strip_whitespace(text);

    if !matches_alphabet_pattern(&cleaned) || cleaned.len() % 4 != 0 {
        return false;
    }

    let mut head: String = cleaned.chars().take(4).collect();
    while head.len() < 4 {
        head.push('A');
    }
    DECODE_ENGINE.decode(head).is_ok()
}

/// Full structural validation of whitespace-free base64, run before decoding
pub fn check_structure(cleaned: &str) -> Result<()> {
    if let Some((position, c)) = cleaned
        .char_indices()
        .find(|&(_, c)| !is_alphabet(c) && c != '=')
    {
        return Err(ConversionError::Base64Format(format!(
            "invalid character {:?} at position {}",
            c, position
        )));
    }

    if cleaned.len() % 4 != 0 {
        return Err(ConversionError::Base64Format(format!(
            "length {} is not a multiple of 4",
            cleaned.len()
        )));
    }

    if let Some(first_pad) = cleaned.find('=') {
        let padding = &cleaned[first_pad..];
        if padding.len() > 2 || padding.bytes().any(|b| b != b'=') {
            return Err(ConversionError::Base64Format(
                "padding is only allowed as the last one or two characters".to_string(),
            ));
        }
    }

    Ok(())
}
