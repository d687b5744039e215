//! Domain services
//!
//! Core business logic services that operate on domain entities.

mod codec;
mod detector;
mod signature_registry;
pub mod text_sniffer;

pub use codec::{
    Base64Codec, DECODE_ENGINE, EncodePreview, check_structure, encoded_len, is_valid_base64, preview_input_len,
    strip_whitespace,
};
pub use detector::{DETECTION_WINDOW, FileTypeDetector, SignatureDetector};
pub use signature_registry::SignatureRegistry;
