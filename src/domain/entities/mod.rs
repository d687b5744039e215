//! Domain entities
//!
//! Core value types of the conversion domain.

mod file_signature;

pub use file_signature::{DetectedType, Disambiguation, FileSignature};
