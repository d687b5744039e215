//! Application layer
//!
//! Services that orchestrate domain logic into file-level conversions.

mod background;
mod conversion_service;
pub mod dto;

pub use background::BackgroundConverter;
pub use conversion_service::{ConversionService, MISSING_FILE_MESSAGE, TRUNCATED_SUFFIX};
