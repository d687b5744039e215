//! b64forge - base64 file conversion with content-based type detection
//!
//! Layout:
//! - `domain`: entities, repository traits and pure services (codec helpers,
//!   signature table, detector)
//! - `infrastructure`: filesystem stores, the streaming codec and the
//!   temporary file registry
//! - `application`: the conversion service and its async runner
//! - `presentation`: the command-line interface

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod utils;

pub use application::dto::{ConversionResult, ServiceOptions};
pub use application::{BackgroundConverter, ConversionService};
pub use domain::entities::DetectedType;
pub use error::{ConversionError, ErrorKind};
pub use utils::format_file_size;
