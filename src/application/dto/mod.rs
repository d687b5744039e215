//! Data Transfer Objects

mod conversion_result;
mod service_options;

pub use conversion_result::ConversionResult;
pub use service_options::ServiceOptions;
