//! Base64 codec implementations

mod streaming_codec;

pub use streaming_codec::{DEFAULT_CHUNK_SIZE, StreamingCodec};
