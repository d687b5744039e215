//! Persistence: filesystem stores and the temporary file registry

mod local_file_store;
mod memory_file_store;
mod temporary_file_registry;

pub use local_file_store::LocalFileStore;
// Test and bench double, kept out of the documented API
#[doc(hidden)]
pub use memory_file_store::InMemoryFileStore;
pub use temporary_file_registry::TemporaryFileRegistry;
