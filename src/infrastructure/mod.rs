//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories and services.
//! This layer contains all filesystem access.

pub mod codec;
pub mod persistence;
