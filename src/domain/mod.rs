//! Domain layer - Core conversion logic
//!
//! This module contains the domain entities, repository traits and domain
//! services. Nothing here touches the real filesystem directly.

pub mod entities;
pub mod repositories;
pub mod services;
