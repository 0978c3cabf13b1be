//! Evergreen Core - Foundational types for the Evergreen card engine
//!
//! This crate provides the core types that all other Evergreen crates depend on:
//! - `ElementId` - Stable per-session element identifiers
//! - `Vec3` - Spatial vector used for positions, directions and Euler rotations
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{EvergreenError, Result};
pub use id::ElementId;
pub use types::Vec3;
