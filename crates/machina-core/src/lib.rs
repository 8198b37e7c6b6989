//! Machina Core - Foundational types for the Machina viewer
//!
//! This crate provides the core types that all other Machina crates depend on:
//! - `NodeId` - Stable scene-node identifiers
//! - `Transform`, `Vec3`, `Color` - Spatial types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{MachinaError, Result};
pub use id::NodeId;
pub use types::{mat4_mul, Color, Transform, Vec3};
