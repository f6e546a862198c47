//! Core types, geometry and configuration for the Sightline chunk culler.
//!
//! This crate provides the foundational types used by the world crate:
//! - Chunk sides, their normals and side sets
//! - Coordinate systems (world blocks, chunks, chunk-local blocks)
//! - Viewer state and world configuration
//! - Common error types

pub mod config;
pub mod coords;
pub mod error;
pub mod side;
pub mod viewer;

pub use config::WorldConfig;
pub use coords::{BlockPos, ChunkPos, LocalPos};
pub use error::{Error, Result};
pub use side::{Side, SideSet};
pub use viewer::Viewer;

/// Engine-wide constants
pub mod constants {
    /// Default chunk side length in blocks
    pub const DEFAULT_CHUNK_DEPTH: u32 = 20;
    /// Default world units per block
    pub const DEFAULT_BLOCK_SIZE: f32 = 5.0;
    /// A cell is solid when height plus threshold falls below this value
    pub const SOLID_CUTOFF: f64 = 0.5;
    /// Faces whose normal dot the facing exceeds this are not expanded
    pub const DEFAULT_FORWARD_BIAS: f32 = 0.2;
}
