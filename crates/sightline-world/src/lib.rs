//! Chunk generation, visibility graphs and portal culling for Sightline.

pub mod chunk;
pub mod culling;
pub mod generation;
pub mod grid;
pub mod occupancy;
pub mod visibility;

pub use chunk::Chunk;
pub use culling::{CullReport, PortalCuller, Traversal};
pub use generation::{generate_occupancy, generate_occupancy_parallel, HeightField, NoiseHeightField};
pub use grid::ChunkGrid;
pub use occupancy::Occupancy;
pub use visibility::{flood_regions, EmptyRegion, VisibilityGraph};
