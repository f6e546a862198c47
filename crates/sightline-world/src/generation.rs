//! Procedural chunk generation.

use noise::{NoiseFn, Simplex};
use rayon::prelude::*;
use sightline_core::constants::SOLID_CUTOFF;
use sightline_core::coords::{BlockPos, ChunkPos};
use sightline_core::WorldConfig;

use crate::occupancy::Occupancy;

/// Source of terrain solidity for global block coordinates.
///
/// A block is solid when `height_at + threshold_at` falls below
/// [`SOLID_CUTOFF`]. Implementations must be deterministic.
pub trait HeightField: Send + Sync {
    /// Height value at a global block coordinate.
    fn height_at(&self, x: i64, y: i64) -> f64;

    /// Additive bias applied before the solidity test.
    fn threshold_at(&self, _x: i64, _y: i64) -> f64 {
        0.0
    }

    /// Whether the block at a global coordinate is solid.
    fn is_solid(&self, x: i64, y: i64) -> bool {
        self.height_at(x, y) + self.threshold_at(x, y) < SOLID_CUTOFF
    }
}

impl<F> HeightField for F
where
    F: Fn(i64, i64) -> f64 + Send + Sync,
{
    fn height_at(&self, x: i64, y: i64) -> f64 {
        self(x, y)
    }
}

/// Simplex-noise terrain with an open band above the surface rows.
pub struct NoiseHeightField {
    noise: Simplex,
    amplitude: (f64, f64),
}

impl NoiseHeightField {
    /// Rows below this receive the surface bias.
    pub const SURFACE_ROWS: i64 = 100;
    /// Bias numerator; row `y` gets `SURFACE_BIAS / (y + 1)`.
    pub const SURFACE_BIAS: f64 = 30.0;

    /// Create a height field with the given seed and per-axis sampling scale.
    pub fn new(seed: u32, amplitude: (f64, f64)) -> Self {
        Self {
            noise: Simplex::new(seed),
            amplitude,
        }
    }

    /// Create a height field from the world configuration.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.seed, config.noise_amplitude)
    }
}

impl HeightField for NoiseHeightField {
    fn height_at(&self, x: i64, y: i64) -> f64 {
        self.noise
            .get([x as f64 * self.amplitude.0, y as f64 * self.amplitude.1])
    }

    fn threshold_at(&self, _x: i64, y: i64) -> f64 {
        if (0..Self::SURFACE_ROWS).contains(&y) {
            Self::SURFACE_BIAS / (y + 1) as f64
        } else {
            0.0
        }
    }
}

/// Derive a chunk's occupancy from a height field.
pub fn generate_occupancy<H>(field: &H, pos: ChunkPos, depth: u32) -> Occupancy
where
    H: HeightField + ?Sized,
{
    Occupancy::from_fn(depth, |local| {
        let block = BlockPos::from_chunk_local(pos, local, depth);
        field.is_solid(block.x, block.y)
    })
}

/// Generate occupancy for many chunks in parallel.
///
/// Results are returned in the order of `positions`.
pub fn generate_occupancy_parallel<H>(
    field: &H,
    positions: &[ChunkPos],
    depth: u32,
) -> Vec<(ChunkPos, Occupancy)>
where
    H: HeightField + ?Sized,
{
    positions
        .par_iter()
        .map(|&pos| (pos, generate_occupancy(field, pos, depth)))
        .collect()
}
