//! World configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BLOCK_SIZE, DEFAULT_CHUNK_DEPTH, DEFAULT_FORWARD_BIAS};
use crate::error::{Error, Result};

/// Parameters shared by generation and culling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Chunk side length in blocks.
    pub depth: u32,
    /// Number of chunk columns.
    pub grid_width: u32,
    /// Number of chunk rows.
    pub grid_height: u32,
    /// World units per block.
    pub block_size: f32,
    /// Seed for the default noise height field.
    pub seed: u32,
    /// Per-axis noise sampling scale.
    pub noise_amplitude: (f64, f64),
    /// Direction filter threshold for the cull.
    pub forward_bias: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_CHUNK_DEPTH,
            grid_width: 8,
            grid_height: 8,
            block_size: DEFAULT_BLOCK_SIZE,
            seed: 36,
            noise_amplitude: (0.035, 0.07),
            forward_bias: DEFAULT_FORWARD_BIAS,
        }
    }
}

impl WorldConfig {
    /// Set the chunk depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the grid dimensions in chunks.
    #[must_use]
    pub fn with_grid(mut self, width: u32, height: u32) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Set the world units per block.
    #[must_use]
    pub fn with_block_size(mut self, block_size: f32) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the noise seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the direction filter threshold.
    #[must_use]
    pub fn with_forward_bias(mut self, forward_bias: f32) -> Self {
        self.forward_bias = forward_bias;
        self
    }

    /// Reject configurations the generator and culler cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::InvalidConfig("chunk depth must be positive".into()));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if !(self.block_size.is_finite() && self.block_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "block size must be positive, got {}",
                self.block_size
            )));
        }
        if !self.forward_bias.is_finite() {
            return Err(Error::InvalidConfig("forward bias must be finite".into()));
        }
        Ok(())
    }

    /// World extent of one chunk along each axis.
    #[inline]
    pub fn chunk_extent(&self) -> f32 {
        self.depth as f32 * self.block_size
    }

    /// Total number of chunks in the grid.
    #[inline]
    pub const fn chunk_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_matches_demo_world() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.chunk_extent(), 100.0);
        assert_eq!(config.chunk_count(), 64);
    }

    #[test]
    fn zero_depth_rejected() {
        let config = WorldConfig::default().with_depth(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn zero_grid_rejected() {
        assert!(WorldConfig::default().with_grid(0, 4).validate().is_err());
        assert!(WorldConfig::default().with_grid(4, 0).validate().is_err());
    }

    #[test]
    fn bad_block_size_rejected() {
        assert!(WorldConfig::default().with_block_size(0.0).validate().is_err());
        assert!(WorldConfig::default()
            .with_block_size(f32::NAN)
            .validate()
            .is_err());
    }
}
