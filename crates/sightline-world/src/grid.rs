//! Rectangular grid of chunks.

use std::time::Instant;

use hashbrown::HashMap;
use rayon::prelude::*;
use sightline_core::coords::ChunkPos;
use sightline_core::{Error, Result, Viewer, WorldConfig};
use tracing::{info, trace};

use crate::chunk::Chunk;
use crate::generation::HeightField;
use crate::occupancy::Occupancy;

/// All chunks covering `[0, width) x [0, height)` in chunk coordinates.
#[derive(Clone, Debug)]
pub struct ChunkGrid {
    width: u32,
    height: u32,
    depth: u32,
    chunks: HashMap<ChunkPos, Chunk>,
}

impl ChunkGrid {
    /// Generate every chunk of the configured grid in parallel.
    pub fn generate<H>(config: &WorldConfig, field: &H) -> Result<Self>
    where
        H: HeightField + ?Sized,
    {
        config.validate()?;
        let start = Instant::now();
        let positions = grid_positions(config.grid_width, config.grid_height);

        let chunks: HashMap<ChunkPos, Chunk> = positions
            .par_iter()
            .map(|&pos| (pos, Chunk::generate(field, pos, config.depth)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        let grid = Self {
            width: config.grid_width,
            height: config.grid_height,
            depth: config.depth,
            chunks,
        };

        info!(
            "Generated {}x{} chunks of depth {} in {:.2?} ({} solid blocks)",
            grid.width,
            grid.height,
            grid.depth,
            start.elapsed(),
            grid.iter().map(|c| c.occupancy().solid_count()).sum::<usize>()
        );
        Ok(grid)
    }

    /// Build a grid from a per-chunk occupancy function.
    pub fn from_fn(
        width: u32,
        height: u32,
        depth: u32,
        mut occupancy: impl FnMut(ChunkPos) -> Occupancy,
    ) -> Result<Self> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid {width}x{height} of depth {depth} must be non-empty"
            )));
        }
        let mut grid = Self {
            width,
            height,
            depth,
            chunks: HashMap::with_capacity(width as usize * height as usize),
        };
        for pos in grid_positions(width, height) {
            grid.insert(Chunk::new(pos, occupancy(pos)))?;
        }
        Ok(grid)
    }

    /// Insert or replace a chunk.
    ///
    /// Fails if the chunk lies outside the grid or has a different depth.
    pub fn insert(&mut self, chunk: Chunk) -> Result<()> {
        if !self.contains(chunk.pos) {
            return Err(Error::OutOfBounds(format!(
                "chunk {} outside {}x{} grid",
                chunk.pos, self.width, self.height
            )));
        }
        if chunk.occupancy().depth() != self.depth {
            return Err(Error::InvalidData(format!(
                "chunk {} has depth {}, grid depth is {}",
                chunk.pos,
                chunk.occupancy().depth(),
                self.depth
            )));
        }
        trace!(
            "Inserted chunk {} with {} visibility edges",
            chunk.pos,
            chunk.visibility().edge_count()
        );
        self.chunks.insert(chunk.pos, chunk);
        Ok(())
    }

    /// Grid width in chunks.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in chunks.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Chunk side length in blocks.
    #[inline]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether a position lies inside the grid bounds.
    #[inline]
    pub fn contains(&self, pos: ChunkPos) -> bool {
        (0..self.width as i64).contains(&i64::from(pos.x))
            && (0..self.height as i64).contains(&i64::from(pos.y))
    }

    /// Get the chunk at a position.
    pub fn get(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub(crate) fn get_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the grid holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All positions, row by row.
    pub fn positions(&self) -> Vec<ChunkPos> {
        let mut positions: Vec<_> = self.chunks.keys().copied().collect();
        positions.sort_unstable_by_key(|pos| (pos.y, pos.x));
        positions
    }

    /// All chunks, row by row.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.positions()
            .into_iter()
            .filter_map(move |pos| self.get(pos))
    }

    /// Chunk containing the viewer, given the world units per block.
    pub fn viewer_chunk(&self, viewer: &Viewer, block_size: f32) -> ChunkPos {
        viewer.chunk(self.depth as f32 * block_size)
    }

    /// Mark every chunk hidden.
    pub fn reset_traversal(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.set_traversal_order(None);
        }
    }

    /// Number of chunks tagged visible by the last cull.
    pub fn visible_count(&self) -> usize {
        self.chunks.values().filter(|c| c.is_visible()).count()
    }
}

fn grid_positions(width: u32, height: u32) -> Vec<ChunkPos> {
    (0..height as i32)
        .flat_map(|y| (0..width as i32).map(move |x| ChunkPos::new(x, y)))
        .collect()
}
