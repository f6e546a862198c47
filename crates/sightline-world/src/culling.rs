//! Portal culling over the chunk grid.
//!
//! Starting from the viewer's chunk, a breadth-first search crosses into a
//! neighbor only when the face faces roughly away from the viewer's forward
//! direction and, past the first chunk, when the current chunk's visibility
//! graph joins the face it was entered through to the face being exited.
//! Chunks are tagged with the order in which the search first reached them.

use std::collections::VecDeque;

use glam::Vec2;
use hashbrown::HashSet;
use sightline_core::coords::ChunkPos;
use sightline_core::side::{Side, SideSet};
use sightline_core::constants::{DEFAULT_BLOCK_SIZE, DEFAULT_FORWARD_BIAS};
use sightline_core::{Error, Result, Viewer, WorldConfig};
use tracing::{debug, trace, warn};

use crate::grid::ChunkGrid;

/// One pending step of the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierEntry {
    /// Face the chunk was entered through; `None` for the viewer's chunk.
    entered_through: Option<Side>,
    pos: ChunkPos,
    /// Every exit side taken along the path to this chunk.
    constraints: SideSet,
}

/// Result of a read-only traversal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Chunks in order of first discovery.
    pub order: Vec<ChunkPos>,
    /// Number of frontier entries processed.
    pub iterations: usize,
}

/// Summary of a cull.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CullReport {
    /// Chunks tagged visible.
    pub visited: usize,
    /// Chunks in the grid.
    pub total: usize,
    /// Number of frontier entries processed.
    pub iterations: usize,
}

impl CullReport {
    /// Fraction of the grid left hidden.
    pub fn culled_fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        1.0 - self.visited as f32 / self.total as f32
    }
}

/// Visibility-graph chunk culler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalCuller {
    forward_bias: f32,
    block_size: f32,
}

impl PortalCuller {
    /// Create a culler with explicit policy values.
    ///
    /// `block_size` must be positive and finite, `forward_bias` finite.
    pub fn new(forward_bias: f32, block_size: f32) -> Result<Self> {
        if !(block_size.is_finite() && block_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "block size must be positive, got {block_size}"
            )));
        }
        if !forward_bias.is_finite() {
            return Err(Error::InvalidConfig("forward bias must be finite".into()));
        }
        Ok(Self {
            forward_bias,
            block_size,
        })
    }

    /// Create a culler from the world configuration.
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        Self::new(config.forward_bias, config.block_size)
    }

    /// Faces with `dot(facing, normal) > forward_bias` are not crossed.
    #[inline]
    pub const fn forward_bias(&self) -> f32 {
        self.forward_bias
    }

    /// World units per block, for locating the viewer's chunk.
    #[inline]
    pub const fn block_size(&self) -> f32 {
        self.block_size
    }

    /// Breadth-first search from `start`, without touching chunk tags.
    ///
    /// A start outside the grid discovers nothing.
    pub fn traverse(&self, grid: &ChunkGrid, start: ChunkPos, facing: Vec2) -> Traversal {
        let mut traversal = Traversal::default();
        if !grid.contains(start) {
            return traversal;
        }

        let mut discovered: HashSet<ChunkPos> = HashSet::new();
        let mut crossed: HashSet<(Side, ChunkPos)> = HashSet::new();
        let mut queue = VecDeque::from([FrontierEntry {
            entered_through: None,
            pos: start,
            constraints: SideSet::empty(),
        }]);

        while let Some(entry) = queue.pop_front() {
            traversal.iterations += 1;
            if discovered.insert(entry.pos) {
                traversal.order.push(entry.pos);
            }
            let Some(chunk) = grid.get(entry.pos) else {
                continue;
            };

            for (exit, next) in entry.pos.neighbors() {
                // Never turn back against a direction already taken on this path.
                if entry.constraints.has(exit.opposite()) {
                    continue;
                }
                if !crossed.insert((exit, next)) {
                    continue;
                }
                if !grid.contains(next) {
                    continue;
                }
                if facing.dot(exit.normal()) > self.forward_bias {
                    continue;
                }
                if let Some(entered) = entry.entered_through {
                    if !chunk.visibility().can_reach(entered, exit) {
                        continue;
                    }
                }

                trace!("Crossing {:?} from {} into {}", exit, entry.pos, next);
                queue.push_back(FrontierEntry {
                    entered_through: Some(exit.opposite()),
                    pos: next,
                    constraints: entry.constraints.with(exit),
                });
            }
        }

        traversal
    }

    /// Reset every tag, then tag the chunks reachable from the viewer.
    pub fn cull(&self, grid: &mut ChunkGrid, viewer: &Viewer) -> CullReport {
        grid.reset_traversal();

        let start = grid.viewer_chunk(viewer, self.block_size);
        if !grid.contains(start) {
            warn!(
                "Viewer at {} maps to chunk {} outside the {}x{} grid",
                viewer.position,
                start,
                grid.width(),
                grid.height()
            );
        }

        let traversal = self.traverse(grid, start, viewer.facing());
        for (order, pos) in traversal.order.iter().enumerate() {
            if let Some(chunk) = grid.get_mut(*pos) {
                chunk.set_traversal_order(Some(order));
            }
        }

        let report = CullReport {
            visited: traversal.order.len(),
            total: grid.len(),
            iterations: traversal.iterations,
        };
        debug!(
            "Cull from {}: {}/{} chunks visible ({:.1}% culled) in {} iterations",
            start,
            report.visited,
            report.total,
            report.culled_fraction() * 100.0,
            report.iterations
        );
        report
    }
}

impl Default for PortalCuller {
    fn default() -> Self {
        Self {
            forward_bias: DEFAULT_FORWARD_BIAS,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}
