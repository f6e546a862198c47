//! Chunk record: occupancy, visibility graph and traversal tag.

use sightline_core::coords::ChunkPos;

use crate::generation::{generate_occupancy, HeightField};
use crate::occupancy::Occupancy;
use crate::visibility::VisibilityGraph;

/// A single chunk of the grid.
///
/// Occupancy and visibility graph are fixed at construction; only the
/// traversal order changes, and only through the culler.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Position in chunk coordinates.
    pub pos: ChunkPos,
    occupancy: Occupancy,
    visibility: VisibilityGraph,
    traversal_order: Option<usize>,
}

impl Chunk {
    /// Create a chunk from its occupancy, building the visibility graph.
    pub fn new(pos: ChunkPos, occupancy: Occupancy) -> Self {
        let visibility = VisibilityGraph::build(&occupancy);
        Self {
            pos,
            occupancy,
            visibility,
            traversal_order: None,
        }
    }

    /// Generate a chunk from a height field.
    pub fn generate<H>(field: &H, pos: ChunkPos, depth: u32) -> Self
    where
        H: HeightField + ?Sized,
    {
        Self::new(pos, generate_occupancy(field, pos, depth))
    }

    /// Block occupancy.
    #[inline]
    pub const fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Side-to-side visibility graph.
    #[inline]
    pub const fn visibility(&self) -> &VisibilityGraph {
        &self.visibility
    }

    /// Order in which the last cull discovered this chunk, or `None` if hidden.
    #[inline]
    pub const fn traversal_order(&self) -> Option<usize> {
        self.traversal_order
    }

    /// Traversal order with `-1` for hidden chunks.
    #[inline]
    pub fn traversal_tag(&self) -> i64 {
        self.traversal_order.map_or(-1, |order| order as i64)
    }

    /// Whether the last cull reached this chunk.
    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.traversal_order.is_some()
    }

    pub(crate) fn set_traversal_order(&mut self, order: Option<usize>) {
        self.traversal_order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::side::Side;

    #[test]
    fn new_chunk_is_hidden() {
        let chunk = Chunk::new(ChunkPos::new(1, 2), Occupancy::empty(4));
        assert_eq!(chunk.traversal_order(), None);
        assert_eq!(chunk.traversal_tag(), -1);
        assert!(!chunk.is_visible());
    }

    #[test]
    fn graph_follows_occupancy() {
        let open = Chunk::new(ChunkPos::new(0, 0), Occupancy::empty(4));
        assert_eq!(open.visibility().edge_count(), 6);

        let closed = Chunk::new(ChunkPos::new(0, 0), Occupancy::filled(4));
        assert!(closed.visibility().is_empty());
    }

    #[test]
    fn generate_uses_height_field() {
        let field = |x: i64, _: i64| if x < 2 { 0.0 } else { 1.0 };
        let chunk = Chunk::generate(&field, ChunkPos::new(0, 0), 4);
        assert_eq!(chunk.occupancy().solid_count(), 8);
        assert!(chunk.visibility().can_reach(Side::Top, Side::Right));
        assert!(!chunk.visibility().can_reach(Side::Left, Side::Right));
    }

    #[test]
    fn traversal_tag_reports_order() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0), Occupancy::empty(2));
        chunk.set_traversal_order(Some(7));
        assert_eq!(chunk.traversal_tag(), 7);
        assert!(chunk.is_visible());
    }
}
