//! Coordinate systems for the chunk grid.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::side::Side;

/// Position within a chunk (0 to depth-1 per axis).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    pub x: u32,
    pub y: u32,
}

impl LocalPos {
    /// Create a new local position
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Convert to linear index for flat storage (`x * depth + y`)
    #[inline]
    pub const fn to_index(self, depth: u32) -> usize {
        self.x as usize * depth as usize + self.y as usize
    }

    /// Create from linear index
    #[inline]
    pub const fn from_index(index: usize, depth: u32) -> Self {
        let depth = depth as usize;
        Self {
            x: (index / depth) as u32,
            y: (index % depth) as u32,
        }
    }

    /// Boundary sides this cell lies on in a chunk of the given depth.
    ///
    /// A corner cell lies on two sides; a 1x1 chunk's only cell on all four.
    pub fn boundary_sides(self, depth: u32) -> impl Iterator<Item = Side> {
        let last = depth.saturating_sub(1);
        let touches = [self.y == 0, self.y == last, self.x == 0, self.x == last];
        Side::ALL
            .into_iter()
            .zip(touches)
            .filter_map(|(side, hit)| hit.then_some(side))
    }
}

/// Chunk position in chunk coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

impl ChunkPos {
    /// Create a new chunk position
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk containing a world-space point, given the world extent of one chunk
    #[inline]
    pub fn from_world(position: Vec2, chunk_extent: f32) -> Self {
        let cell = (position / chunk_extent).floor();
        Self::new(cell.x as i32, cell.y as i32)
    }

    /// Block coordinate of this chunk's origin cell
    #[inline]
    pub const fn origin_block(self, depth: u32) -> BlockPos {
        BlockPos::new(
            self.x as i64 * depth as i64,
            self.y as i64 * depth as i64,
        )
    }

    /// Neighboring chunk across the given side
    #[inline]
    pub fn neighbor(self, side: Side) -> Self {
        Self::from(self.to_ivec2() + side.offset())
    }

    /// The four neighbors, paired with the side crossed to reach them
    pub fn neighbors(self) -> [(Side, ChunkPos); 4] {
        Side::ALL.map(|side| (side, self.neighbor(side)))
    }

    /// Convert to glam IVec2
    #[inline]
    pub const fn to_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

impl From<IVec2> for ChunkPos {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl std::fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Global block position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i64,
    pub y: i64,
}

impl BlockPos {
    /// Create a new block position
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Create from chunk and local position
    #[inline]
    pub const fn from_chunk_local(chunk: ChunkPos, local: LocalPos, depth: u32) -> Self {
        let origin = chunk.origin_block(depth);
        Self::new(origin.x + local.x as i64, origin.y + local.y as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_pos_index_roundtrip() {
        let depth = 7;
        for x in 0..depth {
            for y in 0..depth {
                let pos = LocalPos::new(x, y);
                assert_eq!(LocalPos::from_index(pos.to_index(depth), depth), pos);
            }
        }
    }

    #[test]
    fn boundary_sides_of_cells() {
        let sides = |x, y| LocalPos::new(x, y).boundary_sides(4).collect::<Vec<_>>();
        assert_eq!(sides(1, 1), vec![]);
        assert_eq!(sides(0, 2), vec![Side::Left]);
        assert_eq!(sides(3, 0), vec![Side::Top, Side::Right]);
        assert_eq!(sides(0, 3), vec![Side::Bottom, Side::Left]);
        assert_eq!(
            LocalPos::new(0, 0).boundary_sides(1).collect::<Vec<_>>(),
            Side::ALL.to_vec()
        );
    }

    #[test]
    fn chunk_from_world_floors() {
        assert_eq!(ChunkPos::from_world(Vec2::new(53.0, 253.0), 100.0), ChunkPos::new(0, 2));
        assert_eq!(ChunkPos::from_world(Vec2::new(100.0, 99.9), 100.0), ChunkPos::new(1, 0));
        assert_eq!(ChunkPos::from_world(Vec2::new(-0.5, 0.0), 100.0), ChunkPos::new(-1, 0));
    }

    #[test]
    fn neighbors_follow_side_offsets() {
        let center = ChunkPos::new(2, 2);
        assert_eq!(
            center.neighbors(),
            [
                (Side::Top, ChunkPos::new(2, 1)),
                (Side::Bottom, ChunkPos::new(2, 3)),
                (Side::Left, ChunkPos::new(1, 2)),
                (Side::Right, ChunkPos::new(3, 2)),
            ]
        );
    }

    #[test]
    fn block_from_chunk_local() {
        let block = BlockPos::from_chunk_local(ChunkPos::new(2, 3), LocalPos::new(4, 5), 20);
        assert_eq!(block, BlockPos::new(44, 65));
    }
}
