//! Chunk sides and side sets.

use bitflags::bitflags;
use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// One of the four boundary faces of a chunk.
///
/// Chunk rows grow downward: the top neighbor has the smaller `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// All sides, in traversal expansion order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The face on the other side of the chunk.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Chunk-coordinate step to the neighbor across this face.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> IVec2 {
        match self {
            Self::Top => IVec2::new(0, -1),
            Self::Bottom => IVec2::new(0, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }

    /// Face normal tested against the viewer's facing.
    ///
    /// Points back across the face, i.e. against [`Side::offset`].
    #[inline]
    #[must_use]
    pub const fn normal(self) -> Vec2 {
        match self {
            Self::Top => Vec2::new(0.0, 1.0),
            Self::Bottom => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(1.0, 0.0),
            Self::Right => Vec2::new(-1.0, 0.0),
        }
    }

    /// Single-element set for this side.
    #[inline]
    #[must_use]
    pub const fn as_set(self) -> SideSet {
        match self {
            Self::Top => SideSet::TOP,
            Self::Bottom => SideSet::BOTTOM,
            Self::Left => SideSet::LEFT,
            Self::Right => SideSet::RIGHT,
        }
    }

    /// Position of this side in [`Side::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

bitflags! {
    /// Set of chunk sides.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SideSet: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
    }
}

impl SideSet {
    /// Returns `true` if `side` is in the set.
    #[inline]
    #[must_use]
    pub const fn has(self, side: Side) -> bool {
        self.contains(side.as_set())
    }

    /// Add a side in place.
    #[inline]
    pub fn add(&mut self, side: Side) {
        self.insert(side.as_set());
    }

    /// Copy of the set with `side` added.
    #[inline]
    #[must_use]
    pub const fn with(self, side: Side) -> Self {
        self.union(side.as_set())
    }

    /// Iterate over the sides in the set, in [`Side::ALL`] order.
    pub fn sides(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |side| self.has(*side))
    }

    /// Number of sides in the set.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits().count_ones() as usize
    }
}

impl From<Side> for SideSet {
    fn from(side: Side) -> Self {
        side.as_set()
    }
}
