//! Dense per-chunk block occupancy.

use sightline_core::coords::LocalPos;

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-size bit set over `len` indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    #[inline]
    pub(crate) fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
    }

    /// Clear a bit, returning whether it was set.
    #[inline]
    pub(crate) fn take(&mut self, index: usize) -> bool {
        let was_set = self.get(index);
        self.words[index / WORD_BITS] &= !(1u64 << (index % WORD_BITS));
        was_set
    }

    pub(crate) fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Lowest set index, if any.
    pub(crate) fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, w)| **w != 0)
            .map(|(i, w)| i * WORD_BITS + w.trailing_zeros() as usize)
    }

    pub(crate) fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&i| self.get(i))
    }
}

/// Solid/empty state of every block in one chunk.
///
/// Stored as a `depth * depth` bit array indexed by `x * depth + y`.
/// Built once and never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupancy {
    depth: u32,
    solid: BitSet,
}

impl Occupancy {
    /// Occupancy with no solid blocks.
    pub fn empty(depth: u32) -> Self {
        Self::from_fn(depth, |_| false)
    }

    /// Occupancy with every block solid.
    pub fn filled(depth: u32) -> Self {
        Self::from_fn(depth, |_| true)
    }

    /// Build occupancy from a per-cell solidity predicate.
    pub fn from_fn(depth: u32, mut is_solid: impl FnMut(LocalPos) -> bool) -> Self {
        let cells = depth as usize * depth as usize;
        let mut solid = BitSet::new(cells);
        for index in 0..cells {
            if is_solid(LocalPos::from_index(index, depth)) {
                solid.set(index);
            }
        }
        Self { depth, solid }
    }

    /// Parse rows of `#` (solid) and `.` (empty); row `y` is line `y`.
    ///
    /// Returns `None` unless the input is square and uses only those two characters.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let depth = rows.len();
        let grid: Vec<&[u8]> = rows.iter().map(|row| row.as_bytes()).collect();
        if grid.iter().any(|row| row.len() != depth)
            || grid.iter().flat_map(|row| row.iter()).any(|c| !matches!(c, b'#' | b'.'))
        {
            return None;
        }
        let depth = u32::try_from(depth).ok()?;
        Some(Self::from_fn(depth, |pos| {
            grid[pos.y as usize][pos.x as usize] == b'#'
        }))
    }

    /// Chunk side length in blocks.
    #[inline]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether the block at an in-range local position is solid.
    #[inline]
    pub fn is_solid(&self, pos: LocalPos) -> bool {
        debug_assert!(pos.x < self.depth && pos.y < self.depth);
        self.solid.get(pos.to_index(self.depth))
    }

    /// Whether the block at an in-range local position is empty.
    #[inline]
    pub fn is_empty(&self, pos: LocalPos) -> bool {
        !self.is_solid(pos)
    }

    /// Number of solid blocks.
    pub fn solid_count(&self) -> usize {
        self.solid.count()
    }

    /// Number of empty blocks.
    pub fn empty_count(&self) -> usize {
        self.cell_count() - self.solid_count()
    }

    /// Total number of blocks.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.depth as usize * self.depth as usize
    }

    /// Local positions of all solid blocks, in index order.
    pub fn solid_cells(&self) -> impl Iterator<Item = LocalPos> + '_ {
        self.solid
            .ones()
            .map(move |index| LocalPos::from_index(index, self.depth))
    }

    /// Local positions of all empty blocks, in index order.
    pub fn empty_cells(&self) -> impl Iterator<Item = LocalPos> + '_ {
        (0..self.cell_count())
            .filter(move |&index| !self.solid.get(index))
            .map(move |index| LocalPos::from_index(index, self.depth))
    }

    /// Bit set of the empty cells.
    pub(crate) fn empty_set(&self) -> BitSet {
        let mut empty = BitSet::new(self.cell_count());
        for index in (0..self.cell_count()).filter(|&i| !self.solid.get(i)) {
            empty.set(index);
        }
        empty
    }

    /// Render as rows of `#`/`.`, the inverse of [`Occupancy::from_rows`].
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.depth)
            .map(|y| {
                (0..self.depth)
                    .map(|x| {
                        if self.is_solid(LocalPos::new(x, y)) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitset_take_and_first() {
        let mut bits = BitSet::new(130);
        bits.set(3);
        bits.set(70);
        bits.set(129);
        assert_eq!(bits.count(), 3);
        assert_eq!(bits.first(), Some(3));

        assert!(bits.take(3));
        assert!(!bits.take(3));
        assert_eq!(bits.first(), Some(70));
        assert_eq!(bits.ones().collect::<Vec<_>>(), vec![70, 129]);
    }

    #[test]
    fn empty_and_filled() {
        let empty = Occupancy::empty(5);
        assert_eq!(empty.solid_count(), 0);
        assert_eq!(empty.empty_count(), 25);

        let filled = Occupancy::filled(5);
        assert_eq!(filled.solid_count(), 25);
        assert_eq!(filled.empty_cells().count(), 0);
    }

    #[test]
    fn from_fn_uses_local_coordinates() {
        let occupancy = Occupancy::from_fn(4, |pos| pos.x == 1);
        assert!(occupancy.is_solid(LocalPos::new(1, 3)));
        assert!(occupancy.is_empty(LocalPos::new(2, 1)));
        assert_eq!(occupancy.solid_count(), 4);
        assert!(occupancy.solid_cells().all(|pos| pos.x == 1));
    }

    #[test]
    fn rows_roundtrip() {
        let rows = ["#..", ".#.", "..#"];
        let occupancy = Occupancy::from_rows(&rows).unwrap();
        assert!(occupancy.is_solid(LocalPos::new(0, 0)));
        assert!(occupancy.is_solid(LocalPos::new(2, 2)));
        assert!(occupancy.is_empty(LocalPos::new(1, 0)));
        assert_eq!(occupancy.to_rows(), rows);
    }

    #[test]
    fn malformed_rows_rejected() {
        assert!(Occupancy::from_rows(&["#.", "."]).is_none());
        assert!(Occupancy::from_rows(&["#x", ".."]).is_none());
    }

    #[test]
    fn empty_set_complements_solid() {
        let occupancy = Occupancy::from_fn(3, |pos| pos.x == pos.y);
        let empty = occupancy.empty_set();
        assert_eq!(empty.count(), occupancy.empty_count());
        for pos in occupancy.solid_cells() {
            assert!(!empty.get(pos.to_index(3)));
        }
    }
}
