//! Per-chunk visibility graphs.
//!
//! A chunk's visibility graph records which pairs of boundary sides are joined
//! by open space inside the chunk. It is built by flood filling every region of
//! empty blocks and connecting all sides each region touches. Region identity
//! is not kept: two separate cavities touching top and left look the same as
//! one cavity touching both.

use sightline_core::coords::LocalPos;
use sightline_core::side::{Side, SideSet};

use crate::occupancy::Occupancy;

/// A 4-connected region of empty blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmptyRegion {
    /// Blocks in the region, in visit order.
    pub cells: Vec<LocalPos>,
    /// Boundary sides the region touches.
    pub sides: SideSet,
}

/// Partition the empty blocks of a chunk into 4-connected regions.
///
/// Every empty block belongs to exactly one returned region.
pub fn flood_regions(occupancy: &Occupancy) -> Vec<EmptyRegion> {
    let depth = occupancy.depth();
    let extent = i64::from(depth);
    let mut remaining = occupancy.empty_set();
    let mut regions = Vec::new();
    let mut stack: Vec<(i64, i64)> = Vec::new();

    while let Some(seed) = remaining.first() {
        let seed = LocalPos::from_index(seed, depth);
        let mut region = EmptyRegion::default();
        stack.push((i64::from(seed.x), i64::from(seed.y)));

        while let Some((x, y)) = stack.pop() {
            if x < 0 || y < 0 || x >= extent || y >= extent {
                continue;
            }
            let pos = LocalPos::new(x as u32, y as u32);
            // Solid blocks were never in the set; claimed blocks were taken.
            if !remaining.take(pos.to_index(depth)) {
                continue;
            }

            for side in pos.boundary_sides(depth) {
                region.sides.add(side);
            }
            region.cells.push(pos);

            stack.extend([(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]);
        }

        regions.push(region);
    }

    regions
}

/// Undirected graph over the four sides of a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisibilityGraph {
    /// Sides reachable from each side, indexed by [`Side::index`].
    rows: [SideSet; 4],
}

impl VisibilityGraph {
    /// Graph with no edges.
    pub const EMPTY: Self = Self {
        rows: [SideSet::empty(); 4],
    };

    /// Build the graph for a chunk's occupancy.
    pub fn build(occupancy: &Occupancy) -> Self {
        let mut graph = Self::EMPTY;
        for region in flood_regions(occupancy) {
            graph.connect_all(region.sides);
        }
        graph
    }

    /// Add the edge between two distinct sides. Self-loops are ignored.
    pub fn connect(&mut self, a: Side, b: Side) {
        if a == b {
            return;
        }
        self.rows[a.index()].add(b);
        self.rows[b.index()].add(a);
    }

    /// Connect every pair of distinct sides in the set.
    pub fn connect_all(&mut self, sides: SideSet) {
        for a in sides.sides() {
            for b in sides.sides() {
                self.connect(a, b);
            }
        }
    }

    /// Whether open space joins side `a` to side `b`.
    #[inline]
    pub const fn can_reach(&self, a: Side, b: Side) -> bool {
        self.rows[a.index()].has(b)
    }

    /// Sides reachable from `side`.
    #[inline]
    pub const fn reachable_from(&self, side: Side) -> SideSet {
        self.rows[side.index()]
    }

    /// Unordered edges, each reported once with the lower side first.
    pub fn edges(&self) -> impl Iterator<Item = (Side, Side)> + '_ {
        Side::ALL.into_iter().flat_map(move |a| {
            self.reachable_from(a)
                .sides()
                .filter(move |b| a.index() < b.index())
                .map(move |b| (a, b))
        })
    }

    /// Number of undirected edges (0 to 6).
    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum::<usize>() / 2
    }

    /// Whether the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn graph_of(rows: &[&str]) -> VisibilityGraph {
        VisibilityGraph::build(&Occupancy::from_rows(rows).unwrap())
    }

    fn assert_symmetric(graph: &VisibilityGraph) {
        for a in Side::ALL {
            for b in Side::ALL {
                assert_eq!(graph.can_reach(a, b), graph.can_reach(b, a));
            }
            assert!(!graph.can_reach(a, a));
        }
    }

    #[test]
    fn solid_chunk_has_no_edges() {
        let graph = VisibilityGraph::build(&Occupancy::filled(8));
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn empty_chunk_is_fully_connected() {
        let graph = VisibilityGraph::build(&Occupancy::empty(8));
        assert_eq!(graph.edge_count(), 6);
        assert_symmetric(&graph);
        for a in Side::ALL {
            for b in Side::ALL {
                assert_eq!(graph.can_reach(a, b), a != b);
            }
        }
    }

    #[test]
    fn vertical_wall_splits_left_from_right() {
        let graph = graph_of(&[
            "..#..", //
            "..#..", //
            "..#..", //
            "..#..", //
            "..#..", //
        ]);
        assert!(graph.can_reach(Side::Left, Side::Top));
        assert!(graph.can_reach(Side::Left, Side::Bottom));
        assert!(graph.can_reach(Side::Right, Side::Top));
        assert!(graph.can_reach(Side::Right, Side::Bottom));
        assert!(!graph.can_reach(Side::Left, Side::Right));
        // Both halves touch top and bottom, so that edge comes from either.
        assert!(graph.can_reach(Side::Top, Side::Bottom));
        assert_eq!(graph.edge_count(), 5);
        assert_symmetric(&graph);
    }

    #[test]
    fn region_touching_one_side_adds_nothing() {
        let graph = graph_of(&[
            "#.###", //
            "#.###", //
            "#####", //
            "#####", //
            "#####", //
        ]);
        assert!(graph.is_empty());
    }

    #[test]
    fn corner_pocket_joins_its_two_sides() {
        let graph = graph_of(&[
            ".####", //
            "#####", //
            "#####", //
            "#####", //
            "#####", //
        ]);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(Side::Top, Side::Left)]);
    }

    #[test]
    fn diagonal_cells_are_not_connected() {
        let regions = flood_regions(&Occupancy::from_rows(&[".#", "#."]).unwrap());
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn isolated_side_pockets_have_no_edges() {
        let graph = graph_of(&[
            "##.##", //
            "#####", //
            ".###.", //
            "#####", //
            "##.##", //
        ]);
        assert!(graph.is_empty());
    }

    #[test]
    fn regions_partition_empty_cells() {
        let occupancy = Occupancy::from_fn(9, |pos| (pos.x * 7 + pos.y * 3) % 5 == 0);
        let regions = flood_regions(&occupancy);

        let mut seen = HashSet::new();
        for region in &regions {
            assert!(!region.cells.is_empty());
            for cell in &region.cells {
                assert!(occupancy.is_empty(*cell));
                assert!(seen.insert(*cell), "cell {cell:?} claimed twice");
            }
        }
        assert_eq!(seen.len(), occupancy.empty_count());
    }

    #[test]
    fn one_by_one_chunk() {
        let graph = VisibilityGraph::build(&Occupancy::empty(1));
        assert_eq!(graph.edge_count(), 6);
        assert!(VisibilityGraph::build(&Occupancy::filled(1)).is_empty());
    }

    #[test]
    fn connect_ignores_self_loops() {
        let mut graph = VisibilityGraph::EMPTY;
        graph.connect(Side::Top, Side::Top);
        assert!(graph.is_empty());
        graph.connect(Side::Right, Side::Bottom);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![(Side::Bottom, Side::Right)]
        );
    }
}
