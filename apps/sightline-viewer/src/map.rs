//! Text rendering of a culled grid.

use sightline_core::coords::{ChunkPos, LocalPos};
use sightline_world::ChunkGrid;

/// One cell per chunk: its traversal order, `--` when hidden.
///
/// The viewer's chunk is wrapped in brackets.
pub fn render_orders(grid: &ChunkGrid, viewer_chunk: ChunkPos) -> String {
    let width = grid.len().saturating_sub(1).to_string().len().max(2);
    let mut out = String::new();

    for y in 0..grid.height() as i32 {
        let row: Vec<String> = (0..grid.width() as i32)
            .map(|x| {
                let pos = ChunkPos::new(x, y);
                let label = grid
                    .get(pos)
                    .and_then(|chunk| chunk.traversal_order())
                    .map_or_else(|| "--".to_string(), |order| order.to_string());
                if pos == viewer_chunk {
                    format!("[{label:>width$}]")
                } else {
                    format!(" {label:>width$} ")
                }
            })
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }

    out
}

/// Block occupancy of the whole grid, `#` solid and `.` empty.
///
/// Hidden chunks are drawn with `+` and `,` so culled regions stand out.
pub fn render_blocks(grid: &ChunkGrid) -> String {
    let depth = grid.depth();
    let mut out = String::new();

    for cy in 0..grid.height() as i32 {
        for ly in 0..depth {
            for cx in 0..grid.width() as i32 {
                let Some(chunk) = grid.get(ChunkPos::new(cx, cy)) else {
                    continue;
                };
                let (solid, empty) = if chunk.is_visible() {
                    ('#', '.')
                } else {
                    ('+', ',')
                };
                for lx in 0..depth {
                    let cell = LocalPos::new(lx, ly);
                    out.push(if chunk.occupancy().is_solid(cell) {
                        solid
                    } else {
                        empty
                    });
                }
            }
            out.push('\n');
        }
    }

    out
}
