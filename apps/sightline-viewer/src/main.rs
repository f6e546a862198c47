//! Sightline Culling Viewer
//!
//! Generates a grid of terrain chunks, builds their visibility graphs and runs
//! a portal cull from a viewer position, then prints the result as text.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p sightline-viewer -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! ### Viewer
//! - `--x <X>`, `--y <Y>`: Viewer position in world units (default: 53, 253)
//! - `--look <DEGREES>`: Look angle, 0 faces +x and 90 faces +y (default: 0)
//!
//! ### World
//! - `--seed <N>`: Noise seed (default: 36)
//! - `--depth <N>`: Blocks per chunk side (default: 20)
//! - `--grid-width <N>`, `--grid-height <N>`: Grid size in chunks (default: 8)
//! - `--block-size <F>`: World units per block (default: 5)
//! - `--forward-bias <F>`: Direction filter threshold (default: 0.2)
//!
//! ### Output
//! - `--blocks`: Print block occupancy instead of traversal orders
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod map;
mod params;

use sightline_core::Viewer;
use sightline_world::{ChunkGrid, NoiseHeightField, PortalCuller};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::params::ViewerParams;

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let params = ViewerParams::from_args();
    params.world.validate()?;
    info!(
        "World {}x{} chunks of {} blocks, seed {}",
        params.world.grid_width, params.world.grid_height, params.world.depth, params.world.seed
    );

    let field = NoiseHeightField::from_config(&params.world);
    let mut grid = ChunkGrid::generate(&params.world, &field)?;

    let viewer = Viewer::from_look_degrees(params.position, params.look_degrees)?;
    let culler = PortalCuller::from_config(&params.world)?;
    let report = culler.cull(&mut grid, &viewer);

    if params.show_blocks {
        print!("{}", map::render_blocks(&grid));
    } else {
        let viewer_chunk = grid.viewer_chunk(&viewer, culler.block_size());
        print!("{}", map::render_orders(&grid, viewer_chunk));
    }

    println!(
        "visible {}/{} chunks ({:.1}% culled) in {} iterations",
        report.visited,
        report.total,
        report.culled_fraction() * 100.0,
        report.iterations
    );

    Ok(())
}

fn print_help() {
    eprintln!(
        "Sightline Culling Viewer

USAGE:
    sightline-viewer [OPTIONS]

VIEWER OPTIONS:
    --x <X>                 Viewer x position in world units [default: 53]
    --y <Y>                 Viewer y position in world units [default: 253]
    --look <DEGREES>        Look angle, 0 faces +x and 90 faces +y [default: 0]

WORLD OPTIONS:
    --seed <N>              Noise seed [default: 36]
    --depth <N>             Blocks per chunk side [default: 20]
    --grid-width <N>        Grid width in chunks [default: 8]
    --grid-height <N>       Grid height in chunks [default: 8]
    --block-size <F>        World units per block [default: 5]
    --forward-bias <F>      Skip faces whose normal dotted with the view exceeds this [default: 0.2]

OUTPUT OPTIONS:
    --blocks                Print block occupancy instead of traversal orders
    -h, --help              Print help message

ENVIRONMENT:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
