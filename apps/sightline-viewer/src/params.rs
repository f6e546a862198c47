//! Command-line parameters.

use std::str::FromStr;

use glam::Vec2;
use sightline_core::WorldConfig;
use tracing::warn;

/// Viewer and world parameters (from CLI or defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerParams {
    /// Viewer position in world units.
    pub position: Vec2,
    /// Look angle in degrees; 0 faces +x, 90 faces +y (down the rows).
    pub look_degrees: f32,
    /// Print block occupancy instead of traversal orders.
    pub show_blocks: bool,
    pub world: WorldConfig,
}

impl Default for ViewerParams {
    fn default() -> Self {
        Self {
            position: Vec2::new(53.0, 253.0),
            look_degrees: 0.0,
            show_blocks: false,
            world: WorldConfig::default(),
        }
    }
}

impl ViewerParams {
    /// Parse parameters from the process arguments.
    pub fn from_args() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse parameters from an argument list (without the program name).
    ///
    /// Unknown flags and unparsable values are ignored.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut params = Self::default();
        let args: Vec<String> = args.into_iter().collect();

        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1).map(String::as_str);
            let consumed = match args[i].as_str() {
                "--x" => set(&mut params.position.x, "--x", value),
                "--y" => set(&mut params.position.y, "--y", value),
                "--look" => set(&mut params.look_degrees, "--look", value),
                "--seed" => set(&mut params.world.seed, "--seed", value),
                "--depth" => set(&mut params.world.depth, "--depth", value),
                "--grid-width" => set(&mut params.world.grid_width, "--grid-width", value),
                "--grid-height" => set(&mut params.world.grid_height, "--grid-height", value),
                "--block-size" => set(&mut params.world.block_size, "--block-size", value),
                "--forward-bias" => set(&mut params.world.forward_bias, "--forward-bias", value),
                "--blocks" => {
                    params.show_blocks = true;
                    false
                }
                other => {
                    warn!("Ignoring unknown argument {other:?}");
                    false
                }
            };
            i += if consumed { 2 } else { 1 };
        }

        params
    }
}

/// Parse `value` into `slot`, returning whether the value was consumed.
fn set<T: FromStr>(slot: &mut T, flag: &str, value: Option<&str>) -> bool {
    match value.map(str::parse) {
        Some(Ok(v)) => {
            *slot = v;
            true
        }
        Some(Err(_)) => {
            warn!("Ignoring unparsable value {:?} for {flag}", value.unwrap_or_default());
            false
        }
        None => {
            warn!("Missing value for {flag}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ViewerParams {
        ViewerParams::parse(args.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn defaults_without_args() {
        assert_eq!(parse(&[]), ViewerParams::default());
    }

    #[test]
    fn viewer_and_world_flags() {
        let params = parse(&[
            "--x", "120", "--y", "40.5", "--look", "90", "--grid-width", "4", "--depth", "10",
            "--blocks",
        ]);
        assert_eq!(params.position, Vec2::new(120.0, 40.5));
        assert_eq!(params.look_degrees, 90.0);
        assert_eq!(params.world.grid_width, 4);
        assert_eq!(params.world.grid_height, 8);
        assert_eq!(params.world.depth, 10);
        assert!(params.show_blocks);
    }

    #[test]
    fn bad_values_are_skipped() {
        let params = parse(&["--seed", "abc", "--look", "45", "--x"]);
        assert_eq!(params.world.seed, WorldConfig::default().seed);
        assert_eq!(params.look_degrees, 45.0);
        assert_eq!(params.position.x, 53.0);
    }
}
