//! Viewer position and facing.

use glam::Vec2;

use crate::coords::ChunkPos;
use crate::error::{Error, Result};

/// Viewer state used to seed and steer a cull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    /// World-space position.
    pub position: Vec2,
    /// Unit facing vector.
    facing: Vec2,
}

impl Viewer {
    /// Create a viewer, normalizing the facing vector.
    ///
    /// A zero-length or non-finite facing is a configuration error.
    pub fn new(position: Vec2, facing: Vec2) -> Result<Self> {
        let facing = facing.try_normalize().ok_or_else(|| {
            Error::InvalidConfig(format!("facing vector {facing} has no direction"))
        })?;
        if !position.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "viewer position {position} is not finite"
            )));
        }
        Ok(Self { position, facing })
    }

    /// Create a viewer looking along `(cos θ, sin θ)` for an angle in degrees.
    pub fn from_look_degrees(position: Vec2, degrees: f32) -> Result<Self> {
        Self::new(position, Vec2::from_angle(degrees.to_radians()))
    }

    /// Unit facing vector.
    #[inline]
    pub const fn facing(&self) -> Vec2 {
        self.facing
    }

    /// Chunk containing the viewer.
    #[inline]
    pub fn chunk(&self, chunk_extent: f32) -> ChunkPos {
        ChunkPos::from_world(self.position, chunk_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn facing_is_normalized() {
        let viewer = Viewer::new(Vec2::ZERO, Vec2::new(3.0, 4.0)).unwrap();
        assert_relative_eq!(viewer.facing().length(), 1.0);
        assert_relative_eq!(viewer.facing().x, 0.6);
        assert_relative_eq!(viewer.facing().y, 0.8);
    }

    #[test]
    fn zero_facing_is_rejected() {
        let err = Viewer::new(Vec2::ZERO, Vec2::ZERO).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn non_finite_position_is_rejected() {
        assert!(Viewer::new(Vec2::new(f32::NAN, 0.0), Vec2::X).is_err());
    }

    #[test]
    fn look_degrees() {
        let right = Viewer::from_look_degrees(Vec2::ZERO, 0.0).unwrap();
        assert_relative_eq!(right.facing().x, 1.0);
        assert_relative_eq!(right.facing().y, 0.0);

        let down = Viewer::from_look_degrees(Vec2::ZERO, 90.0).unwrap();
        assert_relative_eq!(down.facing().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(down.facing().y, 1.0);
    }

    #[test]
    fn viewer_chunk() {
        let viewer = Viewer::from_look_degrees(Vec2::new(53.0, 253.0), 0.0).unwrap();
        assert_eq!(viewer.chunk(100.0), ChunkPos::new(0, 2));
    }
}
