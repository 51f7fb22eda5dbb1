//! Screen-tap hit testing and object placement

mod placement;

pub use placement::{place_at_hit, Anchor, ModelPlacer, PlacementOptions};

use crate::plane::PlaneId;
use crate::spatial::Matrix4;

/// A screen position normalized to `[0, 1]`, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    /// Clamps into `[0, 1]`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Normalize a touch given in pixels against the viewport size.
    /// Returns `None` for an empty viewport.
    pub fn normalized(px: f32, py: f32, width: f32, height: f32) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self::new(px / width, py / height))
    }

    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };
}

/// One surface intersection reported by a hit test
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    /// Pose of the intersection: translation at the hit point, rotation of the surface
    pub model_matrix: Matrix4,
    /// Distance from the ray origin
    pub distance: f32,
    /// The tracked plane that was hit, when known
    pub plane_id: Option<PlaneId>,
}

/// Maps a screen point to surface intersections, nearest first
pub trait HitTester {
    fn hit_test(&self, point: ScreenPoint) -> Vec<HitResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_touch() {
        let p = ScreenPoint::normalized(540.0, 1440.0, 1080.0, 1920.0).unwrap();
        assert_eq!(p, ScreenPoint { x: 0.5, y: 0.75 });
    }

    #[test]
    fn test_normalized_clamps_and_rejects_empty() {
        let p = ScreenPoint::normalized(-10.0, 5000.0, 100.0, 100.0).unwrap();
        assert_eq!(p, ScreenPoint { x: 0.0, y: 1.0 });
        assert!(ScreenPoint::normalized(1.0, 1.0, 0.0, 100.0).is_none());
    }
}
