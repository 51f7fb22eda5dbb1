//! Position / rotation / scale transform for placed objects

use serde::Serialize;

use super::{Matrix4, Quaternion, Vec3};

/// A decomposed 3D transform (position + rotation + scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quaternion,
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform (origin, no rotation, unit scale)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn from_rotation(rotation: Quaternion) -> Self {
        Self {
            rotation,
            ..Self::identity()
        }
    }

    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::from_transform(self)
    }

    /// Direction the transform looks along (its local -Z)
    pub fn forward(&self) -> Vec3 {
        self.rotation.rotate(Vec3::FORWARD)
    }

    /// Transform a point from local space to world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        let scaled = Vec3::new(
            local.x * self.scale.x,
            local.y * self.scale.y,
            local.z * self.scale.z,
        );
        self.position + self.rotation.rotate(scaled)
    }

    /// Yaw (rotation about +Y) that turns this transform's +Z toward `target`
    /// in the horizontal plane
    pub fn yaw_towards(&self, target: Vec3) -> f32 {
        (target.x - self.position.x).atan2(target.z - self.position.z)
    }

    /// Move part of the way toward `target`: positions and scales lerp,
    /// rotations slerp. `t = 1` snaps.
    pub fn lerp(&self, target: &Transform, t: f32) -> Self {
        Self {
            position: self.position.lerp(&target.position, t),
            rotation: self.rotation.slerp(&target.rotation, t),
            scale: self.scale.lerp(&target.scale, t),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quaternion::IDENTITY);
        assert_eq!(t.transform_point(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transform_point_matches_matrix() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quaternion::from_yaw(0.4),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let p = Vec3::new(-1.0, 0.5, 0.25);
        let direct = t.transform_point(p);
        let via_matrix = t.to_matrix().transform_point(p);
        assert!(direct.distance(&via_matrix) < 0.0001);
    }

    #[test]
    fn test_yaw_towards() {
        let t = Transform::identity();
        let yaw = t.yaw_towards(Vec3::new(3.0, 10.0, 0.0));
        assert!((yaw - FRAC_PI_2).abs() < 0.0001);
    }

    #[test]
    fn test_forward_default_looks_into_scene() {
        assert_eq!(Transform::identity().forward(), Vec3::FORWARD);
    }
}
