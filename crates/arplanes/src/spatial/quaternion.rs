//! Unit quaternion for object orientation

use super::Vec3;
use serde::Serialize;
use std::ops::Mul;

/// A rotation quaternion `(x, y, z, w)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// No rotation
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle_radians` about `axis`
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let (sin_half, cos_half) = (angle_radians * 0.5).sin_cos();
        let axis = axis.normalize();
        Self::new(
            axis.x * sin_half,
            axis.y * sin_half,
            axis.z * sin_half,
            cos_half,
        )
    }

    /// Rotation about the world up axis only
    pub fn from_yaw(yaw_radians: f32) -> Self {
        Self::from_axis_angle(Vec3::UP, yaw_radians)
    }

    /// Extract a rotation from the three basis columns of a pure rotation matrix.
    ///
    /// The columns must already have their scale divided out.
    pub fn from_rotation_columns(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        let (m11, m21, m31) = (c0.x, c0.y, c0.z);
        let (m12, m22, m32) = (c1.x, c1.y, c1.z);
        let (m13, m23, m33) = (c2.x, c2.y, c2.z);
        let trace = m11 + m22 + m33;

        let q = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new((m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s)
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Self::new(0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s)
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Self::new((m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s)
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Self::new((m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s)
        };
        q.normalize()
    }

    /// Basis columns of the equivalent 3x3 rotation matrix
    pub fn to_rotation_columns(&self) -> [Vec3; 3] {
        let Self { x, y, z, w } = *self;
        [
            Vec3::new(
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y + w * z),
                2.0 * (x * z - w * y),
            ),
            Vec3::new(
                2.0 * (x * y - w * z),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z + w * x),
            ),
            Vec3::new(
                2.0 * (x * z + w * y),
                2.0 * (y * z - w * x),
                1.0 - 2.0 * (x * x + y * y),
            ),
        ]
    }

    pub fn dot(&self, other: &Quaternion) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn normalize(&self) -> Self {
        let mag = self.dot(self).sqrt();
        if mag > 0.0 {
            Self::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag)
        } else {
            Self::IDENTITY
        }
    }

    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let axis = Vec3::new(self.x, self.y, self.z);
        let uv = axis.cross(&v);
        let uuv = axis.cross(&uv);
        v + (uv * self.w + uuv) * 2.0
    }

    /// Spherical interpolation along the shorter arc
    pub fn slerp(&self, other: &Quaternion, t: f32) -> Self {
        let dot = self.dot(other);
        let (other, dot) = if dot < 0.0 {
            (Quaternion::new(-other.x, -other.y, -other.z, -other.w), -dot)
        } else {
            (*other, dot)
        };

        if dot > 0.9995 {
            return Quaternion::new(
                self.x + t * (other.x - self.x),
                self.y + t * (other.y - self.y),
                self.z + t * (other.z - self.z),
                self.w + t * (other.w - self.w),
            )
            .normalize();
        }

        let theta_0 = dot.acos();
        let theta = theta_0 * t;
        let sin_theta_0 = theta_0.sin();
        let s0 = (theta_0 - theta).sin() / sin_theta_0;
        let s1 = theta.sin() / sin_theta_0;

        Quaternion::new(
            s0 * self.x + s1 * other.x,
            s0 * self.y + s1 * other.y,
            s0 * self.z + s1 * other.z,
            s0 * self.w + s1 * other.w,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(&b) < 0.0001
    }

    #[test]
    fn test_yaw_quarter_turn() {
        let q = Quaternion::from_yaw(FRAC_PI_2);
        let rotated = q.rotate(Vec3::new(0.0, 0.0, 1.0));
        assert!(approx(rotated, Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotation_columns_round_trip() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let [c0, c1, c2] = q.to_rotation_columns();
        let back = Quaternion::from_rotation_columns(c0, c1, c2);
        // q and -q describe the same rotation
        assert!((q.dot(&back).abs() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_half_turn_uses_non_trace_branch() {
        let q = Quaternion::from_yaw(std::f32::consts::PI);
        let [c0, c1, c2] = q.to_rotation_columns();
        let back = Quaternion::from_rotation_columns(c0, c1, c2);
        let v = Vec3::new(0.0, 0.0, 1.0);
        assert!(approx(back.rotate(v), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_yaw(FRAC_PI_2);
        assert!((a.slerp(&b, 0.0).dot(&a) - 1.0).abs() < 0.0001);
        assert!((a.slerp(&b, 1.0).dot(&b) - 1.0).abs() < 0.0001);

        let half = a.slerp(&b, 0.5);
        let expected = Quaternion::from_yaw(FRAC_PI_2 / 2.0);
        assert!((half.dot(&expected) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_conjugate_undoes_rotation() {
        let q = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), 1.2);
        let v = Vec3::new(0.3, -2.0, 5.0);
        assert!(approx(q.conjugate().rotate(q.rotate(v)), v));
    }
}
