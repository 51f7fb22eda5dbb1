//! Column-major 4x4 matrix as reported by AR devices

use std::ops::Mul;

use super::{Quaternion, Transform, Vec3};

/// A 4x4 affine transform stored column-major, element `(row, col)` at `col * 4 + row`.
///
/// This is the layout devices use for `modelMatrix` on planes and hit results,
/// so a device array is adopted as-is. Plane nodes keep the matrix whole as a
/// fixed local transform; only hit placement decomposes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    cols: [f32; 16],
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        cols: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn from_cols_array(cols: [f32; 16]) -> Self {
        Self { cols }
    }

    /// Adopt a device-reported matrix; `None` unless exactly 16 floats are given
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        let cols: [f32; 16] = values.try_into().ok()?;
        Some(Self { cols })
    }

    /// Pure translation
    pub fn from_translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[12] = t.x;
        m.cols[13] = t.y;
        m.cols[14] = t.z;
        m
    }

    /// Compose translation * rotation * scale
    pub fn from_transform(transform: &Transform) -> Self {
        let [c0, c1, c2] = transform.rotation.to_rotation_columns();
        let s = transform.scale;
        let c0 = c0 * s.x;
        let c1 = c1 * s.y;
        let c2 = c2 * s.z;
        let t = transform.position;
        Self {
            cols: [
                c0.x, c0.y, c0.z, 0.0, //
                c1.x, c1.y, c1.z, 0.0, //
                c2.x, c2.y, c2.z, 0.0, //
                t.x, t.y, t.z, 1.0,
            ],
        }
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        self.cols
    }

    /// Row-major copy, the argument order of scene graphs whose setters take rows
    pub fn to_rows_array(&self) -> [f32; 16] {
        let mut rows = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                rows[row * 4 + col] = self.get(row, col);
            }
        }
        rows
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cols[col * 4 + row]
    }

    fn axis(&self, col: usize) -> Vec3 {
        Vec3::new(
            self.cols[col * 4],
            self.cols[col * 4 + 1],
            self.cols[col * 4 + 2],
        )
    }

    pub fn translation(&self) -> Vec3 {
        self.axis(3)
    }

    /// Determinant of the upper 3x3 block
    pub fn determinant3(&self) -> f32 {
        self.axis(0).dot(&self.axis(1).cross(&self.axis(2)))
    }

    /// Map a point through the matrix, dividing by `w` when it is projective
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let x = self.get(0, 0) * p.x + self.get(0, 1) * p.y + self.get(0, 2) * p.z + self.get(0, 3);
        let y = self.get(1, 0) * p.x + self.get(1, 1) * p.y + self.get(1, 2) * p.z + self.get(1, 3);
        let z = self.get(2, 0) * p.x + self.get(2, 1) * p.y + self.get(2, 2) * p.z + self.get(2, 3);
        let w = self.get(3, 0) * p.x + self.get(3, 1) * p.y + self.get(3, 2) * p.z + self.get(3, 3);
        if w != 0.0 && w != 1.0 {
            Vec3::new(x / w, y / w, z / w)
        } else {
            Vec3::new(x, y, z)
        }
    }

    /// Map a direction through the upper 3x3 block (no translation)
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.axis(0) * v.x + self.axis(1) * v.y + self.axis(2) * v.z
    }

    /// Split into position, rotation and scale.
    ///
    /// A negative determinant is folded into the X scale. Degenerate axes
    /// yield an identity rotation.
    pub fn decompose(&self) -> Transform {
        let mut sx = self.axis(0).length();
        let sy = self.axis(1).length();
        let sz = self.axis(2).length();
        if self.determinant3() < 0.0 {
            sx = -sx;
        }

        let rotation = if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            Quaternion::IDENTITY
        } else {
            Quaternion::from_rotation_columns(
                self.axis(0) * (1.0 / sx),
                self.axis(1) * (1.0 / sy),
                self.axis(2) * (1.0 / sz),
            )
        };

        Transform {
            position: self.translation(),
            rotation,
            scale: Vec3::new(sx, sy, sz),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().all(|v| v.is_finite())
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut cols = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                cols[col * 4 + row] = (0..4).map(|k| self.get(row, k) * rhs.get(k, col)).sum();
            }
        }
        Matrix4 { cols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_from_slice_requires_sixteen() {
        assert!(Matrix4::from_slice(&[0.0; 15]).is_none());
        assert!(Matrix4::from_slice(&[0.0; 17]).is_none());
        assert_eq!(
            Matrix4::from_slice(&Matrix4::IDENTITY.to_cols_array()),
            Some(Matrix4::IDENTITY)
        );
    }

    #[test]
    fn test_column_major_translation() {
        let mut raw = Matrix4::IDENTITY.to_cols_array();
        raw[12] = 1.0;
        raw[13] = -0.5;
        raw[14] = 2.0;
        let m = Matrix4::from_cols_array(raw);

        assert_eq!(m.get(0, 3), 1.0);
        assert_eq!(m.to_rows_array()[3], 1.0);
        assert_eq!(
            m.transform_point(Vec3::ZERO),
            Vec3::new(1.0, -0.5, 2.0)
        );
    }

    #[test]
    fn test_decompose_recovers_transform() {
        let original = Transform {
            position: Vec3::new(0.5, -1.0, -2.0),
            rotation: Quaternion::from_yaw(FRAC_PI_2),
            scale: Vec3::new(2.0, 1.0, 0.5),
        };
        let m = Matrix4::from_transform(&original);
        let back = m.decompose();

        assert!(back.position.distance(&original.position) < 0.0001);
        assert!(back.scale.distance(&original.scale) < 0.0001);
        assert!((back.rotation.dot(&original.rotation).abs() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_multiply_applies_right_first() {
        let t = Matrix4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let r = Matrix4::from_transform(&Transform::from_rotation(Quaternion::from_yaw(FRAC_PI_2)));
        let p = (t * r).transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert!(p.distance(&Vec3::new(2.0, 0.0, 0.0)) < 0.0001);
    }

    #[test]
    fn test_non_finite_detected() {
        let mut raw = Matrix4::IDENTITY.to_cols_array();
        raw[5] = f32::NAN;
        assert!(!Matrix4::from_cols_array(raw).is_finite());
        assert!(Matrix4::IDENTITY.is_finite());
    }
}
