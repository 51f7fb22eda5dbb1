//! Device-reported plane data

use std::fmt;

use serde::Serialize;

use crate::error::PlaneError;
use crate::spatial::{Matrix4, Vec3};

/// Stable identifier of a physical surface for as long as the device tracks it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlaneId(String);

impl PlaneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PlaneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlaneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for PlaneId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

/// A detected planar surface: boundary polygon in plane-local space plus its pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub id: PlaneId,
    /// Flat `x, y, z` triples in winding order. Trailing floats that do not
    /// complete a triple are ignored.
    pub vertices: Vec<f32>,
    /// Plane-local to world transform
    pub model_matrix: Matrix4,
}

impl Plane {
    pub fn new(id: impl Into<PlaneId>, vertices: Vec<f32>, model_matrix: Matrix4) -> Self {
        Self {
            id: id.into(),
            vertices,
            model_matrix,
        }
    }

    /// Build from the raw arrays a device hands over
    pub fn from_raw(
        id: impl Into<PlaneId>,
        vertices: Vec<f32>,
        model_matrix: &[f32],
    ) -> Result<Self, PlaneError> {
        let model_matrix = Matrix4::from_slice(model_matrix).ok_or(PlaneError::InvalidMatrix {
            len: model_matrix.len(),
        })?;
        Ok(Self::new(id, vertices, model_matrix))
    }

    /// Number of complete boundary points
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Boundary points in plane-local space
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    /// Boundary points mapped into world space
    pub fn world_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points()
            .map(move |p| self.model_matrix.transform_point(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_rejects_short_matrix() {
        let err = Plane::from_raw("p1", vec![], &[1.0; 9]).unwrap_err();
        assert_eq!(err, PlaneError::InvalidMatrix { len: 9 });
    }

    #[test]
    fn test_points_ignore_partial_triple() {
        let plane = Plane::new("p1", vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 9.0], Matrix4::IDENTITY);
        assert_eq!(plane.vertex_count(), 2);
        let points: Vec<Vec3> = plane.points().collect();
        assert_eq!(points, vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_world_points_use_model_matrix() {
        let plane = Plane::new(
            "floor",
            vec![1.0, 0.0, 0.0],
            Matrix4::from_translation(Vec3::new(0.0, -1.5, 0.0)),
        );
        let world: Vec<Vec3> = plane.world_points().collect();
        assert_eq!(world, vec![Vec3::new(1.0, -1.5, 0.0)]);
    }

    #[test]
    fn test_id_conversions() {
        assert_eq!(PlaneId::from(7u32).as_str(), "7");
        assert_eq!(PlaneId::from("a").to_string(), "a");
    }
}
