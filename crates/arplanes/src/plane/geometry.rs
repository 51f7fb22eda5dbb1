//! Plane boundary to renderable polygon conversion
//!
//! Boundaries are triangulated as a fan around the first vertex. Devices
//! report convex hulls, so this covers every shape they emit; a concave
//! boundary that is not star-shaped from vertex 0 will produce overlapping
//! triangles.

use serde::Serialize;

use super::{MaterialStyle, Plane, PlaneId};
use crate::color::Color;
use crate::spatial::{Matrix4, Vec3};

/// Triangulated plane polygon in plane-local space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaneMesh {
    pub positions: Vec<Vec3>,
    /// Vertex indices, counter-clockwise as reported
    pub triangles: Vec<[u32; 3]>,
}

impl PlaneMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Flattened index buffer
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

/// A ready-to-attach renderable for one plane.
///
/// `local_transform` is the device matrix applied verbatim and is never
/// decomposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaneNode {
    pub plane_id: PlaneId,
    #[serde(serialize_with = "serialize_matrix")]
    pub local_transform: Matrix4,
    pub mesh: PlaneMesh,
    pub material: super::PlaneMaterial,
}

fn serialize_matrix<S: serde::Serializer>(m: &Matrix4, serializer: S) -> Result<S::Ok, S::Error> {
    m.to_cols_array().serialize(serializer)
}

/// Fan-triangulate a plane boundary.
///
/// Returns `None` when the plane cannot form a single triangle (empty
/// boundary or fewer than three points); callers skip such planes.
pub fn build_mesh(plane: &Plane) -> Option<PlaneMesh> {
    let positions: Vec<Vec3> = plane.points().collect();
    if positions.len() < 3 {
        return None;
    }

    let last = positions.len() as u32 - 2;
    let triangles = (0..last).map(|face| [0, face + 1, face + 2]).collect();

    Some(PlaneMesh {
        positions,
        triangles,
    })
}

/// Build the full renderable: mesh, fixed local transform and per-plane material.
pub fn build_plane_node(plane: &Plane, style: &MaterialStyle, background: Color) -> Option<PlaneNode> {
    let mesh = build_mesh(plane)?;
    Some(PlaneNode {
        plane_id: plane.id.clone(),
        local_transform: plane.model_matrix,
        mesh,
        material: style.with_background(background),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Plane {
        Plane::new(
            "p1",
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            Matrix4::IDENTITY,
        )
    }

    #[test]
    fn test_square_fans_into_two_triangles() {
        let mesh = build_mesh(&square()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.indices(), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_triangle_count_is_n_minus_two() {
        for n in 3..12usize {
            let vertices: Vec<f32> = (0..n)
                .flat_map(|i| {
                    let a = i as f32 / n as f32 * std::f32::consts::TAU;
                    [a.cos(), 0.0, a.sin()]
                })
                .collect();
            let mesh = build_mesh(&Plane::new("ring", vertices, Matrix4::IDENTITY)).unwrap();
            assert_eq!(mesh.triangle_count(), n - 2);
            assert!(mesh.triangles.iter().all(|t| t[0] == 0));
        }
    }

    #[test]
    fn test_degenerate_boundaries_produce_nothing() {
        assert!(build_mesh(&Plane::new("empty", vec![], Matrix4::IDENTITY)).is_none());
        assert!(build_mesh(&Plane::new("one", vec![0.0; 3], Matrix4::IDENTITY)).is_none());
        assert!(build_mesh(&Plane::new("two", vec![0.0; 6], Matrix4::IDENTITY)).is_none());
    }

    #[test]
    fn test_node_keeps_matrix_verbatim() {
        // shear: not expressible as position / rotation / scale
        let mut raw = Matrix4::IDENTITY.to_cols_array();
        raw[4] = 0.5;
        raw[12] = 2.0;
        let matrix = Matrix4::from_cols_array(raw);
        let plane = Plane { model_matrix: matrix, ..square() };

        let color = Color::from_u32(0x4CAF50);
        let node = build_plane_node(&plane, &MaterialStyle::default(), color).unwrap();
        assert_eq!(node.local_transform, matrix);
        assert_eq!(node.material.background_color, color);
        assert_eq!(node.plane_id, PlaneId::from("p1"));
    }
}
