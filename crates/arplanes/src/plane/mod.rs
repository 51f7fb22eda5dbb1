//! Detected planes and their renderable mirror

mod geometry;
mod material;
mod model;
mod palette;
mod registry;

pub use geometry::{build_mesh, build_plane_node, PlaneMesh, PlaneNode};
pub use material::{MaterialStyle, PlaneMaterial};
pub use model::{Plane, PlaneId};
pub use palette::{AssignmentStrategy, Palette, MATERIAL_COLORS};
pub use registry::{PlaneRegistry, TrackedPlane};
