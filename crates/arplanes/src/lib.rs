//! arplanes: renderable mirror of AR-detected planes
//!
//! This crate provides:
//! - A registry that keeps exactly one scene node per tracked device plane
//! - Fan-triangulated plane meshes with a shared dotted-grid material
//! - Per-plane palette colors that survive geometry updates
//! - A device notification adapter and a simulated tracking source
//! - Tap-to-place hit testing for anchoring models on surfaces

pub mod color;
pub mod config;
pub mod device;
pub mod error;
pub mod hit;
pub mod plane;
pub mod scene;
pub mod spatial;

// Re-export commonly used types
pub use color::Color;
pub use config::{ArPlanesConfig, DeviceConfig};
pub use device::{PlaneEvent, PlaneEventAdapter, PlaneEventKind, PlaneSource, SimulatedDevice};
pub use error::{ColorParseError, ConfigError, DeviceError, PlacementError, PlaneError};
pub use hit::{HitResult, HitTester, ModelPlacer, PlacementOptions, ScreenPoint};
pub use plane::{AssignmentStrategy, MaterialStyle, Palette, Plane, PlaneId, PlaneRegistry};
pub use scene::{MemoryScene, NodeId, SceneGraph};
pub use spatial::{Matrix4, Quaternion, Transform, Vec3};
