//! Spatial primitives shared by plane geometry and hit placement
//!
//! Uses the right-handed, Y-up coordinate system of WebXR / WebVR devices:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Toward the viewer (+) / Into the scene (-)

mod matrix;
mod quaternion;
mod transform;
mod vec3;

pub use matrix::Matrix4;
pub use quaternion::Quaternion;
pub use transform::Transform;
pub use vec3::Vec3;
