//! The replayed tracking session

use std::f32::consts::FRAC_PI_2;

use arplanes::{Matrix4, Plane, PlaneId, Quaternion, Transform, Vec3};

/// Viewport the scripted taps are given in, in pixels
pub const VIEWPORT: (f32, f32) = (1080.0, 1920.0);

/// One step of a scripted session
#[derive(Debug, Clone)]
pub enum Step {
    Added(Vec<Plane>),
    Updated(Vec<Plane>),
    Removed(Vec<PlaneId>),
    /// Move the device camera
    Camera(Transform),
    /// Touch at a pixel position within [`VIEWPORT`]
    Tap { x: f32, y: f32 },
}

/// Phone held at eye height looking straight down at `x`
fn camera_above(x: f32) -> Transform {
    Transform {
        position: Vec3::new(x, 1.6, 0.0),
        rotation: Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), -FRAC_PI_2),
        scale: Vec3::ONE,
    }
}

/// Axis-aligned rectangle in the plane's local x/z
fn rectangle(half_width: f32, half_depth: f32) -> Vec<f32> {
    vec![
        -half_width, 0.0, -half_depth, //
        half_width, 0.0, -half_depth, //
        half_width, 0.0, half_depth, //
        -half_width, 0.0, half_depth,
    ]
}

/// Floor found, a model placed on it, a table found, the floor grows,
/// a model placed on the table, the floor is lost and a last tap misses.
pub fn demo_script() -> Vec<Step> {
    let floor = Plane::new("floor", rectangle(1.0, 1.0), Matrix4::IDENTITY);
    // the device reports a candidate before it has a boundary
    let rug = Plane::new("rug", Vec::new(), Matrix4::IDENTITY);
    let table = Plane::new(
        "table",
        rectangle(0.4, 0.4),
        Matrix4::from_translation(Vec3::new(3.0, 0.7, 0.0)),
    );
    let grown_floor = Plane::new(
        "floor",
        vec![
            -1.5, 0.0, -1.5, //
            1.5, 0.0, -1.5, //
            1.8, 0.0, 0.0, //
            1.5, 0.0, 1.5, //
            -1.5, 0.0, 1.5,
        ],
        Matrix4::IDENTITY,
    );

    let (width, height) = VIEWPORT;
    vec![
        Step::Camera(camera_above(0.0)),
        Step::Added(vec![floor, rug]),
        Step::Tap {
            x: width / 2.0,
            y: height / 2.0,
        },
        Step::Added(vec![table]),
        Step::Updated(vec![grown_floor]),
        Step::Camera(camera_above(3.0)),
        Step::Tap {
            x: width / 2.0,
            y: height / 2.0,
        },
        Step::Removed(vec!["floor".into()]),
        Step::Tap {
            x: width / 2.0,
            y: height - 20.0,
        },
    ]
}
