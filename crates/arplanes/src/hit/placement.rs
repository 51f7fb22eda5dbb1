//! Placing models at hit-test results

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{HitResult, HitTester, ScreenPoint};
use crate::error::PlacementError;
use crate::plane::PlaneId;
use crate::spatial::{Quaternion, Transform};

/// How a tapped model is posed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementOptions {
    /// Fraction of the way to move toward the hit pose, 1 = snap
    pub easing: f32,
    /// Adopt the surface orientation as well as its position
    pub apply_orientation: bool,
    /// Turn the placed model about Y toward the camera afterwards
    pub face_camera: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            easing: 1.0,
            apply_orientation: true,
            face_camera: true,
        }
    }
}

/// Move `target` toward the pose of `hit`.
///
/// With `easing >= 1` the position (and optionally rotation) is copied;
/// below that the position lerps and the rotation slerps by `easing`.
/// Easing is clamped to `[0, 1]`; NaN snaps. Scale is never touched.
pub fn place_at_hit(
    target: &mut Transform,
    hit: &HitResult,
    easing: f32,
    apply_orientation: bool,
) -> Result<(), PlacementError> {
    if !hit.model_matrix.is_finite() {
        return Err(PlacementError::InvalidHit("non-finite model matrix".into()));
    }
    let pose = hit.model_matrix.decompose();
    let easing = if easing.is_nan() { 1.0 } else { easing.clamp(0.0, 1.0) };

    if easing >= 1.0 {
        target.position = pose.position;
        if apply_orientation {
            target.rotation = pose.rotation;
        }
    } else {
        target.position = target.position.lerp(&pose.position, easing);
        if apply_orientation {
            target.rotation = target.rotation.slerp(&pose.rotation, easing);
        }
    }
    Ok(())
}

/// A model instance placed on a surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    pub id: u64,
    pub transform: Transform,
    pub plane_id: Option<PlaneId>,
}

/// Turns taps into anchored model instances
#[derive(Debug)]
pub struct ModelPlacer {
    options: PlacementOptions,
    model: Transform,
    anchors: Vec<Anchor>,
    next_id: u64,
}

impl ModelPlacer {
    pub fn new(options: PlacementOptions) -> Self {
        Self {
            options,
            model: Transform::identity(),
            anchors: Vec::new(),
            next_id: 0,
        }
    }

    /// Base transform every placed instance starts from (e.g. the model's scale)
    pub fn with_model_transform(mut self, model: Transform) -> Self {
        self.model = model;
        self
    }

    pub fn options(&self) -> &PlacementOptions {
        &self.options
    }

    /// Hit-test `point` and place a new instance at the nearest result.
    ///
    /// No hits is not an error; it returns `Ok(None)`.
    pub fn handle_tap(
        &mut self,
        point: ScreenPoint,
        tester: &dyn HitTester,
        camera: &Transform,
    ) -> Result<Option<&Anchor>, PlacementError> {
        let hits = tester.hit_test(point);
        let Some(hit) = hits.first() else {
            debug!(x = point.x, y = point.y, "Tap hit no surface");
            return Ok(None);
        };

        let mut transform = self.model;
        if let Err(e) = place_at_hit(
            &mut transform,
            hit,
            self.options.easing,
            self.options.apply_orientation,
        ) {
            warn!("Rejected hit result: {}", e);
            return Err(e);
        }
        if self.options.face_camera {
            let yaw = transform.yaw_towards(camera.position);
            transform.rotation = Quaternion::from_yaw(yaw);
        }

        let anchor = Anchor {
            id: self.next_id,
            transform,
            plane_id: hit.plane_id.clone(),
        };
        self.next_id += 1;
        info!(
            anchor = anchor.id,
            plane = ?anchor.plane_id,
            x = transform.position.x,
            y = transform.position.y,
            z = transform.position.z,
            "Placed model"
        );
        self.anchors.push(anchor);
        Ok(self.anchors.last())
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
    }
}
