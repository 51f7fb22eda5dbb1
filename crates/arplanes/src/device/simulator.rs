//! Simulated plane-tracking device for development without AR hardware
//!
//! Holds a set of planes and a camera pose. Scripted changes to the plane
//! set are pushed to subscribers as batched notifications, and screen taps
//! are ray-cast against the current planes.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::{PlaneEvent, PlaneEventKind, PlaneHandler, PlaneSource, SubscriptionId};
use crate::config::DeviceConfig;
use crate::error::DeviceError;
use crate::hit::{HitResult, HitTester, ScreenPoint};
use crate::plane::{Plane, PlaneId};
use crate::spatial::{Matrix4, Transform, Vec3};

const PARALLEL_EPSILON: f32 = 1e-6;

pub struct SimulatedDevice {
    subscribers: Vec<(SubscriptionId, PlaneEventKind, PlaneHandler)>,
    next_subscription: u64,
    planes: BTreeMap<PlaneId, Plane>,
    /// Camera pose in world space, looking along its local -Z
    camera: Transform,
    /// Vertical field of view in radians
    vertical_fov: f32,
    /// Viewport width / height
    aspect: f32,
    connected: bool,
}

impl SimulatedDevice {
    /// Open the simulated device. `supported = false` behaves like a
    /// platform without plane tracking.
    pub fn connect(supported: bool) -> Result<Self, DeviceError> {
        Self::from_config(&DeviceConfig {
            available: supported,
            ..DeviceConfig::default()
        })
    }

    pub fn from_config(config: &DeviceConfig) -> Result<Self, DeviceError> {
        if !config.available {
            warn!("Plane tracking unavailable");
            return Err(DeviceError::Unavailable(
                "no plane-tracking source in this environment".into(),
            ));
        }
        info!(
            fov = config.vertical_fov_degrees,
            aspect = config.aspect,
            "Simulated device connected"
        );
        Ok(Self {
            subscribers: Vec::new(),
            next_subscription: 0,
            planes: BTreeMap::new(),
            camera: Transform::identity(),
            vertical_fov: config.vertical_fov_degrees.to_radians(),
            aspect: config.aspect,
            connected: true,
        })
    }

    pub fn camera(&self) -> &Transform {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Transform) {
        self.camera = camera;
    }

    /// Planes the device currently tracks, ordered by identifier
    pub fn tracked_planes(&self) -> impl Iterator<Item = &Plane> {
        self.planes.values()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn add_planes(&mut self, planes: Vec<Plane>) -> Result<(), DeviceError> {
        self.ensure_connected()?;
        for plane in &planes {
            self.planes.insert(plane.id.clone(), plane.clone());
        }
        self.emit(PlaneEvent::Added(planes));
        Ok(())
    }

    pub fn update_planes(&mut self, planes: Vec<Plane>) -> Result<(), DeviceError> {
        self.ensure_connected()?;
        for plane in &planes {
            self.planes.insert(plane.id.clone(), plane.clone());
        }
        self.emit(PlaneEvent::Updated(planes));
        Ok(())
    }

    pub fn remove_planes(&mut self, ids: Vec<PlaneId>) -> Result<(), DeviceError> {
        self.ensure_connected()?;
        for id in &ids {
            self.planes.remove(id);
        }
        self.emit(PlaneEvent::Removed(ids));
        Ok(())
    }

    /// Drop tracking; later changes fail with [`DeviceError::Disconnected`]
    pub fn disconnect(&mut self) {
        info!("Simulated device disconnected");
        self.connected = false;
        self.subscribers.clear();
    }

    fn ensure_connected(&self) -> Result<(), DeviceError> {
        if self.connected {
            Ok(())
        } else {
            Err(DeviceError::Disconnected("simulated device was closed".into()))
        }
    }

    fn emit(&mut self, event: PlaneEvent) {
        let kind = event.kind();
        debug!(?kind, batch = event.len(), "Dispatching plane notification");
        for (_, subscribed, handler) in self.subscribers.iter_mut() {
            if *subscribed == kind {
                handler(&event);
            }
        }
    }

    /// World-space ray through a normalized screen point
    fn ray(&self, point: ScreenPoint) -> (Vec3, Vec3) {
        let ndc_x = point.x * 2.0 - 1.0;
        let ndc_y = 1.0 - point.y * 2.0;
        let tan = (self.vertical_fov * 0.5).tan();
        let local = Vec3::new(ndc_x * tan * self.aspect, ndc_y * tan, -1.0);
        (self.camera.position, self.camera.rotation.rotate(local).normalize())
    }

    fn intersect(&self, plane: &Plane, origin: Vec3, dir: Vec3) -> Option<HitResult> {
        let m = &plane.model_matrix;
        let normal = m.transform_vector(Vec3::UP).normalize();
        let denom = normal.dot(&dir);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let center = m.translation();
        let t = normal.dot(&(center - origin)) / denom;
        if !t.is_finite() || t <= 0.0 {
            return None;
        }
        let hit = origin + dir * t;

        // back into the plane's local x/z
        let u = m.transform_vector(Vec3::new(1.0, 0.0, 0.0));
        let w = m.transform_vector(Vec3::new(0.0, 0.0, 1.0));
        let d = hit - center;
        let local_x = d.dot(&u) / u.dot(&u);
        let local_z = d.dot(&w) / w.dot(&w);

        let boundary: Vec<(f32, f32)> = plane.points().map(|p| (p.x, p.z)).collect();
        if !polygon_contains(&boundary, local_x, local_z) {
            return None;
        }

        let pose = Transform {
            position: hit,
            rotation: m.decompose().rotation,
            scale: Vec3::ONE,
        };
        Some(HitResult {
            model_matrix: Matrix4::from_transform(&pose),
            distance: t,
            plane_id: Some(plane.id.clone()),
        })
    }
}

impl PlaneSource for SimulatedDevice {
    fn subscribe(&mut self, kind: PlaneEventKind, handler: PlaneHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, kind, handler));
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, _, _)| *id != subscription);
        self.subscribers.len() != before
    }
}

impl HitTester for SimulatedDevice {
    fn hit_test(&self, point: ScreenPoint) -> Vec<HitResult> {
        let (origin, dir) = self.ray(point);
        let mut hits: Vec<HitResult> = self
            .planes
            .values()
            .filter_map(|plane| self.intersect(plane, origin, dir))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        debug!(hits = hits.len(), "Hit test");
        hits
    }
}

/// Even-odd point-in-polygon test in 2D
fn polygon_contains(points: &[(f32, f32)], x: f32, y: f32) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
