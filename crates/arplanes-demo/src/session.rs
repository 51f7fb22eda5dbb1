//! Wiring between the simulated device, the registry and the placer

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use arplanes::hit::Anchor;
use arplanes::{
    ArPlanesConfig, Color, DeviceError, MemoryScene, ModelPlacer, PlaneEventAdapter, PlaneId,
    PlaneRegistry, SceneGraph, ScreenPoint, SimulatedDevice, Transform, Vec3,
};

use crate::script::{Step, VIEWPORT};

/// Placed models are a tenth of their authored size
const MODEL_SCALE: f32 = 0.1;

/// One tracked plane as shown in the overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaneSummary {
    pub id: PlaneId,
    pub color: Color,
    pub vertices: usize,
    pub triangles: usize,
}

/// State of the session after a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub tracked: usize,
    pub planes: Vec<PlaneSummary>,
    pub anchors: Vec<Anchor>,
}

pub struct Session {
    device: SimulatedDevice,
    adapter: PlaneEventAdapter<MemoryScene>,
    placer: ModelPlacer,
}

impl Session {
    pub fn connect(config: &ArPlanesConfig) -> Result<Self, DeviceError> {
        let mut device = SimulatedDevice::from_config(&config.device)?;
        let registry = PlaneRegistry::new(
            MemoryScene::new(),
            config.palette.clone(),
            config.material.clone(),
        );
        let mut adapter = PlaneEventAdapter::new(registry);
        adapter.connect(&mut device);

        let model = Transform {
            scale: Vec3::new(MODEL_SCALE, MODEL_SCALE, MODEL_SCALE),
            ..Transform::identity()
        };
        let placer = ModelPlacer::new(config.placement).with_model_transform(model);

        Ok(Self {
            device,
            adapter,
            placer,
        })
    }

    pub fn apply(&mut self, step: Step) -> Result<()> {
        match step {
            Step::Added(planes) => self.device.add_planes(planes)?,
            Step::Updated(planes) => self.device.update_planes(planes)?,
            Step::Removed(ids) => self.device.remove_planes(ids)?,
            Step::Camera(camera) => {
                debug!(
                    x = camera.position.x,
                    y = camera.position.y,
                    z = camera.position.z,
                    "Camera moved"
                );
                self.device.set_camera(camera);
            }
            Step::Tap { x, y } => {
                let (width, height) = VIEWPORT;
                let point = ScreenPoint::normalized(x, y, width, height)
                    .context("Viewport has no area")?;
                let camera = *self.device.camera();
                let placed = self.placer.handle_tap(point, &self.device, &camera)?;
                if placed.is_none() {
                    info!(x, y, "Tap did not land on a tracked plane");
                }
            }
        }
        Ok(())
    }

    pub fn run(&mut self, script: Vec<Step>) -> Result<()> {
        for (index, step) in script.into_iter().enumerate() {
            self.apply(step)
                .with_context(|| format!("Session step {} failed", index))?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let registry = self.adapter.registry();
        let mut planes: Vec<PlaneSummary> = registry
            .planes()
            .map(|entry| PlaneSummary {
                id: entry.id.clone(),
                color: entry.color,
                vertices: registry
                    .scene()
                    .node(entry.node)
                    .map_or(0, |node| node.mesh.vertex_count()),
                triangles: entry.triangle_count,
            })
            .collect();
        planes.sort_by(|a, b| a.id.cmp(&b.id));

        SessionSnapshot {
            tracked: registry.count(),
            planes,
            anchors: self.placer.anchors().to_vec(),
        }
    }

    /// Unsubscribe from the device and close it
    pub fn shutdown(mut self) {
        let removed = self.adapter.disconnect(&mut self.device);
        self.device.disconnect();
        info!(removed, "Session closed");
    }
}
