//! Mirror of the device's detected planes as scene nodes
//!
//! Lifecycle per identifier:
//! - first sighting with a usable boundary: a color is drawn and a node attached
//! - update: the old node is detached, a new one built with the same color
//! - removal: the node is detached and the color assignment forgotten, so a
//!   re-added identifier draws a fresh color

use std::collections::HashMap;

use tracing::{debug, trace};

use super::palette::ColorPicker;
use super::{build_plane_node, MaterialStyle, Palette, Plane, PlaneId};
use crate::color::Color;
use crate::scene::{NodeId, SceneGraph};

/// Registry bookkeeping for one visible plane
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedPlane {
    pub id: PlaneId,
    pub node: NodeId,
    pub color: Color,
    pub triangle_count: usize,
}

/// Owns the scene graph and keeps exactly one node per tracked plane.
pub struct PlaneRegistry<S: SceneGraph> {
    scene: S,
    style: MaterialStyle,
    picker: ColorPicker,
    entries: HashMap<PlaneId, TrackedPlane>,
    colors: HashMap<PlaneId, Color>,
    color_draws: u64,
}

impl<S: SceneGraph> PlaneRegistry<S> {
    pub fn new(scene: S, palette: Palette, style: MaterialStyle) -> Self {
        Self {
            scene,
            style,
            picker: ColorPicker::new(palette),
            entries: HashMap::new(),
            colors: HashMap::new(),
            color_draws: 0,
        }
    }

    /// Build and attach a node for `plane`, replacing any node already
    /// tracked under its identifier.
    ///
    /// Planes without a usable boundary are skipped and leave an existing
    /// entry untouched. Returns the handle of the attached node.
    pub fn upsert(&mut self, plane: &Plane) -> Option<NodeId> {
        let stored = self.colors.get(&plane.id).copied();
        let background = stored.unwrap_or(self.style.background_color);
        let Some(mut node) = build_plane_node(plane, &self.style, background) else {
            debug!(
                plane = %plane.id,
                vertices = plane.vertex_count(),
                "Skipping plane without a usable boundary"
            );
            return None;
        };

        let color = match stored {
            Some(color) => {
                trace!(plane = %plane.id, %color, "Reusing plane color");
                color
            }
            None => {
                let color = self.assign_color(&plane.id);
                node.material.background_color = color;
                color
            }
        };
        let triangle_count = node.mesh.triangle_count();

        if let Some(previous) = self.entries.remove(&plane.id) {
            self.scene.detach(previous.node);
        }
        let node_id = self.scene.attach(node);
        debug!(
            plane = %plane.id,
            triangles = triangle_count,
            tracked = self.entries.len() + 1,
            "Plane attached"
        );

        self.entries.insert(
            plane.id.clone(),
            TrackedPlane {
                id: plane.id.clone(),
                node: node_id,
                color,
                triangle_count,
            },
        );
        Some(node_id)
    }

    /// Rebuild a plane from fresh device data: the old node is released
    /// before the new one is built, and the color assignment carries over.
    ///
    /// An update with no usable boundary leaves the plane without a node
    /// until a later update brings one.
    pub fn update(&mut self, plane: &Plane) -> Option<NodeId> {
        self.release(&plane.id);
        self.upsert(plane)
    }

    /// Stop tracking a plane: detach its node and forget its color.
    ///
    /// Unknown identifiers are ignored. Returns whether a node was detached.
    pub fn remove(&mut self, id: &PlaneId) -> bool {
        let released = self.release(id);
        if self.colors.remove(id).is_some() || released {
            debug!(plane = %id, tracked = self.entries.len(), "Plane removed");
        }
        released
    }

    /// Number of tracked planes
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, id: &PlaneId) -> Option<&TrackedPlane> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &PlaneId) -> bool {
        self.entries.contains_key(id)
    }

    /// Tracked planes in no particular order
    pub fn planes(&self) -> impl Iterator<Item = &TrackedPlane> {
        self.entries.values()
    }

    /// Color currently assigned to an identifier, tracked or not
    pub fn color_of(&self, id: &PlaneId) -> Option<Color> {
        self.colors.get(id).copied()
    }

    /// How many times a color has been drawn from the palette
    pub fn color_draws(&self) -> u64 {
        self.color_draws
    }

    pub fn palette(&self) -> &Palette {
        self.picker.palette()
    }

    pub fn style(&self) -> &MaterialStyle {
        &self.style
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Hand the scene back, dropping all bookkeeping
    pub fn into_scene(self) -> S {
        self.scene
    }

    fn assign_color(&mut self, id: &PlaneId) -> Color {
        let color = self.picker.draw();
        self.color_draws += 1;
        self.colors.insert(id.clone(), color);
        debug!(plane = %id, %color, "Assigned plane color");
        color
    }

    /// Drop the entry and its node, keeping the color assignment
    fn release(&mut self, id: &PlaneId) -> bool {
        match self.entries.remove(id) {
            Some(entry) => {
                self.scene.detach(entry.node);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::AssignmentStrategy;
    use crate::scene::MemoryScene;
    use crate::spatial::{Matrix4, Vec3};

    fn registry() -> PlaneRegistry<MemoryScene> {
        PlaneRegistry::new(MemoryScene::new(), Palette::round_robin(), MaterialStyle::default())
    }

    fn square(id: &str) -> Plane {
        Plane::new(
            id,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            Matrix4::IDENTITY,
        )
    }

    fn triangle(id: &str) -> Plane {
        Plane::new(
            id,
            vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0],
            Matrix4::from_translation(Vec3::new(0.0, -1.0, 0.0)),
        )
    }

    #[test]
    fn test_upsert_square() {
        let mut reg = registry();
        let node_id = reg.upsert(&square("p1")).unwrap();

        assert_eq!(reg.count(), 1);
        let node = reg.scene().node(node_id).unwrap();
        assert_eq!(node.mesh.triangles, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(reg.get(&"p1".into()).unwrap().triangle_count, 2);
    }

    #[test]
    fn test_empty_plane_skipped() {
        let mut reg = registry();
        assert!(reg.upsert(&Plane::new("p1", vec![], Matrix4::IDENTITY)).is_none());
        assert_eq!(reg.count(), 0);
        assert!(reg.scene().is_empty());
        assert_eq!(reg.color_draws(), 0);
        assert!(reg.color_of(&"p1".into()).is_none());
    }

    #[test]
    fn test_empty_upsert_keeps_existing_entry() {
        let mut reg = registry();
        let node_id = reg.upsert(&square("p1")).unwrap();
        assert!(reg.upsert(&Plane::new("p1", vec![], Matrix4::IDENTITY)).is_none());

        assert_eq!(reg.count(), 1);
        assert_eq!(reg.get(&"p1".into()).unwrap().node, node_id);
    }

    #[test]
    fn test_upsert_replaces_without_leaking() {
        let mut reg = registry();
        let first = reg.upsert(&square("p1")).unwrap();
        let second = reg.upsert(&triangle("p1")).unwrap();

        assert_ne!(first, second);
        assert_eq!(reg.count(), 1);
        assert_eq!(reg.scene().len(), 1);
        assert!(reg.scene().node(first).is_none());
        assert_eq!(reg.scene().detached_total(), 1);
        assert_eq!(reg.color_draws(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut reg = registry();
        reg.upsert(&square("p1"));
        reg.upsert(&square("p2"));

        assert!(reg.remove(&"p1".into()));
        assert!(!reg.remove(&"p1".into()));
        assert!(!reg.remove(&"never-seen".into()));

        assert_eq!(reg.count(), 1);
        assert!(reg.contains(&"p2".into()));
        assert_eq!(reg.scene().len(), 1);
        assert_eq!(reg.scene().detached_total(), 1);
    }

    #[test]
    fn test_update_keeps_color() {
        let mut reg = registry();
        reg.upsert(&square("p1"));
        reg.upsert(&square("p2"));
        let c1 = reg.get(&"p1".into()).unwrap().color;

        let node_id = reg.update(&triangle("p1")).unwrap();
        let entry = reg.get(&"p1".into()).unwrap();
        assert_eq!(entry.color, c1);
        assert_eq!(entry.triangle_count, 1);
        assert_eq!(reg.scene().node(node_id).unwrap().material.background_color, c1);
        assert_eq!(reg.color_draws(), 2);
    }

    #[test]
    fn test_update_to_empty_drops_node_keeps_color() {
        let mut reg = registry();
        reg.upsert(&square("p1"));
        let c1 = reg.color_of(&"p1".into()).unwrap();

        assert!(reg.update(&Plane::new("p1", vec![], Matrix4::IDENTITY)).is_none());
        assert_eq!(reg.count(), 0);
        assert!(reg.scene().is_empty());

        reg.update(&square("p1"));
        assert_eq!(reg.get(&"p1".into()).unwrap().color, c1);
        assert_eq!(reg.color_draws(), 1);
    }

    #[test]
    fn test_remove_then_readd_draws_new_color() {
        let mut reg = registry();
        reg.upsert(&square("p1"));
        let c1 = reg.color_of(&"p1".into()).unwrap();

        reg.remove(&"p1".into());
        assert!(reg.color_of(&"p1".into()).is_none());

        reg.upsert(&square("p1"));
        assert_eq!(reg.color_draws(), 2);
        // round robin guarantees the next palette entry
        assert_ne!(reg.get(&"p1".into()).unwrap().color, c1);
    }

    #[test]
    fn test_seeded_registries_agree() {
        let palette = Palette::new(
            crate::plane::MATERIAL_COLORS.to_vec(),
            AssignmentStrategy::Seeded { seed: 7 },
        )
        .unwrap();
        let mut a = PlaneRegistry::new(MemoryScene::new(), palette.clone(), MaterialStyle::default());
        let mut b = PlaneRegistry::new(MemoryScene::new(), palette, MaterialStyle::default());
        for i in 0..8 {
            let id = format!("p{i}");
            a.upsert(&square(&id));
            b.upsert(&square(&id));
            assert_eq!(a.color_of(&id.clone().into()), b.color_of(&id.into()));
        }
    }
}
