//! In-memory scene graph

use std::collections::BTreeMap;

use super::{NodeId, PlaneNode, SceneGraph};

/// Keeps attached nodes in a map and counts attach / detach calls, so
/// callers can check that nothing is leaked.
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: BTreeMap<NodeId, PlaneNode>,
    next_id: u64,
    attached_total: u64,
    detached_total: u64,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached nodes in attach order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PlaneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn attached_total(&self) -> u64 {
        self.attached_total
    }

    pub fn detached_total(&self) -> u64 {
        self.detached_total
    }
}

impl SceneGraph for MemoryScene {
    fn attach(&mut self, node: PlaneNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.attached_total += 1;
        self.nodes.insert(id, node);
        id
    }

    fn detach(&mut self, id: NodeId) -> Option<PlaneNode> {
        let node = self.nodes.remove(&id)?;
        self.detached_total += 1;
        Some(node)
    }

    fn node(&self, id: NodeId) -> Option<&PlaneNode> {
        self.nodes.get(&id)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
