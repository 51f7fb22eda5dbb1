//! Scene graph abstraction that plane renderables are attached to
//!
//! The registry is the only writer: it attaches a node when a plane is
//! first seen or rebuilt and detaches it when the plane is replaced or
//! removed. Engines plug in by implementing [`SceneGraph`]; [`MemoryScene`]
//! is an in-process implementation for simulation and tests.

mod memory;

pub use crate::plane::{PlaneMesh, PlaneNode};
pub use memory::MemoryScene;

/// Handle to a node owned by a [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// A scene graph that owns renderable plane nodes
pub trait SceneGraph {
    /// Take ownership of a node and make it visible
    fn attach(&mut self, node: PlaneNode) -> NodeId;

    /// Remove a node from the visible set, handing it back to the caller.
    /// Unknown handles return `None`.
    fn detach(&mut self, id: NodeId) -> Option<PlaneNode>;

    /// Look up an attached node
    fn node(&self, id: NodeId) -> Option<&PlaneNode>;

    /// Number of attached nodes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
