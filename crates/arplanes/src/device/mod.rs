//! Device plane-tracking notifications
//!
//! A tracking source pushes three kinds of batched notifications: planes
//! added, planes updated and planes removed. Sources implement
//! [`PlaneSource`]; [`PlaneEventAdapter`] subscribes to all three and drives
//! a [`PlaneRegistry`](crate::plane::PlaneRegistry).

mod adapter;
mod simulator;

pub use adapter::{apply_event, PlaneEventAdapter};
pub use simulator::SimulatedDevice;

use crate::plane::{Plane, PlaneId};

/// Notification kinds a tracking source emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneEventKind {
    Added,
    Updated,
    Removed,
}

impl PlaneEventKind {
    pub const ALL: [PlaneEventKind; 3] = [
        PlaneEventKind::Added,
        PlaneEventKind::Updated,
        PlaneEventKind::Removed,
    ];
}

/// One batched notification, planes in the order the device reported them
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneEvent {
    Added(Vec<Plane>),
    Updated(Vec<Plane>),
    Removed(Vec<PlaneId>),
}

impl PlaneEvent {
    pub fn kind(&self) -> PlaneEventKind {
        match self {
            PlaneEvent::Added(_) => PlaneEventKind::Added,
            PlaneEvent::Updated(_) => PlaneEventKind::Updated,
            PlaneEvent::Removed(_) => PlaneEventKind::Removed,
        }
    }

    /// Number of planes or identifiers in the batch
    pub fn len(&self) -> usize {
        match self {
            PlaneEvent::Added(planes) | PlaneEvent::Updated(planes) => planes.len(),
            PlaneEvent::Removed(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Callback invoked with each notification of the subscribed kind
pub type PlaneHandler = Box<dyn FnMut(&PlaneEvent)>;

/// Token returned by [`PlaneSource::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A push-style source of plane notifications.
///
/// Handlers run on the caller's thread, synchronously, whenever the source
/// delivers a batch.
pub trait PlaneSource {
    /// Register `handler` for notifications of `kind`
    fn subscribe(&mut self, kind: PlaneEventKind, handler: PlaneHandler) -> SubscriptionId;

    /// Drop a handler. Returns `false` for unknown tokens.
    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool;
}
