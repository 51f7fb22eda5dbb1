//! Bridge from device notifications to the plane registry

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, info};

use super::{PlaneEvent, PlaneEventKind, PlaneSource, SubscriptionId};
use crate::plane::PlaneRegistry;
use crate::scene::SceneGraph;

/// Apply one notification batch to a registry, in batch order.
///
/// - added: `upsert` each plane
/// - updated: release the old node and rebuild, keeping the plane's color
/// - removed: `remove` each identifier
pub fn apply_event<S: SceneGraph>(registry: &mut PlaneRegistry<S>, event: &PlaneEvent) {
    debug!(kind = ?event.kind(), batch = event.len(), "Plane notification");
    match event {
        PlaneEvent::Added(planes) => {
            for plane in planes {
                registry.upsert(plane);
            }
        }
        PlaneEvent::Updated(planes) => {
            for plane in planes {
                registry.update(plane);
            }
        }
        PlaneEvent::Removed(ids) => {
            for id in ids {
                registry.remove(id);
            }
        }
    }
}

/// Subscribes a shared registry to a [`PlaneSource`].
///
/// The registry lives behind `Rc<RefCell<_>>` because handlers are owned by
/// the source. Do not hold the guard from [`registry`](Self::registry)
/// while the source delivers notifications.
pub struct PlaneEventAdapter<S: SceneGraph + 'static> {
    registry: Rc<RefCell<PlaneRegistry<S>>>,
    subscriptions: Vec<SubscriptionId>,
}

impl<S: SceneGraph + 'static> PlaneEventAdapter<S> {
    pub fn new(registry: PlaneRegistry<S>) -> Self {
        Self {
            registry: Rc::new(RefCell::new(registry)),
            subscriptions: Vec::new(),
        }
    }

    /// Register handlers for all three notification kinds
    pub fn connect(&mut self, source: &mut dyn PlaneSource) {
        for kind in PlaneEventKind::ALL {
            let registry = Rc::clone(&self.registry);
            let subscription = source.subscribe(
                kind,
                Box::new(move |event: &PlaneEvent| {
                    apply_event(&mut registry.borrow_mut(), event);
                }),
            );
            self.subscriptions.push(subscription);
        }
        info!(subscriptions = self.subscriptions.len(), "Listening for plane notifications");
    }

    /// Remove every handler this adapter registered. Returns how many were removed.
    pub fn disconnect(&mut self, source: &mut dyn PlaneSource) -> usize {
        let removed = self
            .subscriptions
            .drain(..)
            .filter(|subscription| source.unsubscribe(*subscription))
            .count();
        info!(removed, "Stopped listening for plane notifications");
        removed
    }

    pub fn is_connected(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Feed a notification directly, bypassing any source
    pub fn handle(&self, event: &PlaneEvent) {
        apply_event(&mut self.registry.borrow_mut(), event);
    }

    pub fn registry(&self) -> Ref<'_, PlaneRegistry<S>> {
        self.registry.borrow()
    }
}
