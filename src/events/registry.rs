//! Observer registry for round events.
//!
//! Observers are plain closures receiving `&RoundEvent`. They see every
//! event in emission order and cannot reach back into the round.

use rustc_hash::FxHashMap;

use super::event::RoundEvent;

/// Handle returned by [`EventRegistry::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u32);

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observer({})", self.0)
    }
}

type Observer = Box<dyn FnMut(&RoundEvent)>;

/// Registered observers, dispatched in subscription order.
#[derive(Default)]
pub struct EventRegistry {
    observers: FxHashMap<ObserverId, Observer>,

    /// Subscription order, for stable dispatch.
    order: Vec<ObserverId>,

    next_id: u32,
}

impl EventRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer, returns its handle.
    pub fn subscribe(&mut self, observer: impl FnMut(&RoundEvent) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, Box::new(observer));
        self.order.push(id);
        id
    }

    /// Remove an observer. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        if self.observers.remove(&id).is_some() {
            self.order.retain(|&o| o != id);
            true
        } else {
            false
        }
    }

    /// Deliver each event to every observer.
    pub fn dispatch<'a>(&mut self, events: impl IntoIterator<Item = &'a RoundEvent>) {
        for event in events {
            for id in &self.order {
                if let Some(observer) = self.observers.get_mut(id) {
                    observer(event);
                }
            }
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Are there no observers?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("observers", &self.order)
            .field("next_id", &self.next_id)
            .finish()
    }
}
