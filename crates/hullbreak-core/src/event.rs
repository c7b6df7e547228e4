//! Health notifications and their dispatch.
//!
//! Every mutation publishes zero or more [`HealthEvent`]s. Events are
//! post-facto: listeners observe what happened and cannot veto or alter it.
//!
//! # Subscription Scopes
//!
//! The [`EventHub`] keeps two listener sets per [`HealthEventKind`]:
//! - [`Scope::Entity`]: fires only for events whose target is that entity
//! - [`Scope::Global`]: fires for every target
//!
//! Entity listeners run before global listeners; all of them run before
//! `publish` returns.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use hullbreak_core::entity::EntityId;
//! use hullbreak_core::event::{EventHub, HealthEvent, HealthEventKind, Scope};
//!
//! let kills = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&kills);
//!
//! let mut hub = EventHub::new();
//! hub.subscribe(Scope::Global, HealthEventKind::Killed, move |_event| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! hub.publish(&HealthEvent::Killed { target: EntityId::new(1) });
//! assert_eq!(kills.load(Ordering::SeqCst), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

// =============================================================================
// Event Types
// =============================================================================

/// Closed set of notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthEventKind {
    /// Hull took damage
    HullDamaged,
    /// Hull was repaired
    HullHealed,
    /// A module took damage
    ModuleDamaged,
    /// A module was repaired
    ModuleHealed,
    /// A module reached 0
    ModuleKilled,
    /// Aggregate damage summary
    Damaged,
    /// Aggregate heal summary
    Healed,
    /// The ship was destroyed
    Killed,
}

impl fmt::Display for HealthEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HullDamaged => write!(f, "HullDamaged"),
            Self::HullHealed => write!(f, "HullHealed"),
            Self::ModuleDamaged => write!(f, "ModuleDamaged"),
            Self::ModuleHealed => write!(f, "ModuleHealed"),
            Self::ModuleKilled => write!(f, "ModuleKilled"),
            Self::Damaged => write!(f, "Damaged"),
            Self::Healed => write!(f, "Healed"),
            Self::Killed => write!(f, "Killed"),
        }
    }
}

/// A health notification with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthEvent {
    /// Hull took damage.
    HullDamaged {
        /// Ship that was hit
        target: EntityId,
        /// Entity that caused the damage
        invoker: EntityId,
        /// Damage actually applied
        amount: u32,
        /// Hull health after the hit
        health: u32,
    },
    /// Hull was repaired.
    HullHealed {
        /// Ship that was repaired
        target: EntityId,
        /// Entity that caused the repair
        invoker: EntityId,
        /// Heal actually applied
        amount: u32,
        /// Hull health after the repair
        health: u32,
    },
    /// A module took damage.
    ModuleDamaged {
        /// Ship that was hit
        target: EntityId,
        /// Entity that caused the damage
        invoker: EntityId,
        /// Module that was hit
        module: String,
        /// Damage actually applied
        amount: u32,
        /// Module health after the hit
        health: u32,
    },
    /// A module was repaired.
    ModuleHealed {
        /// Ship that was repaired
        target: EntityId,
        /// Entity that caused the repair
        invoker: EntityId,
        /// Module that was repaired
        module: String,
        /// Heal actually applied
        amount: u32,
        /// Module health after the repair
        health: u32,
    },
    /// A module was destroyed.
    ModuleKilled {
        /// Ship owning the module
        target: EntityId,
        /// Module that was destroyed
        module: String,
    },
    /// Summary of a bulk damage pass.
    Damaged {
        /// Ship that was hit
        target: EntityId,
        /// Entity that caused the damage
        invoker: EntityId,
        /// Total damage applied
        amount: u32,
        /// Summed health of the parts touched by the pass
        health: u32,
    },
    /// Summary of a bulk heal pass.
    Healed {
        /// Ship that was repaired
        target: EntityId,
        /// Entity that caused the repair
        invoker: EntityId,
        /// Total heal applied
        amount: u32,
        /// Summed health of the parts touched by the pass
        health: u32,
    },
    /// The ship was destroyed.
    Killed {
        /// Ship that was destroyed
        target: EntityId,
    },
}

impl HealthEvent {
    /// Returns the kind tag of this event.
    #[must_use]
    pub const fn kind(&self) -> HealthEventKind {
        match self {
            Self::HullDamaged { .. } => HealthEventKind::HullDamaged,
            Self::HullHealed { .. } => HealthEventKind::HullHealed,
            Self::ModuleDamaged { .. } => HealthEventKind::ModuleDamaged,
            Self::ModuleHealed { .. } => HealthEventKind::ModuleHealed,
            Self::ModuleKilled { .. } => HealthEventKind::ModuleKilled,
            Self::Damaged { .. } => HealthEventKind::Damaged,
            Self::Healed { .. } => HealthEventKind::Healed,
            Self::Killed { .. } => HealthEventKind::Killed,
        }
    }

    /// Returns the ship this event concerns.
    #[must_use]
    pub const fn target(&self) -> EntityId {
        match self {
            Self::HullDamaged { target, .. }
            | Self::HullHealed { target, .. }
            | Self::ModuleDamaged { target, .. }
            | Self::ModuleHealed { target, .. }
            | Self::ModuleKilled { target, .. }
            | Self::Damaged { target, .. }
            | Self::Healed { target, .. }
            | Self::Killed { target } => *target,
        }
    }
}

// =============================================================================
// Event Hub
// =============================================================================

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Only events targeting this entity
    Entity(EntityId),
    /// Events for every entity
    Global,
}

/// Handle returned by [`EventHub::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&HealthEvent) + Send>;

struct Subscription {
    id: SubscriptionId,
    listener: Listener,
}

/// Typed multicast dispatch with per-entity and global scopes.
#[derive(Default)]
pub struct EventHub {
    listeners: BTreeMap<(Scope, HealthEventKind), Vec<Subscription>>,
    next_id: u64,
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl EventHub {
    /// Creates a hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind` within `scope`.
    pub fn subscribe<F>(&mut self, scope: Scope, kind: HealthEventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&HealthEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry((scope, kind))
            .or_default()
            .push(Subscription {
                id,
                listener: Box::new(listener),
            });
        id
    }

    /// Removes a listener. Returns true if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        for subscriptions in self.listeners.values_mut() {
            let before = subscriptions.len();
            subscriptions.retain(|sub| sub.id != id);
            removed |= subscriptions.len() != before;
        }
        self.listeners.retain(|_, subscriptions| !subscriptions.is_empty());
        removed
    }

    /// Drops every listener scoped to `entity`.
    pub fn clear_entity(&mut self, entity: EntityId) {
        self.listeners
            .retain(|(scope, _), _| *scope != Scope::Entity(entity));
    }

    /// Delivers `event` to the target's listeners, then to global listeners.
    pub fn publish(&mut self, event: &HealthEvent) {
        let kind = event.kind();
        for scope in [Scope::Entity(event.target()), Scope::Global] {
            if let Some(subscriptions) = self.listeners.get_mut(&(scope, kind)) {
                for sub in subscriptions.iter_mut() {
                    (sub.listener)(event);
                }
            }
        }
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Returns true if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn killed(id: u64) -> HealthEvent {
        HealthEvent::Killed {
            target: EntityId::new(id),
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&'static str) -> Listener) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handle = Arc::clone(&log);
        let make = move |tag: &'static str| -> Listener {
            let log = Arc::clone(&handle);
            Box::new(move |_event: &HealthEvent| log.lock().unwrap().push(tag.to_string()))
        };
        (log, make)
    }

    mod event_tests {
        use super::*;

        #[test]
        fn kind_matches_variant() {
            let event = HealthEvent::ModuleKilled {
                target: EntityId::new(1),
                module: "gun".to_string(),
            };
            assert_eq!(event.kind(), HealthEventKind::ModuleKilled);
            assert_eq!(event.target(), EntityId::new(1));
            assert_eq!(killed(4).kind(), HealthEventKind::Killed);
        }

        #[test]
        fn events_are_serializable() {
            let event = HealthEvent::Damaged {
                target: EntityId::new(2),
                invoker: EntityId::new(3),
                amount: 40,
                health: 60,
            };
            let json = serde_json::to_string(&event).unwrap();
            let back: HealthEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, back);
        }
    }

    mod hub_tests {
        use super::*;

        #[test]
        fn entity_scope_filters_by_target() {
            let (log, make) = recorder();
            let mut hub = EventHub::new();
            hub.subscribe(Scope::Entity(EntityId::new(1)), HealthEventKind::Killed, make("one"));

            hub.publish(&killed(2));
            assert!(log.lock().unwrap().is_empty());

            hub.publish(&killed(1));
            assert_eq!(*log.lock().unwrap(), vec!["one"]);
        }

        #[test]
        fn global_scope_sees_every_target() {
            let (log, make) = recorder();
            let mut hub = EventHub::new();
            hub.subscribe(Scope::Global, HealthEventKind::Killed, make("global"));

            hub.publish(&killed(1));
            hub.publish(&killed(2));
            assert_eq!(log.lock().unwrap().len(), 2);
        }

        #[test]
        fn entity_listeners_fire_before_global() {
            let (log, make) = recorder();
            let mut hub = EventHub::new();
            hub.subscribe(Scope::Global, HealthEventKind::Killed, make("global"));
            hub.subscribe(Scope::Entity(EntityId::new(1)), HealthEventKind::Killed, make("entity"));

            hub.publish(&killed(1));
            assert_eq!(*log.lock().unwrap(), vec!["entity", "global"]);
        }

        #[test]
        fn kind_filters_dispatch() {
            let (log, make) = recorder();
            let mut hub = EventHub::new();
            hub.subscribe(Scope::Global, HealthEventKind::Healed, make("healed"));

            hub.publish(&killed(1));
            assert!(log.lock().unwrap().is_empty());
        }

        #[test]
        fn unsubscribe_stops_delivery() {
            let (log, make) = recorder();
            let mut hub = EventHub::new();
            let id = hub.subscribe(Scope::Global, HealthEventKind::Killed, make("global"));
            assert_eq!(hub.len(), 1);

            assert!(hub.unsubscribe(id));
            assert!(!hub.unsubscribe(id));
            assert!(hub.is_empty());

            hub.publish(&killed(1));
            assert!(log.lock().unwrap().is_empty());
        }

        #[test]
        fn clear_entity_keeps_global_listeners() {
            let (_log, make) = recorder();
            let mut hub = EventHub::new();
            hub.subscribe(Scope::Entity(EntityId::new(1)), HealthEventKind::Killed, make("a"));
            hub.subscribe(Scope::Entity(EntityId::new(1)), HealthEventKind::Damaged, make("b"));
            hub.subscribe(Scope::Global, HealthEventKind::Killed, make("c"));

            hub.clear_entity(EntityId::new(1));
            assert_eq!(hub.len(), 1);
        }
    }
}
