//! In-memory world for health-bearing entities.
//!
//! The Arena is the reference [`HealthWorld`]. It provides:
//! - One [`MemoryStore`] per entity, in deterministic ID order (`BTreeMap`)
//! - Entity lifecycle (spawn/despawn)
//! - An [`EventHub`] for per-entity and global listeners
//! - An optional journal of published events, drained with `take_events()`
//!
//! Journaling is off by default. An arena built with
//! [`Arena::with_journal`] keeps every event until it is drained, so
//! long-running owners should call `take_events()` regularly.
//!
//! # Example
//!
//! ```
//! use hullbreak_core::arena::Arena;
//!
//! let mut arena = Arena::new();
//! let ship1 = arena.spawn();
//! let ship2 = arena.spawn();
//!
//! assert!(ship1 < ship2);
//! assert!(arena.get(ship1).is_some());
//! assert_eq!(arena.entity_count(), 2);
//! ```

use std::collections::BTreeMap;

use crate::entity::EntityId;
use crate::event::{EventHub, HealthEvent, HealthEventKind, Scope, SubscriptionId};
use crate::store::MemoryStore;
use crate::world::HealthWorld;

/// Container for entity stores and notification plumbing.
#[derive(Debug, Default)]
pub struct Arena {
    /// Monotonically increasing entity ID counter.
    next_id: u64,
    /// Per-entity health state.
    stores: BTreeMap<EntityId, MemoryStore>,
    /// Listener registry.
    events: EventHub,
    /// Whether published events are kept.
    journaling: bool,
    /// Every event published since the last drain, in order.
    journal: Vec<HealthEvent>,
}

impl Arena {
    /// Creates a new empty arena that does not journal events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty arena that journals every published event.
    #[must_use]
    pub fn with_journal() -> Self {
        Self {
            journaling: true,
            ..Self::default()
        }
    }

    /// Returns true if published events are journaled.
    #[must_use]
    pub fn is_journaling(&self) -> bool {
        self.journaling
    }

    /// Spawns an entity with an empty store and returns its ID.
    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.stores.insert(id, MemoryStore::new());
        id
    }

    /// Removes an entity, its store, and its entity-scoped listeners.
    ///
    /// Returns the removed store, if the entity existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<MemoryStore> {
        self.events.clear_entity(id);
        self.stores.remove(&id)
    }

    /// Returns the store of an entity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&MemoryStore> {
        self.stores.get(&id)
    }

    /// Returns the number of entities in the arena.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.stores.len()
    }

    /// Returns true if the arena has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Registers a listener on one entity.
    pub fn subscribe<F>(&mut self, entity: EntityId, kind: HealthEventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&HealthEvent) + Send + 'static,
    {
        self.events.subscribe(Scope::Entity(entity), kind, listener)
    }

    /// Registers a listener for every entity.
    pub fn subscribe_global<F>(&mut self, kind: HealthEventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&HealthEvent) + Send + 'static,
    {
        self.events.subscribe(Scope::Global, kind, listener)
    }

    /// Removes a listener registered through either scope.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Drains and returns all journaled events in publish order.
    pub fn take_events(&mut self) -> Vec<HealthEvent> {
        std::mem::take(&mut self.journal)
    }

    /// Returns the journaled events without draining them.
    #[must_use]
    pub fn events(&self) -> &[HealthEvent] {
        &self.journal
    }

    /// Returns the number of events currently in the journal.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.journal.len()
    }
}

impl HealthWorld for Arena {
    type Store = MemoryStore;

    fn store(&self, entity: EntityId) -> Option<&MemoryStore> {
        self.stores.get(&entity)
    }

    fn store_mut(&mut self, entity: EntityId) -> Option<&mut MemoryStore> {
        self.stores.get_mut(&entity)
    }

    fn publish(&mut self, event: HealthEvent) {
        self.events.publish(&event);
        if self.journaling {
            self.journal.push(event);
        }
    }
}
