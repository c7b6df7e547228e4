//! The seam between the health core and whatever owns the entities.
//!
//! The core never holds entity state itself. Every operation goes through a
//! [`HealthWorld`] to read and write an entity's [`HealthStore`] and to
//! publish notifications.
//!
//! # Invariants
//!
//! - A call has exclusive access to the target's store for its duration
//! - `publish` delivers synchronously; every listener has run when it returns

use crate::entity::EntityId;
use crate::event::HealthEvent;
use crate::store::HealthStore;

/// Access to per-entity stores and the notification sink.
pub trait HealthWorld {
    /// Concrete store attached to each entity.
    type Store: HealthStore;

    /// Store of `entity`, if the entity exists.
    fn store(&self, entity: EntityId) -> Option<&Self::Store>;

    /// Mutable store of `entity`, if the entity exists.
    fn store_mut(&mut self, entity: EntityId) -> Option<&mut Self::Store>;

    /// Delivers an event to the target's listeners and to global listeners.
    fn publish(&mut self, event: HealthEvent);
}
