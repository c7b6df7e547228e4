//! Entity identity for health-bearing objects.
//!
//! The health core never owns entities. It addresses them by [`EntityId`] and
//! reaches their state through a [`HealthWorld`](crate::world::HealthWorld).
//!
//! # Example
//!
//! ```
//! use hullbreak_core::entity::EntityId;
//!
//! let id1 = EntityId::new(1);
//! let id2 = EntityId::new(2);
//!
//! assert!(id1 < id2);
//! assert_eq!(id1.as_u64(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an entity.
///
/// `EntityId` is a newtype wrapper around `u64`. Entity IDs are immutable once
/// assigned and must be unique within a world.
///
/// # Ordering
///
/// Entity IDs are ordered by their numeric value, which keeps per-entity
/// storage iteration deterministic.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
