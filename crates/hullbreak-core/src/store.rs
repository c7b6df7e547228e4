//! Per-entity health storage.
//!
//! The core depends only on the narrow [`HealthStore`] capability: read a
//! part's current health, write it back. Keys are built by [`StoreKey`] and
//! always take the shape `"shiphealthability." + part`, where `part` is
//! `"base"` for the hull or a module name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every health key.
pub const KEY_PREFIX: &str = "shiphealthability.";

/// Part name addressing the hull.
pub const HULL_PART: &str = "base";

/// Namespaced store key for one health part.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StoreKey(String);

impl StoreKey {
    /// Key for the named part.
    #[must_use]
    pub fn part(name: &str) -> Self {
        Self(format!("{KEY_PREFIX}{name}"))
    }

    /// Key for the hull.
    #[must_use]
    pub fn hull() -> Self {
        Self::part(HULL_PART)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keyed health state attached to one entity.
pub trait HealthStore {
    /// Current value under `key`, or `None` if never written.
    fn get(&self, key: &StoreKey) -> Option<u32>;

    /// Writes `value` under `key` and returns the value just written.
    fn set(&mut self, key: &StoreKey, value: u32) -> u32;
}

/// In-memory store with deterministic key order.
///
/// Counts every write so callers can check that an operation left storage
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    values: BTreeMap<StoreKey, u32>,
    #[serde(skip)]
    writes: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `set` calls since creation.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl HealthStore for MemoryStore {
    fn get(&self, key: &StoreKey) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &StoreKey, value: u32) -> u32 {
        self.writes += 1;
        self.values.insert(key.clone(), value);
        value
    }
}
