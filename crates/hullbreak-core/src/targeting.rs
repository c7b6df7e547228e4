//! Resolution of named targets into weighted module lists.
//!
//! A combat system aims at things like `"turret_array"`; the health core only
//! knows modules. A [`TargetResolver`] bridges the two by mapping a target
//! name to the modules it covers and the percentage of damage each takes.
//!
//! Any `Fn(&str) -> Vec<TargetWeight>` is a resolver. [`TargetTable`] is a
//! static, serde-loadable one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One module hit by a named target, with its share of the damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetWeight {
    /// Module name (may be `"base"` for the hull)
    pub module: String,
    /// Percentage of the incoming damage routed to this module
    pub weight_percent: u32,
}

impl TargetWeight {
    /// Creates a weighted entry.
    #[must_use]
    pub fn new(module: impl Into<String>, weight_percent: u32) -> Self {
        Self {
            module: module.into(),
            weight_percent,
        }
    }

    /// Damage routed to this module out of `damage`, rounded down.
    #[must_use]
    pub fn share_of(&self, damage: u32) -> u32 {
        let share = u64::from(damage) * u64::from(self.weight_percent) / 100;
        u32::try_from(share).unwrap_or(u32::MAX)
    }
}

/// Maps target names to weighted module lists.
pub trait TargetResolver {
    /// Modules covered by `target`, in the order they should be damaged.
    fn resolve(&self, target: &str) -> Vec<TargetWeight>;
}

impl<F> TargetResolver for F
where
    F: Fn(&str) -> Vec<TargetWeight>,
{
    fn resolve(&self, target: &str) -> Vec<TargetWeight> {
        self(target)
    }
}

/// Resolver that knows no targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargets;

impl TargetResolver for NoTargets {
    fn resolve(&self, _target: &str) -> Vec<TargetWeight> {
        Vec::new()
    }
}

/// Static lookup table of targets.
///
/// # Example
///
/// ```
/// use hullbreak_core::targeting::{TargetResolver, TargetTable, TargetWeight};
///
/// let table = TargetTable::new().with_target(
///     "turret_array",
///     vec![TargetWeight::new("gun1", 50), TargetWeight::new("gun2", 50)],
/// );
///
/// assert_eq!(table.resolve("turret_array").len(), 2);
/// assert!(table.resolve("bridge").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetTable {
    targets: BTreeMap<String, Vec<TargetWeight>>,
}

impl TargetTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a table from JSON of the form `{"name": [{"module": .., "weight_percent": ..}]}`.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError::Config`](crate::error::HealthError::Config) on
    /// malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds or replaces a target.
    #[must_use]
    pub fn with_target(mut self, name: impl Into<String>, weights: Vec<TargetWeight>) -> Self {
        self.targets.insert(name.into(), weights);
        self
    }

    /// Number of known targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if no targets are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl TargetResolver for TargetTable {
    fn resolve(&self, target: &str) -> Vec<TargetWeight> {
        self.targets.get(target).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_rounds_down() {
        assert_eq!(TargetWeight::new("gun", 50).share_of(100), 50);
        assert_eq!(TargetWeight::new("gun", 33).share_of(10), 3);
        assert_eq!(TargetWeight::new("gun", 0).share_of(100), 0);
    }

    #[test]
    fn share_saturates_on_huge_weights() {
        assert_eq!(TargetWeight::new("gun", u32::MAX).share_of(u32::MAX), u32::MAX);
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |name: &str| {
            if name == "bow" {
                vec![TargetWeight::new("gun1", 100)]
            } else {
                Vec::new()
            }
        };
        assert_eq!(resolver.resolve("bow").len(), 1);
        assert!(resolver.resolve("stern").is_empty());
    }

    #[test]
    fn no_targets_resolves_nothing() {
        assert!(NoTargets.resolve("anything").is_empty());
    }

    #[test]
    fn table_loads_from_json() {
        let json = r#"{
            "turret_array": [
                { "module": "gun1", "weight_percent": 50 },
                { "module": "gun2", "weight_percent": 50 }
            ]
        }"#;
        let table = TargetTable::from_json(json).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.resolve("turret_array"),
            vec![TargetWeight::new("gun1", 50), TargetWeight::new("gun2", 50)]
        );
    }
}
