//! Static configuration for a ship's health layout.
//!
//! A layout is an optional hull plus an ordered list of named modules. It is
//! supplied once, validated, and never changes afterwards.
//!
//! # Example
//!
//! ```
//! use hullbreak_core::config::ShipHealthConfig;
//!
//! let config = ShipHealthConfig::new()
//!     .with_hull(100, 100)
//!     .with_module("shields", 50, 100)
//!     .with_module("engines", 30, 30);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.modules.len(), 2);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HealthError, Result};
use crate::store::HULL_PART;

/// Sentinel that marks a hull field as disabled.
pub const DISABLED: i32 = -1;

/// One named sub-component with its own health pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDef {
    /// Unique module name (never `"base"`)
    pub name: String,
    /// Health written at `init`
    pub default_health: u32,
    /// Upper bound for healing
    pub max_health: u32,
}

impl ModuleDef {
    /// Creates a module definition.
    #[must_use]
    pub fn new(name: impl Into<String>, default_health: u32, max_health: u32) -> Self {
        Self {
            name: name.into(),
            default_health,
            max_health,
        }
    }
}

/// Hull health pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HullConfig {
    /// Health written at `init`
    pub default_health: u32,
    /// Upper bound for healing
    pub max_health: u32,
}

impl HullConfig {
    /// Creates a hull configuration.
    #[must_use]
    pub const fn new(default_health: u32, max_health: u32) -> Self {
        Self {
            default_health,
            max_health,
        }
    }

    /// Interprets a raw `(default, max)` pair where `(-1, -1)` disables the hull.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError::PartialHullSentinel`] when only one field is
    /// `-1`, and [`HealthError::InvalidHealthRange`] for any other negative
    /// value.
    pub fn from_raw(default_health: i32, max_health: i32) -> Result<Option<Self>> {
        match (default_health, max_health) {
            (DISABLED, DISABLED) => Ok(None),
            (DISABLED, _) | (_, DISABLED) => Err(HealthError::PartialHullSentinel {
                default: default_health,
                max: max_health,
            }),
            (default, max) => {
                let range_error = || HealthError::InvalidHealthRange {
                    part: HULL_PART.to_string(),
                    default: i64::from(default),
                    max: i64::from(max),
                };
                let default = u32::try_from(default).map_err(|_| range_error())?;
                let max = u32::try_from(max).map_err(|_| range_error())?;
                Ok(Some(Self::new(default, max)))
            }
        }
    }
}

/// Complete health layout for one kind of ship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipHealthConfig {
    /// Hull pool, `None` when the ship is modules only
    #[serde(default)]
    pub hull: Option<HullConfig>,
    /// Modules in processing order
    #[serde(default)]
    pub modules: Vec<ModuleDef>,
}

impl ShipHealthConfig {
    /// Creates an empty layout (no hull, no modules).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a layout from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError::Config`] on malformed JSON, or any validation
    /// error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the hull pool.
    #[must_use]
    pub fn with_hull(mut self, default_health: u32, max_health: u32) -> Self {
        self.hull = Some(HullConfig::new(default_health, max_health));
        self
    }

    /// Sets the hull from a raw pair, honoring the `(-1, -1)` sentinel.
    ///
    /// # Errors
    ///
    /// See [`HullConfig::from_raw`].
    pub fn with_raw_hull(mut self, default_health: i32, max_health: i32) -> Result<Self> {
        self.hull = HullConfig::from_raw(default_health, max_health)?;
        Ok(self)
    }

    /// Appends a module.
    #[must_use]
    pub fn with_module(
        mut self,
        name: impl Into<String>,
        default_health: u32,
        max_health: u32,
    ) -> Self {
        self.modules
            .push(ModuleDef::new(name, default_health, max_health));
        self
    }

    /// Returns true if the hull pool exists.
    #[must_use]
    pub fn hull_enabled(&self) -> bool {
        self.hull.is_some()
    }

    /// Checks the construction contract.
    ///
    /// # Errors
    ///
    /// - [`HealthError::ReservedModuleName`] if a module is named `"base"`
    /// - [`HealthError::DuplicateModule`] if two modules share a name
    /// - [`HealthError::InvalidHealthRange`] if any default exceeds its max
    pub fn validate(&self) -> Result<()> {
        if let Some(hull) = self.hull {
            if hull.default_health > hull.max_health {
                warn!(
                    default = hull.default_health,
                    max = hull.max_health,
                    "hull default health exceeds max"
                );
                return Err(HealthError::InvalidHealthRange {
                    part: HULL_PART.to_string(),
                    default: i64::from(hull.default_health),
                    max: i64::from(hull.max_health),
                });
            }
        }

        let mut seen = BTreeSet::new();
        for module in &self.modules {
            if module.name == HULL_PART {
                warn!("rejecting module named 'base'");
                return Err(HealthError::ReservedModuleName);
            }
            if !seen.insert(module.name.as_str()) {
                warn!(module = %module.name, "rejecting duplicate module");
                return Err(HealthError::DuplicateModule(module.name.clone()));
            }
            if module.default_health > module.max_health {
                warn!(module = %module.name, "module default health exceeds max");
                return Err(HealthError::InvalidHealthRange {
                    part: module.name.clone(),
                    default: i64::from(module.default_health),
                    max: i64::from(module.max_health),
                });
            }
        }
        Ok(())
    }
}
