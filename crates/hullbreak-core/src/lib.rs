//! # Hullbreak Core
//!
//! Modular ship health for space combat.
//!
//! A ship's health is spread over an optional hull (addressed as `"base"`)
//! and any number of named modules. Damage and repairs are either shared out
//! at random across all parts or aimed at a single part, and every change is
//! announced as a typed [`HealthEvent`].
//!
//! ## Architecture
//!
//! - **[`ShipHealth`]**: the allocation engine, queries, and kill
//! - **[`HealthWorld`]**: the seam to whatever owns entities and their stores
//! - **[`Arena`]**: an in-memory world with listeners and an event journal
//! - **[`RandomSource`]**: seeded (`ChaChaSource`) or scripted draws
//! - **[`TargetResolver`]**: maps named targets to weighted module lists
//!
//! ## Usage
//!
//! ```
//! use hullbreak_core::{Arena, ChaChaSource, HealthEventKind, NoTargets, ShipHealth, ShipHealthConfig};
//!
//! let config = ShipHealthConfig::new()
//!     .with_hull(200, 200)
//!     .with_module("shields", 80, 100);
//! let mut health = ShipHealth::new(config, ChaChaSource::new(7), NoTargets)?;
//!
//! let mut arena = Arena::new();
//! let ship = arena.spawn();
//! let attacker = arena.spawn();
//! health.init(&mut arena, ship)?;
//!
//! arena.subscribe(ship, HealthEventKind::Killed, |event| println!("{event:?}"));
//! let outcome = health.damage(&mut arena, ship, attacker, 120)?;
//! assert!(outcome.is_positive());
//! assert!(health.health(&arena, ship)? < health.max_health());
//! # Ok::<(), hullbreak_core::HealthError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ability;
pub mod arena;
pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod health;
pub mod outcome;
pub mod random;
pub mod store;
pub mod targeting;
pub mod world;

pub use ability::Ability;
pub use arena::Arena;
pub use config::{HullConfig, ModuleDef, ShipHealthConfig};
pub use entity::EntityId;
pub use error::{HealthError, Result};
pub use event::{EventHub, HealthEvent, HealthEventKind, Scope, SubscriptionId};
pub use health::ShipHealth;
pub use outcome::Outcome;
pub use random::{ChaChaSource, RandomSource, ScriptedSource};
pub use store::{HealthStore, MemoryStore, StoreKey};
pub use targeting::{NoTargets, TargetResolver, TargetTable, TargetWeight};
pub use world::HealthWorld;

#[cfg(test)]
mod tests;
