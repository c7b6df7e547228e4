//! Modular ship health: an optional hull plus named modules.
//!
//! [`ShipHealth`] splits incoming damage and repairs across the hull and the
//! modules instead of a single hit-point pool, so a ship can lose its engines
//! while its shields hold.
//!
//! # Operations
//!
//! - **Bulk** ([`damage`](ShipHealth::damage), [`heal`](ShipHealth::heal)):
//!   a randomized 100-point percentage budget is shared out, hull first, then
//!   modules in configured order.
//! - **Direct** ([`damage_base`](ShipHealth::damage_base),
//!   [`damage_module`](ShipHealth::damage_module),
//!   [`damage_targeted`](ShipHealth::damage_targeted), and the heal
//!   counterparts): deterministic, one named part at a time.
//! - **Queries** and [`kill`](ShipHealth::kill).
//!
//! # Known Quirks
//!
//! These are kept on purpose; game balance may depend on them:
//! - Bulk heal caps the hull's gain at its *current* health, but a module's
//!   gain at its *missing* health.
//! - Modules skipped by a bulk pass are left out of the summed health that
//!   decides whether the ship was killed.
//! - `kill` reports whether any module still had health *after* zeroing,
//!   which is always false.
//!
//! # Example
//!
//! ```
//! use hullbreak_core::arena::Arena;
//! use hullbreak_core::config::ShipHealthConfig;
//! use hullbreak_core::health::ShipHealth;
//! use hullbreak_core::outcome::Outcome;
//! use hullbreak_core::random::ChaChaSource;
//! use hullbreak_core::targeting::NoTargets;
//!
//! let config = ShipHealthConfig::new()
//!     .with_module("shields", 50, 100)
//!     .with_module("engines", 30, 30);
//! let health = ShipHealth::new(config, ChaChaSource::new(42), NoTargets).unwrap();
//!
//! let mut arena = Arena::new();
//! let ship = arena.spawn();
//! let attacker = arena.spawn();
//! health.init(&mut arena, ship).unwrap();
//!
//! let outcome = health
//!     .damage_module(&mut arena, ship, attacker, "engines", 40)
//!     .unwrap();
//! assert_eq!(outcome, Outcome::Applied(30));
//! assert_eq!(health.health(&arena, ship).unwrap(), 50);
//! ```

use tracing::{debug, info, trace};

use crate::ability::Ability;
use crate::config::{ModuleDef, ShipHealthConfig};
use crate::entity::EntityId;
use crate::error::{HealthError, Result};
use crate::event::HealthEvent;
use crate::outcome::Outcome;
use crate::random::RandomSource;
use crate::store::{HealthStore, StoreKey, HULL_PART};
use crate::targeting::TargetResolver;
use crate::world::HealthWorld;

/// Size of the percentage budget shared out by one bulk pass.
pub const BUDGET: u32 = 100;

/// Smallest share the hull takes from a bulk damage pass.
pub const HULL_MIN_SHARE: u32 = 10;

/// A module definition with its precomputed store key.
#[derive(Debug, Clone)]
struct ModulePart {
    def: ModuleDef,
    key: StoreKey,
}

/// Health distribution over a hull and named modules.
///
/// `R` supplies the random draws for bulk operations and `T` resolves named
/// targets for [`damage_targeted`](Self::damage_targeted).
#[derive(Debug, Clone)]
pub struct ShipHealth<R, T> {
    config: ShipHealthConfig,
    hull_key: StoreKey,
    modules: Vec<ModulePart>,
    rng: R,
    targets: T,
}

/// `amount * pct / 100`, rounded down.
fn share(amount: u32, pct: u32) -> u32 {
    let scaled = u64::from(amount) * u64::from(pct) / u64::from(BUDGET);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Whole percentage of `amount` that `required` represents, rounded down.
fn percentage_of(required: u32, amount: u32) -> u64 {
    u64::from(required) * u64::from(BUDGET) / u64::from(amount)
}

fn read<W: HealthWorld>(world: &W, target: EntityId, key: &StoreKey) -> Result<u32> {
    let store = world
        .store(target)
        .ok_or(HealthError::UnknownEntity(target))?;
    store
        .get(key)
        .ok_or_else(|| HealthError::UninitializedPart {
            key: key.to_string(),
        })
}

fn write<W: HealthWorld>(world: &mut W, target: EntityId, key: &StoreKey, value: u32) -> Result<u32> {
    let store = world
        .store_mut(target)
        .ok_or(HealthError::UnknownEntity(target))?;
    Ok(store.set(key, value))
}

impl<R: RandomSource, T: TargetResolver> ShipHealth<R, T> {
    /// Creates the ability from a validated layout.
    ///
    /// # Errors
    ///
    /// Returns any error from [`ShipHealthConfig::validate`], most notably
    /// [`HealthError::ReservedModuleName`] for a module named `"base"`.
    pub fn new(config: ShipHealthConfig, rng: R, targets: T) -> Result<Self> {
        config.validate()?;
        let modules = config
            .modules
            .iter()
            .map(|def| ModulePart {
                def: def.clone(),
                key: StoreKey::part(&def.name),
            })
            .collect();
        Ok(Self {
            config,
            hull_key: StoreKey::hull(),
            modules,
            rng,
            targets,
        })
    }

    /// The layout this ability was built from.
    #[must_use]
    pub fn config(&self) -> &ShipHealthConfig {
        &self.config
    }

    /// Returns true if the ship has a hull pool.
    #[must_use]
    pub fn hull_enabled(&self) -> bool {
        self.config.hull.is_some()
    }

    fn find_module(&self, name: &str) -> Option<&ModulePart> {
        self.modules.iter().find(|module| module.def.name == name)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Writes every part's default health into the entity's store.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError::UnknownEntity`] if `entity` has no store.
    pub fn init<W: HealthWorld>(&self, world: &mut W, entity: EntityId) -> Result<()> {
        if let Some(hull) = self.config.hull {
            write(world, entity, &self.hull_key, hull.default_health)?;
        }
        for module in &self.modules {
            write(world, entity, &module.key, module.def.default_health)?;
        }
        info!(%entity, modules = self.modules.len(), "ship health initialized");
        Ok(())
    }

    /// Does nothing: store entries belong to the entity.
    pub fn destroy<W: HealthWorld>(&self, _world: &mut W, _entity: EntityId) {}

    // =========================================================================
    // Allocation Engine
    // =========================================================================

    /// Spreads `amount` damage over the hull and modules.
    ///
    /// The hull, when enabled, always takes a share drawn from
    /// `[HULL_MIN_SHARE, budget)`. Each module then draws from `[0, budget)`;
    /// a draw of 0 skips the module entirely. A `Damaged` summary is always
    /// published, followed by `Killed` if the hull fell or the summed health
    /// of the parts touched reached 0.
    ///
    /// Returns [`Outcome::NotApplicable`] without touching anything when the
    /// hull is already at 0.
    ///
    /// # Errors
    ///
    /// - [`HealthError::ZeroAmount`] if `amount` is 0
    /// - [`HealthError::UnknownEntity`] / [`HealthError::UninitializedPart`]
    ///   if the target's store is missing or was never initialized
    pub fn damage<W: HealthWorld>(
        &mut self,
        world: &mut W,
        target: EntityId,
        invoker: EntityId,
        amount: u32,
    ) -> Result<Outcome> {
        if amount == 0 {
            return Err(HealthError::ZeroAmount { operation: "damage" });
        }

        let mut budget = BUDGET;
        let mut total: u32 = 0;
        let mut health_after: u32 = 0;
        let mut killed = false;

        if self.config.hull.is_some() {
            let health = read(world, target, &self.hull_key)?;
            if health == 0 {
                debug!(%target, "bulk damage blocked by destroyed hull");
                return Ok(Outcome::NotApplicable);
            }

            let pct = self.rng.draw(HULL_MIN_SHARE, budget);
            trace!(%target, part = HULL_PART, pct, budget, "damage share drawn");
            budget -= pct;

            let applied = share(amount, pct).min(health);
            let remaining = write(world, target, &self.hull_key, health - applied)?;
            health_after = health_after.saturating_add(remaining);
            killed = applied == health;
            debug!(%target, applied, health = remaining, "hull damaged");

            world.publish(HealthEvent::HullDamaged {
                target,
                invoker,
                amount: applied,
                health: remaining,
            });
            total = total.saturating_add(applied);
        }

        for module in &self.modules {
            let pct = self.rng.draw(0, budget);
            trace!(%target, part = %module.def.name, pct, budget, "damage share drawn");
            if pct == 0 {
                continue;
            }
            budget -= pct;

            let health = read(world, target, &module.key)?;
            let applied = share(amount, pct).min(health);
            let remaining = write(world, target, &module.key, health - applied)?;
            health_after = health_after.saturating_add(remaining);
            debug!(%target, module = %module.def.name, applied, health = remaining, "module damaged");

            world.publish(HealthEvent::ModuleDamaged {
                target,
                invoker,
                module: module.def.name.clone(),
                amount: applied,
                health: remaining,
            });
            total = total.saturating_add(applied);

            if applied == health {
                world.publish(HealthEvent::ModuleKilled {
                    target,
                    module: module.def.name.clone(),
                });
            }
        }

        world.publish(HealthEvent::Damaged {
            target,
            invoker,
            amount: total,
            health: health_after,
        });
        if killed || health_after == 0 {
            info!(%target, %invoker, "ship killed by bulk damage");
            world.publish(HealthEvent::Killed { target });
        }
        Ok(Outcome::Applied(total))
    }

    /// Spreads `amount` repair over the hull and modules.
    ///
    /// Each part's share is drawn from `[0, min(missing%, budget))`, where
    /// `missing%` is the part's missing health as a percentage of `amount`.
    /// A draw of 0 skips the part. The hull's gain is capped at its current
    /// health; a module's at its missing health.
    ///
    /// Returns [`Outcome::NotApplicable`] with no events when the hull is at
    /// 0 or when nothing was repaired.
    ///
    /// # Errors
    ///
    /// - [`HealthError::ZeroAmount`] if `amount` is 0
    /// - [`HealthError::UnknownEntity`] / [`HealthError::UninitializedPart`]
    ///   if the target's store is missing or was never initialized
    pub fn heal<W: HealthWorld>(
        &mut self,
        world: &mut W,
        target: EntityId,
        invoker: EntityId,
        amount: u32,
    ) -> Result<Outcome> {
        if amount == 0 {
            return Err(HealthError::ZeroAmount { operation: "heal" });
        }

        let mut budget = BUDGET;
        let mut total: u32 = 0;
        let mut health_after: u32 = 0;

        if let Some(hull) = self.config.hull {
            let health = read(world, target, &self.hull_key)?;
            if health == 0 {
                debug!(%target, "bulk heal blocked by destroyed hull");
                return Ok(Outcome::NotApplicable);
            }

            let required = hull.max_health.saturating_sub(health);
            let pct = self.draw_heal_share(required, amount, budget);
            trace!(%target, part = HULL_PART, pct, budget, "heal share drawn");
            if pct > 0 {
                budget -= pct;
                let applied = share(amount, pct).min(health);
                let restored = write(world, target, &self.hull_key, health + applied)?;
                health_after = health_after.saturating_add(restored);
                debug!(%target, applied, health = restored, "hull healed");

                world.publish(HealthEvent::HullHealed {
                    target,
                    invoker,
                    amount: applied,
                    health: restored,
                });
                total = total.saturating_add(applied);
            }
        }

        for index in 0..self.modules.len() {
            let key = self.modules[index].key.clone();
            let max_health = self.modules[index].def.max_health;

            let health = read(world, target, &key)?;
            let required = max_health.saturating_sub(health);
            let pct = self.draw_heal_share(required, amount, budget);
            let name = &self.modules[index].def.name;
            trace!(%target, part = %name, pct, budget, "heal share drawn");
            if pct == 0 {
                continue;
            }
            budget -= pct;

            let applied = share(amount, pct).min(required);
            let restored = write(world, target, &key, health + applied)?;
            health_after = health_after.saturating_add(restored);
            debug!(%target, module = %name, applied, health = restored, "module healed");

            world.publish(HealthEvent::ModuleHealed {
                target,
                invoker,
                module: name.clone(),
                amount: applied,
                health: restored,
            });
            total = total.saturating_add(applied);
        }

        if total == 0 {
            return Ok(Outcome::NotApplicable);
        }
        world.publish(HealthEvent::Healed {
            target,
            invoker,
            amount: total,
            health: health_after,
        });
        Ok(Outcome::Applied(total))
    }

    /// Draws a heal share, or 0 without drawing when the range is empty.
    fn draw_heal_share(&mut self, required: u32, amount: u32, budget: u32) -> u32 {
        let ceiling = percentage_of(required, amount).min(u64::from(budget));
        match u32::try_from(ceiling) {
            Ok(ceiling) if ceiling > 0 => self.rng.draw(0, ceiling),
            _ => 0,
        }
    }

    // =========================================================================
    // Direct Access
    // =========================================================================

    /// Damages the hull directly.
    ///
    /// Returns [`Outcome::NotApplicable`] if the hull is disabled and
    /// [`Outcome::AlreadyDestroyed`] if it is already at 0. Publishes
    /// `HullDamaged`, then `Killed` if the hull reached 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the target's store is missing or uninitialized.
    pub fn damage_base<W: HealthWorld>(
        &self,
        world: &mut W,
        target: EntityId,
        invoker: EntityId,
        damage: u32,
    ) -> Result<Outcome> {
        if self.config.hull.is_none() {
            return Ok(Outcome::NotApplicable);
        }

        let health = read(world, target, &self.hull_key)?;
        if health == 0 {
            return Ok(Outcome::AlreadyDestroyed);
        }

        let applied = damage.min(health);
        let remaining = write(world, target, &self.hull_key, health - applied)?;
        debug!(%target, applied, health = remaining, "hull damaged");
        world.publish(HealthEvent::HullDamaged {
            target,
            invoker,
            amount: applied,
            health: remaining,
        });

        if applied == health {
            info!(%target, %invoker, "ship killed by hull damage");
            world.publish(HealthEvent::Killed { target });
        }
        Ok(Outcome::Applied(applied))
    }

    /// Repairs the hull directly, up to its max.
    ///
    /// Returns [`Outcome::NotApplicable`] if the hull is disabled, destroyed,
    /// or already at max.
    ///
    /// # Errors
    ///
    /// Returns an error if the target's store is missing or uninitialized.
    pub fn heal_base<W: HealthWorld>(
        &self,
        world: &mut W,
        target: EntityId,
        invoker: EntityId,
        heal: u32,
    ) -> Result<Outcome> {
        let Some(hull) = self.config.hull else {
            return Ok(Outcome::NotApplicable);
        };

        let health = read(world, target, &self.hull_key)?;
        if health == 0 {
            return Ok(Outcome::NotApplicable);
        }
        let required = hull.max_health.saturating_sub(health);
        if required == 0 {
            return Ok(Outcome::NotApplicable);
        }

        let applied = heal.min(required);
        let restored = write(world, target, &self.hull_key, health + applied)?;
        debug!(%target, applied, health = restored, "hull healed");
        world.publish(HealthEvent::HullHealed {
            target,
            invoker,
            amount: applied,
            health: restored,
        });
        Ok(Outcome::Applied(applied))
    }

    /// Damages one named part directly. `"base"` addresses the hull.
    ///
    /// Returns [`Outcome::NotApplicable`] for an unknown name (with no store
    /// write) and [`Outcome::AlreadyDestroyed`] if the module is at 0.
    /// Publishes `ModuleDamaged`, then `ModuleKilled` if the module reached 0.
    ///
    /// On a hull-less ship, every call except the `AlreadyDestroyed` one ends
    /// by publishing `Killed` if all modules are at 0. That includes calls
    /// naming an unknown module.
    ///
    /// # Errors
    ///
    /// Returns an error if the target's store is missing or uninitialized.
    pub fn damage_module<W: HealthWorld>(
        &self,
        world: &mut W,
        target: EntityId,
        invoker: EntityId,
        name: &str,
        damage: u32,
    ) -> Result<Outcome> {
        if name == HULL_PART {
            return self.damage_base(world, target, invoker, damage);
        }
        let Some(module) = self.find_module(name) else {
            self.publish_if_wrecked(world, target, invoker)?;
            return Ok(Outcome::NotApplicable);
        };

        let health = read(world, target, &module.key)?;
        if health == 0 {
            return Ok(Outcome::AlreadyDestroyed);
        }

        let applied = damage.min(health);
        let remaining = write(world, target, &module.key, health - applied)?;
        debug!(%target, module = name, applied, health = remaining, "module damaged");
        world.publish(HealthEvent::ModuleDamaged {
            target,
            invoker,
            module: module.def.name.clone(),
            amount: applied,
            health: remaining,
        });
        if applied == health {
            world.publish(HealthEvent::ModuleKilled {
                target,
                module: module.def.name.clone(),
            });
        }

        self.publish_if_wrecked(world, target, invoker)?;
        Ok(Outcome::Applied(applied))
    }

    /// Publishes `Killed` for a hull-less ship whose modules are all at 0.
    fn publish_if_wrecked<W: HealthWorld>(
        &self,
        world: &mut W,
        target: EntityId,
        invoker: EntityId,
    ) -> Result<()> {
        if !self.hull_enabled() && self.all_modules_destroyed(world, target)? {
            info!(%target, %invoker, "ship killed by module damage");
            world.publish(HealthEvent::Killed { target });
        }
        Ok(())
    }

    fn all_modules_destroyed<W: HealthWorld>(&self, world: &W, target: EntityId) -> Result<bool> {
        for module in &self.modules {
            if read(world, target, &module.key)? > 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Repairs one named part directly. `"base"` addresses the hull.
    ///
    /// Returns [`Outcome::NotApplicable`] for an unknown name or a module
    /// already at max. A destroyed module can be repaired.
    ///
    /// # Errors
    ///
    /// Returns an error if the target's store is missing or uninitialized.
    pub fn heal_module<W: HealthWorld>(
        &self,
        world: &mut W,
        target: EntityId,
        invoker: EntityId,
        name: &str,
        heal: u32,
    ) -> Result<Outcome> {
        if name == HULL_PART {
            return self.heal_base(world, target, invoker, heal);
        }
        let Some(module) = self.find_module(name) else {
            return Ok(Outcome::NotApplicable);
        };

        let health = read(world, target, &module.key)?;
        if health >= module.def.max_health {
            return Ok(Outcome::NotApplicable);
        }

        let applied = heal.min(module.def.max_health - health);
        let restored = write(world, target, &module.key, health + applied)?;
        debug!(%target, module = name, applied, health = restored, "module healed");
        world.publish(HealthEvent::ModuleHealed {
            target,
            invoker,
            module: module.def.name.clone(),
            amount: applied,
            health: restored,
        });
        Ok(Outcome::Applied(applied))
    }

    /// Damages the modules a named target resolves to.
    ///
    /// Each resolved module takes `damage * weight / 100` through
    /// [`damage_module`](Self::damage_module). Only positive applied amounts
    /// are summed; `NotApplicable` and `AlreadyDestroyed` contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `damage_module`.
    pub fn damage_targeted<W: HealthWorld>(
        &self,
        world: &mut W,
        target: EntityId,
        invoker: EntityId,
        name: &str,
        damage: u32,
    ) -> Result<u64> {
        let mut total: u64 = 0;
        for weight in self.targets.resolve(name) {
            let outcome =
                self.damage_module(world, target, invoker, &weight.module, weight.share_of(damage))?;
            if let Outcome::Applied(applied) = outcome {
                total += u64::from(applied);
            }
        }
        debug!(%target, target_name = name, total, "targeted damage applied");
        Ok(total)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of current health over the hull (if enabled) and every module.
    ///
    /// # Errors
    ///
    /// Returns an error if the target's store is missing or uninitialized.
    pub fn health<W: HealthWorld>(&self, world: &W, target: EntityId) -> Result<u64> {
        let mut total = match self.config.hull {
            Some(_) => u64::from(read(world, target, &self.hull_key)?),
            None => 0,
        };
        for module in &self.modules {
            total += u64::from(read(world, target, &module.key)?);
        }
        Ok(total)
    }

    /// Sum of max health over the hull (0 if disabled) and every module.
    #[must_use]
    pub fn max_health(&self) -> u64 {
        let hull = self
            .config
            .hull
            .map_or(0, |hull| u64::from(hull.max_health));
        self.modules
            .iter()
            .fold(hull, |total, module| total + u64::from(module.def.max_health))
    }

    /// Current hull health, or `None` if the hull is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the target's store is missing or uninitialized.
    pub fn base_health<W: HealthWorld>(&self, world: &W, target: EntityId) -> Result<Option<u32>> {
        match self.config.hull {
            Some(_) => read(world, target, &self.hull_key).map(Some),
            None => Ok(None),
        }
    }

    /// Max hull health, or `None` if the hull is disabled.
    #[must_use]
    pub fn base_max_health(&self) -> Option<u32> {
        self.config.hull.map(|hull| hull.max_health)
    }

    /// Current health of a named part, or `None` if it does not exist.
    ///
    /// `"base"` reads the hull.
    ///
    /// # Errors
    ///
    /// Returns an error if the target's store is missing or uninitialized.
    pub fn module_health<W: HealthWorld>(
        &self,
        world: &W,
        target: EntityId,
        name: &str,
    ) -> Result<Option<u32>> {
        if name == HULL_PART {
            return self.base_health(world, target);
        }
        match self.find_module(name) {
            Some(module) => read(world, target, &module.key).map(Some),
            None => Ok(None),
        }
    }

    /// Max health of a named module, or `None` if it does not exist.
    ///
    /// Unlike [`module_health`](Self::module_health), `"base"` is not an
    /// alias here; use [`base_max_health`](Self::base_max_health).
    #[must_use]
    pub fn max_module_health(&self, name: &str) -> Option<u32> {
        self.find_module(name).map(|module| module.def.max_health)
    }

    /// Module names in configured order.
    pub fn modules(&self) -> impl Iterator<Item = &str> + '_ {
        self.modules.iter().map(|module| module.def.name.as_str())
    }

    // =========================================================================
    // Kill
    // =========================================================================

    /// Zeroes the hull and every module.
    ///
    /// If the hull is enabled and already at 0, returns `false` and leaves
    /// the modules untouched. Otherwise returns whether any module still
    /// holds health after being written to 0, which is always `false`. No
    /// events are published.
    ///
    /// # Errors
    ///
    /// Returns an error if the target's store is missing or uninitialized.
    pub fn kill<W: HealthWorld>(&self, world: &mut W, target: EntityId) -> Result<bool> {
        if self.config.hull.is_some() {
            if read(world, target, &self.hull_key)? == 0 {
                return Ok(false);
            }
            write(world, target, &self.hull_key, 0)?;
        }

        let mut left: u64 = 0;
        for module in &self.modules {
            left += u64::from(write(world, target, &module.key, 0)?);
        }
        info!(%target, "ship health zeroed");
        Ok(left > 0)
    }
}

impl<W, R, T> Ability<W> for ShipHealth<R, T>
where
    W: HealthWorld,
    R: RandomSource,
    T: TargetResolver,
{
    fn name(&self) -> &'static str {
        "shiphealthability"
    }

    fn init(&self, world: &mut W, entity: EntityId) -> Result<()> {
        ShipHealth::init(self, world, entity)
    }

    fn destroy(&self, world: &mut W, entity: EntityId) {
        ShipHealth::destroy(self, world, entity);
    }
}
