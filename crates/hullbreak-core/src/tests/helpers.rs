//! Ship layouts and setup utilities shared by the cross-module tests.

use crate::arena::Arena;
use crate::config::ShipHealthConfig;
use crate::entity::EntityId;
use crate::event::{HealthEvent, HealthEventKind};
use crate::health::ShipHealth;
use crate::random::{RandomSource, ScriptedSource};
use crate::targeting::{NoTargets, TargetResolver, TargetTable, TargetWeight};

// =============================================================================
// Layouts
// =============================================================================

/// Hull of 100 with shields (50/100) and engines (30/30).
pub fn frigate() -> ShipHealthConfig {
    ShipHealthConfig::new()
        .with_hull(100, 100)
        .with_module("shields", 50, 100)
        .with_module("engines", 30, 30)
}

/// Shields (50/100) and engines (30/30), no hull.
pub fn drone() -> ShipHealthConfig {
    ShipHealthConfig::new()
        .with_module("shields", 50, 100)
        .with_module("engines", 30, 30)
}

/// Hull of 100 with two 80-point guns.
pub fn gunboat() -> ShipHealthConfig {
    ShipHealthConfig::new()
        .with_hull(100, 100)
        .with_module("gun1", 80, 80)
        .with_module("gun2", 80, 80)
}

/// Targets for [`gunboat`]: a split turret array and the bow gun alone.
pub fn gunboat_targets() -> TargetTable {
    TargetTable::new()
        .with_target(
            "turret_array",
            vec![TargetWeight::new("gun1", 50), TargetWeight::new("gun2", 50)],
        )
        .with_target("bow", vec![TargetWeight::new("gun1", 100)])
}

// =============================================================================
// Setup
// =============================================================================

/// A spawned and initialized ship plus an attacker in a fresh arena.
pub struct Engagement<R, T> {
    pub health: ShipHealth<R, T>,
    pub arena: Arena,
    pub ship: EntityId,
    pub attacker: EntityId,
}

/// Routes engine logs to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Builds an engagement for any layout, source, and resolver.
pub fn engage<R, T>(config: ShipHealthConfig, rng: R, targets: T) -> Engagement<R, T>
where
    R: RandomSource,
    T: TargetResolver,
{
    init_tracing();
    let health = ShipHealth::new(config, rng, targets).expect("valid layout");
    let mut arena = Arena::with_journal();
    let ship = arena.spawn();
    let attacker = arena.spawn();
    health.init(&mut arena, ship).expect("ship spawned");
    Engagement {
        health,
        arena,
        ship,
        attacker,
    }
}

/// Builds an engagement whose draws replay `draws`.
pub fn scripted(config: ShipHealthConfig, draws: &[u32]) -> Engagement<ScriptedSource, NoTargets> {
    engage(config, ScriptedSource::new(draws.iter().copied()), NoTargets)
}

/// Kinds of every journaled event, draining the journal.
pub fn drain_kinds(arena: &mut Arena) -> Vec<HealthEventKind> {
    arena.take_events().iter().map(HealthEvent::kind).collect()
}
