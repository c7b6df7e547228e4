//! Determinism verification tests.
//!
//! Two ships built from the same layout and seed must take identical damage
//! and repairs when fed identical calls. Replays depend on this.

use crate::event::HealthEvent;
use crate::random::ChaChaSource;
use crate::targeting::NoTargets;

use super::helpers::{engage, frigate};

/// Runs a fixed sequence of bulk operations and returns the journal.
fn run_battle(seed: u64) -> (Vec<HealthEvent>, u64) {
    let mut e = engage(frigate(), ChaChaSource::new(seed), NoTargets);
    for round in 0..20_u32 {
        if round % 3 == 2 {
            e.health
                .heal(&mut e.arena, e.ship, e.attacker, 40)
                .unwrap();
        } else {
            e.health
                .damage(&mut e.arena, e.ship, e.attacker, 25 + round)
                .unwrap();
        }
    }
    let health = e.health.health(&e.arena, e.ship).unwrap();
    (e.arena.take_events(), health)
}

#[test]
fn same_seed_same_battle() {
    let (events_a, health_a) = run_battle(42);
    let (events_b, health_b) = run_battle(42);
    assert_eq!(events_a, events_b);
    assert_eq!(health_a, health_b);
}

#[test]
fn different_seeds_diverge() {
    let (events_a, _) = run_battle(1);
    let (events_b, _) = run_battle(2);
    assert_ne!(events_a, events_b);
}

#[test]
fn journal_serializes_to_identical_json() {
    let (events_a, _) = run_battle(9);
    let (events_b, _) = run_battle(9);
    let json_a = serde_json::to_string(&events_a).unwrap();
    let json_b = serde_json::to_string(&events_b).unwrap();
    assert_eq!(json_a, json_b);
}
