//! Integration tests for full games driven through `Session` with simulated time.

use tui_gates::core::InputOutcome;
use tui_gates::engine::Session;
use tui_gates::types::{GameEvent, GamePhase, GateType, MISS_PENALTY, TICK_MS};

/// First spawn at level 1 happens one 1900ms interval after start.
const FIRST_SPAWN_MS: u32 = 1900;

fn started(seed: u32) -> Session {
    let mut s = Session::new(seed);
    s.start().unwrap();
    s
}

fn first_gate(s: &Session) -> (u32, GateType) {
    let g = s.state().entities()[0];
    (g.id, g.kind)
}

fn absent_kind(s: &Session) -> GateType {
    GateType::ALL
        .into_iter()
        .find(|k| !s.state().entities().iter().any(|g| g.kind == *k && !g.hit))
        .unwrap()
}

#[test]
fn test_fresh_start() {
    let s = started(12345);
    let snap = s.snapshot();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.level, 1);
    assert!(snap.entities.is_empty());
}

#[test]
fn test_early_hit_scores_fifteen() {
    let mut s = started(12345);
    s.advance(FIRST_SPAWN_MS).unwrap();
    let (id, kind) = first_gate(&s);

    assert_eq!(s.press(kind).unwrap(), InputOutcome::Hit { id, points: 15 });
    assert_eq!(s.state().score(), 15);
    assert!(s.state().entities()[0].hit);
}

#[test]
fn test_wrong_key_costs_penalty() {
    let mut s = started(12345);
    s.advance(FIRST_SPAWN_MS).unwrap();
    let (_, kind) = first_gate(&s);
    s.press(kind).unwrap();

    let other = absent_kind(&s);
    assert_eq!(s.press(other).unwrap(), InputOutcome::Wrong);
    assert_eq!(s.state().score(), 15 - MISS_PENALTY);
    assert_eq!(s.state().phase(), GamePhase::Playing);
}

#[test]
fn test_hit_gate_lingers_then_disappears() {
    let mut s = started(7);
    s.advance(FIRST_SPAWN_MS).unwrap();
    let (id, kind) = first_gate(&s);
    s.press(kind).unwrap();

    s.advance(450).unwrap();
    assert!(s.state().entities().iter().any(|g| g.id == id && g.hit));

    s.advance(TICK_MS).unwrap();
    assert!(s.state().entities().iter().all(|g| g.id != id));
    assert_eq!(s.state().score(), 15);
}

#[test]
fn test_spawns_stop_at_cap() {
    let mut s = started(3);
    // Three spawns fill the level 1 cap; the fourth cadence is skipped.
    s.advance(FIRST_SPAWN_MS * 4).unwrap();
    assert_eq!(s.state().entities().len(), 3);
    assert_eq!(s.state().stats().spawned, 3);
}

#[test]
fn test_idle_game_ends_on_first_miss() {
    let mut s = started(99);
    s.advance(60_000).unwrap();

    let snap = s.snapshot();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.stats.misses, 1);
    assert!(!s.clocks_running());

    let mut events = Vec::new();
    s.drain_events_into(&mut events);
    assert!(matches!(
        events.as_slice(),
        [GameEvent::Started, GameEvent::Missed { .. }, GameEvent::GameOver { score: 0 }]
    ));
}

#[test]
fn test_game_over_is_frozen_until_restart() {
    let mut s = started(5);
    s.press(GateType::And).unwrap();
    assert_eq!(s.state().phase(), GamePhase::GameOver);

    let frozen = s.snapshot();
    s.advance(10_000).unwrap();
    assert_eq!(s.press(GateType::Or).unwrap(), InputOutcome::Ignored);
    assert_eq!(s.snapshot(), frozen);

    s.start().unwrap();
    assert_eq!(s.state().phase(), GamePhase::Playing);
    assert_eq!(s.state().score(), 0);
    assert!(s.clocks_running());
}

#[test]
fn test_restart_keeps_ids_increasing() {
    let mut s = started(11);
    s.advance(FIRST_SPAWN_MS).unwrap();
    let (first, _) = first_gate(&s);

    s.start().unwrap();
    s.advance(FIRST_SPAWN_MS).unwrap();
    let (second, _) = first_gate(&s);
    assert!(second > first);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = started(2024);
    let mut b = started(2024);
    for _ in 0..4 {
        a.advance(FIRST_SPAWN_MS).unwrap();
        b.advance(FIRST_SPAWN_MS).unwrap();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_sessions_are_independent() {
    let mut a = started(1);
    let mut b = started(1);
    a.advance(FIRST_SPAWN_MS).unwrap();
    let (_, kind) = first_gate(&a);
    a.press(kind).unwrap();

    assert_eq!(a.state().score(), 15);
    assert_eq!(b.state().score(), 0);
    assert!(b.state().entities().is_empty());
    b.advance(FIRST_SPAWN_MS).unwrap();
    assert_eq!(b.state().entities().len(), 1);
}

#[test]
fn test_sessions_run_on_other_threads() {
    let handles: Vec<_> = (0..4u32)
        .map(|seed| {
            std::thread::spawn(move || {
                let mut s = started(seed);
                s.advance(60_000).unwrap();
                s.state().phase()
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), GamePhase::GameOver);
    }
}

#[test]
fn test_steady_player_levels_up() {
    let mut s = started(42);
    let mut guard = 0;
    while s.state().level() < 3 && guard < 50_000 {
        s.advance(TICK_MS).unwrap();
        let target = s
            .state()
            .entities()
            .iter()
            .find(|g| !g.hit)
            .map(|g| g.kind);
        if let Some(kind) = target {
            s.press(kind).unwrap();
        }
        guard += 1;
    }
    assert_eq!(s.state().level(), 3);
    assert_eq!(s.state().phase(), GamePhase::Playing);
    assert_eq!(s.state().spawn_interval_ms(), 1700);

    let mut events = Vec::new();
    s.drain_events_into(&mut events);
    let ups: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::LevelUp { level } => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(ups, vec![2, 3]);
}
