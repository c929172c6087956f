//! Game state module - manages the complete game state
//!
//! This module ties together the falling gates, the RNG and scoring. It owns
//! the four transitions of a game: `start`, `spawn`, `tick` and `handle_input`.
//! Scheduling (when tick and spawn run) is left to the caller.

use log::{debug, info};

use crate::gate::FallingGate;
use crate::rng::SimpleRng;
use crate::scoring::{
    apply_penalty, entity_cap, hit_points, level_for_score, speed_for_level, spawn_interval_ms,
    Penalty,
};
use crate::snapshot::{GameSnapshot, GameStats, GateSnapshot};
use crate::types::*;

/// Pending notifications kept when nobody drains them; oldest are dropped.
const MAX_PENDING_EVENTS: usize = 64;

/// Room for the entity cap of the first several levels.
const INITIAL_ENTITY_CAPACITY: usize = 16;

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not playing; nothing changed.
    Ignored,
    /// The gate `id` was matched for `points`.
    Hit { id: u32, points: u32 },
    /// No unmatched gate of that kind; a penalty was applied.
    Wrong,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    phase: GamePhase,
    score: u32,
    level: u32,
    /// Gates in flight, in spawn order.
    entities: Vec<FallingGate>,
    /// Next gate id. Not reset by `start`, so ids are never reused.
    next_id: u32,
    rng: SimpleRng,
    seed: u32,
    /// Simulation time consumed by ticks since `start`.
    clock_ms: u64,
    /// Incremented on every mutation.
    revision: u64,
    stats: GameStats,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }

    /// Create a new game drawing spawns from `rng`
    pub fn with_rng(rng: SimpleRng) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            level: 1,
            entities: Vec::with_capacity(INITIAL_ENTITY_CAPACITY),
            next_id: 1,
            seed: rng.state(),
            rng,
            clock_ms: 0,
            revision: 0,
            stats: GameStats::default(),
            events: Vec::with_capacity(MAX_PENDING_EVENTS),
        }
    }

    /// Reset to a fresh game and begin playing
    ///
    /// Works from any phase. Lingering hit gates go away with the rest of the
    /// entities, so no removal is left pending.
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.level = 1;
        self.entities.clear();
        self.clock_ms = 0;
        self.stats = GameStats::default();
        self.events.clear();
        self.push_event(GameEvent::Started);
        self.bump();
        info!("game started (seed {}, first id {})", self.seed, self.next_id);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn entities(&self) -> &[FallingGate] {
        &self.entities
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    /// Gates allowed on screen at the current level
    pub fn entity_cap(&self) -> usize {
        entity_cap(self.level)
    }

    /// Spawn cadence at the current level
    pub fn spawn_interval_ms(&self) -> u32 {
        spawn_interval_ms(self.level)
    }

    /// Move pending notifications into `out` (appends; no allocation when
    /// `out` has capacity).
    pub fn drain_events_into(&mut self, out: &mut Vec<GameEvent>) {
        out.extend(self.events.drain(..));
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.revision = self.revision;
        out.clock_ms = self.clock_ms;
        out.seed = self.seed;
        out.entities.clear();
        out.entities
            .extend(self.entities.iter().map(GateSnapshot::from));
        out.stats = self.stats;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new gate at the top of the field
    ///
    /// Returns the new id, or `None` when not playing or at the level cap.
    pub fn spawn(&mut self) -> Option<u32> {
        if !self.is_playing() || self.entities.len() >= self.entity_cap() {
            return None;
        }

        let kind = self.rng.next_gate();
        let x = self.rng.next_spawn_x();
        let speed = speed_for_level(self.level);

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.entities.push(FallingGate::new(id, kind, x, speed));
        self.stats.spawned += 1;
        self.bump();

        debug!("spawned gate {} {} at x={:.1} speed={:.3}", id, kind, x, speed);
        Some(id)
    }

    /// Main game tick - move gates, retire them and update the level
    ///
    /// Gates move by their per-tick `speed` once per call; `elapsed_ms` only
    /// advances the clock used for hit lingering. Returns `false` when not
    /// playing.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.clock_ms += elapsed_ms as u64;
        for gate in &mut self.entities {
            gate.advance();
        }

        let now = self.clock_ms;
        let mut i = 0;
        while i < self.entities.len() {
            let gate = self.entities[i];
            if gate.linger_elapsed(now) {
                self.entities.remove(i);
                continue;
            }
            if gate.is_missed() {
                self.entities.remove(i);
                self.stats.misses += 1;
                debug!("gate {} {} missed", gate.id, gate.kind);
                self.push_event(GameEvent::Missed { kind: gate.kind });
                if !self.penalize() {
                    // Frozen from here on.
                    self.bump();
                    return true;
                }
                continue;
            }
            i += 1;
        }

        self.update_level();
        self.bump();
        true
    }

    /// Match a key press against the lowest unmatched gate of `kind`
    ///
    /// The press is taken to happen at the last tick. Use
    /// [`GameState::handle_input_at`] when the press time is known.
    pub fn handle_input(&mut self, kind: GateType) -> InputOutcome {
        self.handle_input_at(kind, self.clock_ms)
    }

    /// Like [`GameState::handle_input`], for a press at `now_ms` on the tick
    /// clock (milliseconds since `start`).
    ///
    /// A matched gate lingers `HIT_LINGER_MS` from `now_ms`. Times before the
    /// last tick are clamped to it.
    pub fn handle_input_at(&mut self, kind: GateType, now_ms: u64) -> InputOutcome {
        if !self.is_playing() {
            return InputOutcome::Ignored;
        }

        // Greatest y wins; on equal y the lower id does.
        let target = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, g)| g.kind == kind && !g.hit)
            .max_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(b.id.cmp(&a.id)))
            .map(|(i, _)| i);

        let outcome = match target {
            Some(i) => {
                let now = now_ms.max(self.clock_ms);
                let gate = &mut self.entities[i];
                let points = hit_points(gate.y);
                gate.mark_hit(now);
                let id = gate.id;

                self.score = self.score.saturating_add(points);
                self.stats.hits += 1;
                debug!("gate {} {} hit for {}", id, kind, points);
                self.push_event(GameEvent::Hit { kind, points });
                self.update_level();
                InputOutcome::Hit { id, points }
            }
            None => {
                self.stats.wrong_keys += 1;
                debug!("wrong key {}", kind);
                self.push_event(GameEvent::WrongKey { kind });
                self.penalize();
                InputOutcome::Wrong
            }
        };

        self.bump();
        outcome
    }

    /// Subtract one penalty. Returns `false` if that ended the game.
    fn penalize(&mut self) -> bool {
        match apply_penalty(self.score) {
            Penalty::Applied(score) => {
                self.score = score;
                true
            }
            Penalty::Exhausted => {
                self.score = 0;
                self.phase = GamePhase::GameOver;
                info!(
                    "game over at level {} ({} hits, {} misses, {} wrong keys)",
                    self.level, self.stats.hits, self.stats.misses, self.stats.wrong_keys
                );
                self.push_event(GameEvent::GameOver { score: self.score });
                false
            }
        }
    }

    /// Raise the level if the score qualifies; it never goes down.
    fn update_level(&mut self) {
        let qualified = level_for_score(self.score);
        if qualified > self.level {
            self.level = qualified;
            info!("level up: {}", self.level);
            self.push_event(GameEvent::LevelUp { level: self.level });
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
