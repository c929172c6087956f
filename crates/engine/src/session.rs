//! Session: one game plus the clocks that drive it.
//!
//! The session arms a tick timer and a level-dependent spawn timer on
//! [`Session::start`], applies due tasks in deadline order on
//! [`Session::advance`], and cancels both timers as soon as the game leaves the
//! playing phase. Key presses go through [`Session::press`].

use log::{debug, trace};

use crate::core::{GameSnapshot, GameState, InputOutcome};
use crate::scheduler::{Scheduler, SchedulerError, Task, TimerHandle, TimerQueue};
use crate::types::{GameEvent, GateType, LAST_KEY_FLASH_MS, TICK_MS};

#[derive(Debug, Clone)]
pub struct Session<S: Scheduler = TimerQueue> {
    state: GameState,
    scheduler: S,
    tick_timer: Option<TimerHandle>,
    spawn_timer: Option<TimerHandle>,
    /// Level the spawn timer's cadence was computed for.
    spawn_level: u32,
    last_key: Option<GateType>,
    last_key_timer: Option<TimerHandle>,
    /// Scheduler time of the last `start`; the game clock counts from here.
    started_at_ms: u64,
}

impl Session<TimerQueue> {
    pub fn new(seed: u32) -> Self {
        Self::with_parts(GameState::new(seed), TimerQueue::new())
    }
}

impl<S: Scheduler> Session<S> {
    pub fn with_parts(state: GameState, scheduler: S) -> Self {
        Self {
            state,
            scheduler,
            tick_timer: None,
            spawn_timer: None,
            spawn_level: 0,
            last_key: None,
            last_key_timer: None,
            started_at_ms: 0,
        }
    }

    /// Begin (or restart) a game and arm the tick and spawn clocks
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        self.stop_clocks();
        self.clear_last_key();
        self.state.start();
        self.started_at_ms = self.scheduler.now_ms();

        self.tick_timer = Some(self.scheduler.every(TICK_MS, Task::Tick)?);
        self.arm_spawn()?;
        Ok(())
    }

    /// Forward a mapped key press to the game
    ///
    /// While playing, the pressed kind is also shown as the last key until
    /// `LAST_KEY_FLASH_MS` passes without another press.
    pub fn press(&mut self, kind: GateType) -> Result<InputOutcome, SchedulerError> {
        if !self.state.is_playing() {
            return Ok(InputOutcome::Ignored);
        }

        let now = self.scheduler.now_ms().saturating_sub(self.started_at_ms);
        let outcome = self.state.handle_input_at(kind, now);

        if let Some(h) = self.last_key_timer.take() {
            self.scheduler.cancel(h);
        }
        self.last_key = Some(kind);
        self.last_key_timer = Some(self.scheduler.after(LAST_KEY_FLASH_MS, Task::ClearLastKey)?);

        self.sync_clocks()?;
        Ok(outcome)
    }

    /// Let `elapsed_ms` of simulated time pass, running every task that falls due
    pub fn advance(&mut self, elapsed_ms: u32) -> Result<(), SchedulerError> {
        self.scheduler.advance(elapsed_ms);
        while let Some(task) = self.scheduler.next_due() {
            trace!("t={}ms {:?}", self.scheduler.now_ms(), task);
            match task {
                Task::Tick => {
                    self.state.tick(TICK_MS);
                }
                Task::Spawn => {
                    self.state.spawn();
                }
                Task::ClearLastKey => {
                    self.last_key = None;
                    self.last_key_timer = None;
                }
            }
            self.sync_clocks()?;
        }
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn last_key(&self) -> Option<GateType> {
        self.last_key
    }

    /// Whether the tick and spawn clocks are running.
    pub fn clocks_running(&self) -> bool {
        let armed = |h: Option<TimerHandle>| h.is_some_and(|h| self.scheduler.is_armed(h));
        armed(self.tick_timer) && armed(self.spawn_timer)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn drain_events_into(&mut self, out: &mut Vec<GameEvent>) {
        self.state.drain_events_into(out);
    }

    /// Stop the clocks once the game is over; re-arm spawning on level change.
    fn sync_clocks(&mut self) -> Result<(), SchedulerError> {
        if !self.state.is_playing() {
            if self.tick_timer.is_some() || self.spawn_timer.is_some() {
                debug!("clocks stopped ({})", self.state.phase().as_str());
            }
            self.stop_clocks();
            return Ok(());
        }

        if self.spawn_level != self.state.level() {
            if let Some(h) = self.spawn_timer.take() {
                self.scheduler.cancel(h);
            }
            self.arm_spawn()?;
        }
        Ok(())
    }

    fn arm_spawn(&mut self) -> Result<(), SchedulerError> {
        let interval = self.state.spawn_interval_ms();
        self.spawn_timer = Some(self.scheduler.every(interval, Task::Spawn)?);
        self.spawn_level = self.state.level();
        debug!("spawn every {}ms at level {}", interval, self.spawn_level);
        Ok(())
    }

    fn stop_clocks(&mut self) {
        for h in [self.tick_timer.take(), self.spawn_timer.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(h);
        }
    }

    fn clear_last_key(&mut self) {
        if let Some(h) = self.last_key_timer.take() {
            self.scheduler.cancel(h);
        }
        self.last_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GamePhase, SPAWN_INTERVAL_FLOOR_MS};

    fn assert_send<T: Send>() {}

    #[test]
    fn session_is_send() {
        assert_send::<Session>();
    }

    #[test]
    fn new_session_is_idle() {
        let mut s = Session::new(1);
        assert_eq!(s.state().phase(), GamePhase::NotStarted);
        assert!(!s.clocks_running());

        s.advance(10_000).unwrap();
        assert!(s.state().entities().is_empty());
        assert_eq!(s.state().clock_ms(), 0);
    }

    #[test]
    fn start_arms_clocks() {
        let mut s = Session::new(1);
        s.start().unwrap();
        assert!(s.clocks_running());
        assert_eq!(s.scheduler().len(), 2);
    }

    #[test]
    fn ticks_follow_simulated_time() {
        let mut s = Session::new(1);
        s.start().unwrap();
        s.advance(500).unwrap();
        assert_eq!(s.state().clock_ms(), 500);
    }

    #[test]
    fn first_spawn_after_one_interval() {
        let mut s = Session::new(1);
        s.start().unwrap();

        s.advance(1899).unwrap();
        assert!(s.state().entities().is_empty());

        s.advance(1).unwrap();
        assert_eq!(s.state().entities().len(), 1);
    }

    #[test]
    fn restart_replaces_clocks() {
        let mut s = Session::new(1);
        s.start().unwrap();
        s.start().unwrap();
        assert_eq!(s.scheduler().len(), 2);
        assert!(s.clocks_running());
    }

    #[test]
    fn game_over_cancels_clocks() {
        let mut s = Session::new(1);
        s.start().unwrap();
        // Wrong key at zero ends the game.
        let wrong = s.press(GateType::Xnor).unwrap();
        assert_eq!(wrong, InputOutcome::Wrong);
        assert_eq!(s.state().phase(), GamePhase::GameOver);
        assert!(!s.clocks_running());

        let before = s.snapshot();
        s.advance(60_000).unwrap();
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn press_ignored_when_not_playing() {
        let mut s = Session::new(1);
        assert_eq!(s.press(GateType::And).unwrap(), InputOutcome::Ignored);
        assert_eq!(s.last_key(), None);
        assert!(s.scheduler().is_empty());
    }

    #[test]
    fn last_key_clears_after_flash() {
        let mut s = Session::new(1);
        s.start().unwrap();
        s.advance(1900).unwrap();
        let kind = s.state().entities()[0].kind;

        s.press(kind).unwrap();
        assert_eq!(s.last_key(), Some(kind));

        s.advance(LAST_KEY_FLASH_MS - 1).unwrap();
        assert_eq!(s.last_key(), Some(kind));
        s.advance(1).unwrap();
        assert_eq!(s.last_key(), None);
    }

    #[test]
    fn repeated_press_rearms_flash() {
        let mut s = Session::new(1);
        s.start().unwrap();
        s.advance(1900).unwrap();
        let kind = s.state().entities()[0].kind;

        s.press(kind).unwrap();
        s.advance(200).unwrap();
        // Second press is a wrong key (15 -> 10) and restarts the flash.
        s.press(kind).unwrap();
        s.advance(200).unwrap();
        assert_eq!(s.last_key(), Some(kind));
        s.advance(100).unwrap();
        assert_eq!(s.last_key(), None);
    }

    #[test]
    fn spawn_cadence_follows_level() {
        let mut state = GameState::new(9);
        state.start();
        let mut s = Session::with_parts(state, TimerQueue::new());
        s.start().unwrap();

        // Feed hits until the level rises.
        let mut guard = 0;
        while s.state().level() < 2 && guard < 10_000 {
            s.advance(TICK_MS).unwrap();
            if let Some(kind) = s.state().entities().iter().find(|g| !g.hit).map(|g| g.kind) {
                s.press(kind).unwrap();
            }
            guard += 1;
        }
        assert_eq!(s.state().level(), 2);
        assert!(s.clocks_running());
        assert_eq!(s.state().spawn_interval_ms(), 1800);
    }

    /// Match the oldest unmatched gate every tick until `level` is reached.
    fn play_to_level(s: &mut Session, level: u32) {
        let mut guard = 0;
        while s.state().level() < level && guard < 200_000 {
            s.advance(TICK_MS).unwrap();
            if let Some(kind) = s.state().entities().iter().find(|g| !g.hit).map(|g| g.kind) {
                s.press(kind).unwrap();
            }
            guard += 1;
        }
        assert_eq!(s.state().level(), level);
        assert!(s.state().is_playing());
    }

    #[test]
    fn spawn_cadence_bottoms_out_at_floor() {
        let mut s = Session::new(3);
        s.start().unwrap();
        play_to_level(&mut s, 20);
        assert_eq!(s.state().spawn_interval_ms(), SPAWN_INTERVAL_FLOOR_MS);

        // Nothing is pressed now, so the level stays put and every spawn
        // fits under the cap of 22.
        let before = s.state().stats().spawned;
        s.advance(1000).unwrap();
        assert_eq!(s.state().level(), 20);
        assert_eq!(
            s.state().stats().spawned - before,
            1000 / SPAWN_INTERVAL_FLOOR_MS
        );
    }

    #[test]
    fn hit_lingers_from_press_between_ticks() {
        let mut s = Session::new(1);
        s.start().unwrap();
        s.advance(1900).unwrap();
        let (id, kind) = {
            let g = s.state().entities()[0];
            (g.id, g.kind)
        };

        // 49ms after the tick at 1900ms.
        s.advance(49).unwrap();
        assert!(matches!(s.press(kind).unwrap(), InputOutcome::Hit { .. }));
        assert_eq!(s.state().entities()[0].hit_at_ms, Some(1949));

        // The tick at 2400ms is 451ms after the press.
        s.advance(451).unwrap();
        assert!(s.state().entities().iter().any(|g| g.id == id));

        // The tick at 2450ms is 501ms after it.
        s.advance(50).unwrap();
        assert!(s.state().entities().iter().all(|g| g.id != id));
    }

    #[test]
    fn game_clock_restarts_with_each_game() {
        let mut s = Session::new(1);
        s.start().unwrap();
        s.advance(725).unwrap();

        // Restart off the tick grid; presses are timed from this start.
        s.start().unwrap();
        s.advance(1900).unwrap();
        s.advance(10).unwrap();
        let kind = s.state().entities()[0].kind;
        s.press(kind).unwrap();
        assert_eq!(s.state().clock_ms(), 1900);
        assert_eq!(s.state().entities()[0].hit_at_ms, Some(1910));
    }

    #[test]
    fn events_drain_through_session() {
        let mut s = Session::new(1);
        s.start().unwrap();
        s.press(GateType::Or).unwrap();

        let mut events = Vec::new();
        s.drain_events_into(&mut events);
        assert_eq!(
            events,
            vec![
                GameEvent::Started,
                GameEvent::WrongKey { kind: GateType::Or },
                GameEvent::GameOver { score: 0 },
            ]
        );
    }
}
