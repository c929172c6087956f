//! Timer scheduling driven by simulated time.
//!
//! The game needs three clocks: the fixed tick, the level-dependent spawn
//! cadence and one-shot deferred work. Rather than owning callbacks, timers
//! carry a [`Task`] tag and the owner pulls due tasks one at a time with
//! [`Scheduler::next_due`], so a task may cancel or re-arm other timers before
//! they fire. Time only moves through [`Scheduler::advance`]; nothing here
//! reads a wall clock.

use std::fmt;

use arrayvec::ArrayVec;

/// Maximum timers a [`TimerQueue`] holds at once.
pub const MAX_TIMERS: usize = 8;

/// Work a timer asks the owner to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Tick,
    Spawn,
    ClearLastKey,
}

/// Cancellation handle returned when a timer is registered.
///
/// Handles are never reused, so cancelling a fired or already-cancelled
/// timer is a harmless no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    Full,
    ZeroInterval,
}

impl SchedulerError {
    pub fn code(self) -> &'static str {
        match self {
            SchedulerError::Full => "scheduler_full",
            SchedulerError::ZeroInterval => "zero_interval",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SchedulerError::Full => "no free timer slot",
            SchedulerError::ZeroInterval => "periodic timer needs a non-zero interval",
        }
    }
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for SchedulerError {}

/// Register periodic/deferred tasks and pull them as simulated time passes.
pub trait Scheduler {
    /// Fire `task` every `interval_ms`, first after one full interval.
    fn every(&mut self, interval_ms: u32, task: Task) -> Result<TimerHandle, SchedulerError>;

    /// Fire `task` once after `delay_ms`.
    fn after(&mut self, delay_ms: u32, task: Task) -> Result<TimerHandle, SchedulerError>;

    /// Drop a timer. Returns `false` if it was not armed.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    fn is_armed(&self, handle: TimerHandle) -> bool;

    /// Move the target time forward by `elapsed_ms`.
    fn advance(&mut self, elapsed_ms: u32);

    /// Pop the earliest task due at or before the target time.
    ///
    /// Ties fire in registration order. Returns `None` once nothing is due,
    /// at which point [`Scheduler::now_ms`] equals the target time.
    fn next_due(&mut self) -> Option<Task>;

    /// Current time: the deadline of the task being run, or the target time
    /// once drained.
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    handle: TimerHandle,
    task: Task,
    deadline_ms: u64,
    period_ms: Option<u32>,
    /// Registration order, refreshed on every periodic re-arm.
    seq: u64,
}

/// Fixed-capacity timer queue over simulated milliseconds.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    target_ms: u64,
    next_handle: u32,
    next_seq: u64,
    timers: ArrayVec<Timer, MAX_TIMERS>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of armed timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn insert(
        &mut self,
        delay_ms: u32,
        period_ms: Option<u32>,
        task: Task,
    ) -> Result<TimerHandle, SchedulerError> {
        if self.timers.is_full() {
            return Err(SchedulerError::Full);
        }
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        let seq = self.take_seq();
        self.timers.push(Timer {
            handle,
            task,
            deadline_ms: self.now_ms + delay_ms as u64,
            period_ms,
            seq,
        });
        Ok(handle)
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl Scheduler for TimerQueue {
    fn every(&mut self, interval_ms: u32, task: Task) -> Result<TimerHandle, SchedulerError> {
        if interval_ms == 0 {
            return Err(SchedulerError::ZeroInterval);
        }
        self.insert(interval_ms, Some(interval_ms), task)
    }

    fn after(&mut self, delay_ms: u32, task: Task) -> Result<TimerHandle, SchedulerError> {
        self.insert(delay_ms, None, task)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.timers.iter().position(|t| t.handle == handle) {
            Some(i) => {
                self.timers.remove(i);
                true
            }
            None => false,
        }
    }

    fn is_armed(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    fn advance(&mut self, elapsed_ms: u32) {
        self.target_ms = self.target_ms.max(self.now_ms) + elapsed_ms as u64;
    }

    fn next_due(&mut self) -> Option<Task> {
        let due = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= self.target_ms)
            .min_by_key(|(_, t)| (t.deadline_ms, t.seq))
            .map(|(i, _)| i);

        let Some(i) = due else {
            self.now_ms = self.target_ms;
            return None;
        };

        let timer = self.timers[i];
        self.now_ms = timer.deadline_ms;
        match timer.period_ms {
            Some(period) => {
                let seq = self.take_seq();
                let t = &mut self.timers[i];
                t.deadline_ms += period as u64;
                t.seq = seq;
            }
            None => {
                self.timers.remove(i);
            }
        }
        Some(timer.task)
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(q: &mut TimerQueue) -> Vec<(u64, Task)> {
        let mut out = Vec::new();
        while let Some(task) = q.next_due() {
            out.push((q.now_ms(), task));
        }
        out
    }

    #[test]
    fn periodic_fires_once_per_interval() {
        let mut q = TimerQueue::new();
        q.every(50, Task::Tick).unwrap();

        q.advance(49);
        assert!(drain(&mut q).is_empty());
        assert_eq!(q.now_ms(), 49);

        q.advance(1);
        assert_eq!(drain(&mut q), vec![(50, Task::Tick)]);

        q.advance(120);
        assert_eq!(drain(&mut q), vec![(100, Task::Tick), (150, Task::Tick)]);
        assert_eq!(q.now_ms(), 170);
    }

    #[test]
    fn one_shot_fires_once() {
        let mut q = TimerQueue::new();
        let h = q.after(300, Task::ClearLastKey).unwrap();
        assert!(q.is_armed(h));

        q.advance(1000);
        assert_eq!(drain(&mut q), vec![(300, Task::ClearLastKey)]);
        assert!(!q.is_armed(h));
        assert!(q.is_empty());
    }

    #[test]
    fn due_tasks_fire_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.every(50, Task::Tick).unwrap();
        q.every(120, Task::Spawn).unwrap();

        q.advance(150);
        assert_eq!(
            drain(&mut q),
            vec![
                (50, Task::Tick),
                (100, Task::Tick),
                (120, Task::Spawn),
                (150, Task::Tick),
            ]
        );
    }

    #[test]
    fn ties_fire_in_registration_order() {
        let mut q = TimerQueue::new();
        q.every(100, Task::Spawn).unwrap();
        q.every(50, Task::Tick).unwrap();

        q.advance(100);
        // At t=100 the spawn timer was registered before the tick re-armed.
        assert_eq!(
            drain(&mut q),
            vec![(50, Task::Tick), (100, Task::Spawn), (100, Task::Tick)]
        );
    }

    #[test]
    fn cancel_stops_timer() {
        let mut q = TimerQueue::new();
        let tick = q.every(50, Task::Tick).unwrap();
        let spawn = q.every(60, Task::Spawn).unwrap();

        assert!(q.cancel(tick));
        assert!(!q.cancel(tick));

        q.advance(130);
        assert_eq!(drain(&mut q), vec![(60, Task::Spawn), (120, Task::Spawn)]);
        assert!(q.is_armed(spawn));
    }

    #[test]
    fn cancel_during_drain_prevents_later_fires() {
        let mut q = TimerQueue::new();
        let tick = q.every(50, Task::Tick).unwrap();

        q.advance(200);
        assert_eq!(q.next_due(), Some(Task::Tick));
        q.cancel(tick);
        assert_eq!(q.next_due(), None);
        assert_eq!(q.now_ms(), 200);
    }

    #[test]
    fn timers_registered_mid_drain_start_from_current_deadline() {
        let mut q = TimerQueue::new();
        q.every(50, Task::Tick).unwrap();
        q.advance(200);

        assert_eq!(q.next_due(), Some(Task::Tick));
        assert_eq!(q.now_ms(), 50);
        q.after(30, Task::ClearLastKey).unwrap();

        let rest = drain(&mut q);
        assert_eq!(
            rest,
            vec![
                (80, Task::ClearLastKey),
                (100, Task::Tick),
                (150, Task::Tick),
                (200, Task::Tick),
            ]
        );
    }

    #[test]
    fn handles_are_not_reused() {
        let mut q = TimerQueue::new();
        let a = q.after(10, Task::Spawn).unwrap();
        q.cancel(a);
        let b = q.after(10, Task::Spawn).unwrap();
        assert_ne!(a, b);
        assert!(!q.cancel(a));
        assert!(q.is_armed(b));
    }

    #[test]
    fn zero_interval_rejected() {
        let mut q = TimerQueue::new();
        assert_eq!(q.every(0, Task::Tick), Err(SchedulerError::ZeroInterval));
        // A zero delay one-shot is fine: it fires on the next drain.
        q.after(0, Task::ClearLastKey).unwrap();
        assert_eq!(q.next_due(), Some(Task::ClearLastKey));
    }

    #[test]
    fn full_queue_rejected() {
        let mut q = TimerQueue::new();
        for _ in 0..MAX_TIMERS {
            q.after(10, Task::Spawn).unwrap();
        }
        let err = q.after(10, Task::Spawn).unwrap_err();
        assert_eq!(err, SchedulerError::Full);
        assert_eq!(err.code(), "scheduler_full");
        assert_eq!(err.to_string(), "scheduler_full: no free timer slot");
    }
}
