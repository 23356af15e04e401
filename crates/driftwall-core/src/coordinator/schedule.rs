//! Tick-driven timers of the control loop
//!
//! All three count control ticks, not wall time, so tests can drive them
//! step by step.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::types::SlotId;

/// Random command scheduler
///
/// Arms a deadline drawn from the window, and fires a random command once
/// the clock reaches it.
pub struct Scheduler {
    window: RangeInclusive<u64>,
    command_max: u8,
    deadline: Option<u64>,
}

/// What the scheduler did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEvent {
    /// A new deadline was drawn
    Armed { deadline: u64 },
    /// Deadline pending
    Waiting { deadline: u64 },
    /// Deadline reached; this command should be written
    Fire { command: u8 },
}

impl Scheduler {
    pub fn new(window: RangeInclusive<u64>, command_max: u8) -> Self {
        Self {
            window,
            command_max,
            deadline: None,
        }
    }

    #[cfg(test)]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn poll(&mut self, clock: u64, rng: &mut impl Rng) -> ScheduleEvent {
        match self.deadline {
            None => {
                let deadline = clock.saturating_add(rng.gen_range(self.window.clone()));
                self.deadline = Some(deadline);
                ScheduleEvent::Armed { deadline }
            }
            Some(deadline) if clock >= deadline => {
                self.deadline = None;
                ScheduleEvent::Fire {
                    command: self.random_command(rng),
                }
            }
            Some(deadline) => ScheduleEvent::Waiting { deadline },
        }
    }

    /// Uniform draw from `[1, command_max]`
    pub fn random_command(&self, rng: &mut impl Rng) -> u8 {
        rng.gen_range(1..=self.command_max)
    }
}

/// Counts how long the same command has been sitting in the register
pub struct StuckGuard {
    limit: u64,
    value: Option<i32>,
    ticks: u64,
}

impl StuckGuard {
    pub fn new(limit: u64) -> Self {
        Self {
            limit: limit.max(1),
            value: None,
            ticks: 0,
        }
    }

    /// Record one more tick with `raw` in the register
    ///
    /// Returns `true` once the same value has been seen for `limit`
    /// consecutive ticks; the count starts over afterwards.
    pub fn observe(&mut self, raw: i32) -> bool {
        if self.value == Some(raw) {
            self.ticks += 1;
        } else {
            self.value = Some(raw);
            self.ticks = 1;
        }

        if self.ticks >= self.limit {
            self.reset();
            return true;
        }
        false
    }

    #[cfg(test)]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn reset(&mut self) {
        self.value = None;
        self.ticks = 0;
    }
}

/// A launch waiting for another attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retry {
    pub slot: SlotId,
    /// Attempts made so far
    pub attempts: u32,
    pub due: u64,
}

/// Failed launches with exponential backoff
pub struct RetryQueue {
    base: u64,
    cap: u64,
    pending: Vec<Retry>,
}

impl RetryQueue {
    pub fn new(base: u64, cap: u64) -> Self {
        Self {
            base,
            cap,
            pending: Vec::new(),
        }
    }

    /// Backoff after `attempts` failures: base, 2*base, 4*base ... up to cap
    pub fn delay(&self, attempts: u32) -> u64 {
        let shift = attempts.saturating_sub(1).min(63);
        self.base.saturating_mul(1u64 << shift).min(self.cap)
    }

    /// Schedule `slot` after its `attempts`-th failure, replacing any entry
    pub fn push(&mut self, slot: SlotId, attempts: u32, now: u64) -> u64 {
        self.cancel(slot);
        let due = now.saturating_add(self.delay(attempts));
        self.pending.push(Retry { slot, attempts, due });
        due
    }

    /// Remove and return every retry due at `now`, oldest first
    pub fn drain_due(&mut self, now: u64) -> Vec<Retry> {
        let (due, waiting): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|r| r.due <= now);
        self.pending = waiting;
        due
    }

    pub fn cancel(&mut self, slot: SlotId) {
        self.pending.retain(|r| r.slot != slot);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub fn contains(&self, slot: SlotId) -> bool {
        self.pending.iter().any(|r| r.slot == slot)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
