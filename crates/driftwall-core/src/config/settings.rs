//! Configuration sections for the orchestrator
//!
//! Every section falls back to its defaults field by field, so a config file
//! only needs the values it changes:
//!
//! ```yaml
//! coordinator:
//!   seed: 42
//! pool:
//!   max_workers: 8
//! ```

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::SlotConfigError;
use crate::types::{SlotId, DEFAULT_HEIGHT, DEFAULT_WIDTH, NUM_SLOTS};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftwallConfig {
    pub coordinator: CoordinatorConfig,
    pub pool: PoolConfig,
    pub display: DisplayConfig,
    pub slots: SlotsConfig,
}

impl DriftwallConfig {
    /// Check the slot wiring against the command range
    pub fn validate(&self) -> Result<(), SlotConfigError> {
        let max = self.coordinator.command_max;
        if max == 0 || max > NUM_SLOTS {
            return Err(SlotConfigError::CommandRange { max, limit: NUM_SLOTS });
        }
        self.slots.validate(max)
    }
}

/// Control loop timing and scheduling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Tick budget in milliseconds (composite vs control split, worker cadence)
    pub tick_budget_ms: u64,
    /// Earliest scheduled command, in control ticks from when it is drawn
    pub deadline_min: u64,
    /// Latest scheduled command, in control ticks from when it is drawn
    pub deadline_max: u64,
    /// Random commands are drawn from `[1, command_max]`
    pub command_max: u8,
    /// Consecutive control ticks a non-stop command may sit in the register
    pub stuck_command_ticks: u64,
    /// First retry delay after a failed launch, in control ticks
    pub retry_base_ticks: u64,
    /// Upper bound for the doubling retry delay
    pub retry_max_ticks: u64,
    /// Relaunch active slots whose task panicked
    pub restart_crashed: bool,
    /// Fixed RNG seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            tick_budget_ms: 10,
            deadline_min: 100,
            deadline_max: 10_099,
            command_max: NUM_SLOTS,
            stuck_command_ticks: 1000,
            retry_base_ticks: 10,
            retry_max_ticks: 1000,
            restart_crashed: true,
            seed: None,
        }
    }
}

impl CoordinatorConfig {
    /// Tick budget, never zero
    pub fn tick_budget(&self) -> Duration {
        Duration::from_millis(self.tick_budget_ms.max(1))
    }

    /// Deadline window in control ticks, ordered and at least one tick ahead
    pub fn deadline_window(&self) -> RangeInclusive<u64> {
        let lo = self.deadline_min.min(self.deadline_max).max(1);
        let hi = self.deadline_min.max(self.deadline_max).max(lo);
        lo..=hi
    }

    /// Retry backoff bounds as `(base, cap)` with `1 <= base <= cap`
    pub fn retry_bounds(&self) -> (u64, u64) {
        let base = self.retry_base_ticks.max(1);
        (base, self.retry_max_ticks.max(base))
    }
}

/// Worker pool sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub max_workers: usize,
    pub max_queue_depth: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_workers: 64,
            max_queue_depth: 16192,
        }
    }
}

/// Output surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: usize,
    pub height: usize,
    /// Window title (ignored by the headless sink)
    pub title: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: "driftwall".to_string(),
        }
    }
}

/// Successor edge: when `from` terminates, `to` is launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handoff {
    pub from: SlotId,
    pub to: SlotId,
}

/// A command that stops `target`, honored only while `requires_active` runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRule {
    pub command: u8,
    pub target: SlotId,
    pub requires_active: SlotId,
}

/// Slot wiring: what starts, what follows what, and which commands stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotsConfig {
    /// Launched at startup and marked active
    pub initial: Vec<SlotId>,
    pub handoffs: Vec<Handoff>,
    pub stop_rules: Vec<StopRule>,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            initial: vec![SlotId::FOUNTAIN, SlotId::SNOW, SlotId::GALAXY, SlotId::PURGE],
            handoffs: vec![
                Handoff {
                    from: SlotId::FOUNTAIN,
                    to: SlotId::LIGHTNING,
                },
                Handoff {
                    from: SlotId::LIGHTNING,
                    to: SlotId::FOUNTAIN,
                },
            ],
            stop_rules: vec![
                StopRule {
                    command: 3,
                    target: SlotId::FOUNTAIN,
                    requires_active: SlotId::LIGHTNING,
                },
                StopRule {
                    command: 4,
                    target: SlotId::LIGHTNING,
                    requires_active: SlotId::FOUNTAIN,
                },
            ],
        }
    }
}

impl SlotsConfig {
    /// Successor launched when `slot` terminates
    pub fn successor(&self, slot: SlotId) -> Option<SlotId> {
        self.handoffs.iter().find(|h| h.from == slot).map(|h| h.to)
    }

    /// Stop rule governing a command value
    pub fn stop_rule(&self, command: u8) -> Option<&StopRule> {
        self.stop_rules.iter().find(|r| r.command == command)
    }

    /// Reject wiring the coordinator could not follow unambiguously
    pub fn validate(&self, command_max: u8) -> Result<(), SlotConfigError> {
        let mut seen = HashSet::new();
        for &slot in &self.initial {
            if !seen.insert(slot) {
                return Err(SlotConfigError::DuplicateInitial(slot));
            }
        }

        let mut sources = HashSet::new();
        for handoff in &self.handoffs {
            if handoff.from == handoff.to {
                return Err(SlotConfigError::SelfHandoff(handoff.from));
            }
            if !sources.insert(handoff.from) {
                return Err(SlotConfigError::DuplicateHandoff(handoff.from));
            }
        }

        let mut commands = HashSet::new();
        for rule in &self.stop_rules {
            if rule.command == 0 || rule.command > command_max {
                return Err(SlotConfigError::StopCommandOutOfRange {
                    command: rule.command,
                    max: command_max,
                });
            }
            if !commands.insert(rule.command) {
                return Err(SlotConfigError::DuplicateStopRule(rule.command));
            }
        }

        Ok(())
    }
}
