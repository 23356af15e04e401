//! Common types for Driftwall
//!
//! Slot identities and the protocol constants shared by the register,
//! the worker lifecycle and the coordinator.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of addressable algorithm slots
///
/// Five slots carry animations; slot 6 is reserved so that every value the
/// scheduler draws from `[1, 6]` is a valid command.
pub const NUM_SLOTS: u8 = 6;

/// First stop code; slot `k` stops on `STOP_BASE + k - 1`
pub const STOP_BASE: i32 = 256;

/// Tick budget separating composite ticks from control ticks (100 Hz)
pub const TICK_BUDGET: Duration = Duration::from_millis(10);

/// Default frame dimensions used when no display config is given
pub const DEFAULT_WIDTH: usize = 1280;
pub const DEFAULT_HEIGHT: usize = 720;

/// Logical identity of an algorithm slot (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotId(u8);

impl SlotId {
    /// Particle fountain
    pub const FOUNTAIN: SlotId = SlotId(1);
    /// Snow drift
    pub const SNOW: SlotId = SlotId(2);
    /// Spiral galaxy
    pub const GALAXY: SlotId = SlotId(3);
    /// Expanding circle purge
    pub const PURGE: SlotId = SlotId(4);
    /// Lightning bolts
    pub const LIGHTNING: SlotId = SlotId(5);

    /// Create a slot id from a 1-based number within `[1, NUM_SLOTS]`
    pub fn new(id: u8) -> Option<Self> {
        (1..=NUM_SLOTS).contains(&id).then_some(SlotId(id))
    }

    /// Raw 1-based id
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index for slot tables
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Register value that commands this slot to stop
    #[inline]
    pub fn stop_code(self) -> i32 {
        STOP_BASE + self.0 as i32 - 1
    }

    /// Iterate over every addressable slot in order
    pub fn all() -> impl Iterator<Item = SlotId> {
        (1..=NUM_SLOTS).map(SlotId)
    }
}

impl TryFrom<u8> for SlotId {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        SlotId::new(id).ok_or_else(|| format!("slot id {} outside 1..={}", id, NUM_SLOTS))
    }
}

impl From<SlotId> for u8 {
    fn from(slot: SlotId) -> u8 {
        slot.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}
