//! Active/dormant bookkeeping per slot

use crate::config::{SlotsConfig, StopRule};
use crate::types::{SlotId, NUM_SLOTS};

/// Which slots the coordinator believes are running, plus their wiring
///
/// Only the coordinator thread touches this table.
pub struct SlotTable {
    active: [bool; NUM_SLOTS as usize],
    wiring: SlotsConfig,
}

impl SlotTable {
    /// Every slot dormant
    pub fn new(wiring: SlotsConfig) -> Self {
        Self {
            active: [false; NUM_SLOTS as usize],
            wiring,
        }
    }

    pub fn is_active(&self, slot: SlotId) -> bool {
        self.active[slot.index()]
    }

    pub fn set_active(&mut self, slot: SlotId, active: bool) {
        self.active[slot.index()] = active;
    }

    pub fn active_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        SlotId::all().filter(move |&slot| self.is_active(slot))
    }

    pub fn initial(&self) -> &[SlotId] {
        &self.wiring.initial
    }

    pub fn successor(&self, slot: SlotId) -> Option<SlotId> {
        self.wiring.successor(slot)
    }

    pub fn stop_rule(&self, command: u8) -> Option<StopRule> {
        self.wiring.stop_rule(command).copied()
    }
}
