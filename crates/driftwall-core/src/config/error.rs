//! Slot wiring validation errors

use thiserror::Error;

use crate::types::SlotId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotConfigError {
    /// Random commands must address existing slots
    #[error("command range 1..={max} exceeds the {limit} addressable slots")]
    CommandRange { max: u8, limit: u8 },

    #[error("{0} listed twice in initial slots")]
    DuplicateInitial(SlotId),

    #[error("{0} hands off to itself")]
    SelfHandoff(SlotId),

    #[error("{0} has more than one successor")]
    DuplicateHandoff(SlotId),

    #[error("stop rule command {command} outside 1..={max}")]
    StopCommandOutOfRange { command: u8, max: u8 },

    #[error("command {0} has more than one stop rule")]
    DuplicateStopRule(u8),
}
