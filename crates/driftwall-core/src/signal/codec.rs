//! Bit layout of the signal word
//!
//! Feedback words start from `-1` (all bytes `0xFF`) and overwrite bytes 2
//! and 3 (little-endian order) with the terminated flag and the slot id.
//! Bytes 0 and 1 keep the `0xFF` marker that identifies feedback.

use crate::types::{SlotId, NUM_SLOTS, STOP_BASE};

const FEEDBACK_MARKER: u8 = 0xFF;
const BYTE_FLAG: usize = 2;
const BYTE_SLOT: usize = 3;

/// Typed view of a register value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// No pending command
    Idle,
    /// Random event command in `[1, NUM_SLOTS]`
    Command(u8),
    /// Directed stop command for a slot
    Stop(SlotId),
    /// Worker acknowledgment
    ///
    /// `slot` is the raw acknowledging id; `terminated == false` is a
    /// transient notice asking for coordinator attention.
    Feedback { slot: u8, terminated: bool },
    /// Any bit pattern outside the documented ranges
    Unknown(i32),
}

impl Signal {
    /// Interpret a raw register value
    pub fn decode(raw: i32) -> Self {
        if raw == 0 {
            return Signal::Idle;
        }
        if (1..=NUM_SLOTS as i32).contains(&raw) {
            return Signal::Command(raw as u8);
        }
        if (STOP_BASE..STOP_BASE + NUM_SLOTS as i32).contains(&raw) {
            if let Some(slot) = SlotId::new((raw - STOP_BASE + 1) as u8) {
                return Signal::Stop(slot);
            }
        }
        match decode_feedback(raw) {
            Some((slot, terminated)) => Signal::Feedback { slot, terminated },
            None => Signal::Unknown(raw),
        }
    }

    /// Raw register value for this signal
    pub fn encode(self) -> i32 {
        match self {
            Signal::Idle => 0,
            Signal::Command(value) => value as i32,
            Signal::Stop(slot) => slot.stop_code(),
            Signal::Feedback { slot, terminated } => encode_feedback(slot, terminated),
            Signal::Unknown(raw) => raw,
        }
    }

    /// Feedback acknowledging that `slot` has exited
    pub fn terminated(slot: SlotId) -> Self {
        Signal::Feedback {
            slot: slot.get(),
            terminated: true,
        }
    }

    /// Transient feedback from `slot` asking for coordinator attention
    pub fn notice(slot: SlotId) -> Self {
        Signal::Feedback {
            slot: slot.get(),
            terminated: false,
        }
    }
}

/// Encode a feedback word: `-1` with byte 3 = `slot_id`, byte 2 = flag
pub fn encode_feedback(slot_id: u8, terminated: bool) -> i32 {
    let mut bytes = (-1i32).to_le_bytes();
    bytes[BYTE_FLAG] = terminated as u8;
    bytes[BYTE_SLOT] = slot_id;
    i32::from_le_bytes(bytes)
}

/// Decode a feedback word into `(slot_id, terminated)`
///
/// Returns `None` unless the `0xFFFF` marker is intact, the slot byte is
/// non-zero and the flag byte is 0 or 1.
pub fn decode_feedback(value: i32) -> Option<(u8, bool)> {
    let bytes = value.to_le_bytes();
    if bytes[0] != FEEDBACK_MARKER || bytes[1] != FEEDBACK_MARKER {
        return None;
    }
    let slot = bytes[BYTE_SLOT];
    if slot == 0 {
        return None;
    }
    match bytes[BYTE_FLAG] {
        0 => Some((slot, false)),
        1 => Some((slot, true)),
        _ => None,
    }
}
