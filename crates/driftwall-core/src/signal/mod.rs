//! Shared signal register - the single word binding coordinator and workers
//!
//! One mutex-guarded `i32` carries every message in both directions:
//!
//! ```text
//!  value                      meaning                 writer
//!  ─────────────────────────  ──────────────────────  ───────────
//!  0                          idle                    coordinator
//!  1 ..= NUM_SLOTS            random event command    coordinator, animations
//!  256 .. 256 + NUM_SLOTS     stop slot (v - 255)     coordinator
//!  0x{slot}{flag}FFFF         feedback                workers
//! ```
//!
//! The register is never queued: each write replaces whatever was there, so
//! a command can be overwritten before its recipient polls. Both sides are
//! built to tolerate that.

mod codec;
mod register;

pub use codec::{decode_feedback, encode_feedback, Signal};
pub use register::SignalRegister;
