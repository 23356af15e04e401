//! Worker tasks - the lifecycle every animation runs inside
//!
//! An [`Animation`] only knows how to draw and how to react to register
//! values. [`WorkerTask`] wraps it with the shared protocol: render once per
//! tick budget, poll the register in between, and on seeing its own stop
//! code write a terminated acknowledgment and return.
//!
//! ```text
//!            elapsed >= budget
//!   ┌──────────┐ ─────────────► ┌─────────┐
//!   │ Polling  │                │ Running │
//!   └──────────┘ ◄───────────── └─────────┘
//!        │        rendered
//!        │ register == own stop code
//!        ▼
//!   ┌─────────────┐  write Feedback{slot, terminated}
//!   │ Terminating │ ─────────────────────────────────► return
//!   └─────────────┘
//! ```

mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use task::{WorkerState, WorkerTask};

use std::time::Duration;

use crate::frame::FrameBuffer;
use crate::signal::Signal;

/// How an animation responds to a polled register value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Keep going, nothing to report
    Continue,
    /// Ask for coordinator attention with a transient feedback notice
    Notify,
}

/// A long-running procedural animation
///
/// Implementations are driven by [`WorkerTask`] and never touch the signal
/// register directly: outgoing commands are returned from
/// [`render`](Animation::render) and acknowledgments are requested through
/// [`Reaction::Notify`].
pub trait Animation: Send {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Advance by `dt` and draw into the frame
    ///
    /// A returned signal is written to the register as-is.
    fn render(&mut self, frame: &FrameBuffer, dt: Duration) -> Option<Signal>;

    /// React to a register value seen while polling
    ///
    /// Called for every polled value other than this task's own stop code.
    fn on_signal(&mut self, _signal: Signal) -> Reaction {
        Reaction::Continue
    }
}
