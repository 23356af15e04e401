//! Fixed-capacity worker pool for animation tasks
//!
//! ```text
//!   submit() ──try_send──► [ bounded queue ] ──recv──► anim-worker-0 ─┐
//!                                             ──recv──► anim-worker-1 ─┼─► reports
//!                                             ──recv──► anim-worker-N ─┘
//! ```
//!
//! Every worker thread is spawned up front. Submission never blocks: a full
//! queue is reported as [`PoolError::QueueFull`] and the caller decides
//! whether to retry. Tasks run until they return on their own; the pool
//! only observes how they ended and publishes a [`TaskReport`].

mod error;
mod thread_pool;

pub use error::{PoolError, PoolResult};
pub use thread_pool::ThreadPool;

use crate::types::SlotId;

/// How a task run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskReport {
    /// The task returned normally after acknowledging its stop command
    Finished { slot: SlotId },
    /// The task panicked; the worker thread survived
    Panicked { slot: SlotId, message: String },
}

impl TaskReport {
    pub fn slot(&self) -> SlotId {
        match self {
            TaskReport::Finished { slot } | TaskReport::Panicked { slot, .. } => *slot,
        }
    }
}
