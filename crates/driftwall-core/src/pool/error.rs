//! Thread pool error types

use thiserror::Error;

/// Errors returned by [`ThreadPool`](super::ThreadPool) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The submission queue is at capacity
    #[error("Task queue is full")]
    QueueFull,

    /// The pool no longer accepts tasks
    #[error("Thread pool has been shut down")]
    ShutDown,

    /// A pool was requested with no workers
    #[error("Thread pool needs at least one worker")]
    NoWorkers,

    /// The OS refused to spawn a worker thread
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(String),
}

/// Result type for pool operations
pub type PoolResult<T> = Result<T, PoolError>;
