//! Coordinator error types

use thiserror::Error;

use crate::config::SlotConfigError;
use crate::display::DisplayError;
use crate::pool::PoolError;
use crate::types::SlotId;

/// Why a slot could not be launched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// The animation factory has nothing for this slot
    #[error("no animation registered for {0}")]
    NoAnimation(SlotId),
}

impl LaunchError {
    /// Worth retrying later with backoff
    pub fn is_transient(&self) -> bool {
        matches!(self, LaunchError::Pool(PoolError::QueueFull))
    }
}

/// Fatal failures before the control loop starts
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("display setup failed: {0}")]
    Display(#[from] DisplayError),

    #[error("invalid slot configuration: {0}")]
    SlotConfig(#[from] SlotConfigError),

    #[error("initial launch of {slot} failed: {source}")]
    Launch {
        slot: SlotId,
        #[source]
        source: LaunchError,
    },

    #[error("failed to spawn coordinator thread: {0}")]
    Spawn(String),

    /// The coordinator thread died before reporting startup
    #[error("coordinator thread exited during startup")]
    Aborted,
}
