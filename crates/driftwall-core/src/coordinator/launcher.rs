//! Turning a slot id into a running task

use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::Receiver;

use super::LaunchError;
use crate::animation::AnimationFactory;
use crate::frame::FrameBuffer;
use crate::pool::{TaskReport, ThreadPool};
use crate::signal::SignalRegister;
use crate::types::SlotId;
use crate::worker::WorkerTask;

/// Starts slot tasks on behalf of the coordinator
pub trait Launcher: Send {
    /// Start a fresh task for `slot`
    fn launch(&mut self, slot: SlotId) -> Result<(), LaunchError>;

    /// Next completion or crash report, without blocking
    fn try_recv_report(&mut self) -> Option<TaskReport> {
        None
    }
}

/// Launcher submitting [`WorkerTask`]s to a shared [`ThreadPool`]
pub struct PoolLauncher {
    pool: Arc<ThreadPool>,
    reports: Receiver<TaskReport>,
    register: Arc<SignalRegister>,
    frame: Arc<FrameBuffer>,
    factory: AnimationFactory,
    tick_budget: Duration,
}

impl PoolLauncher {
    pub fn new(
        pool: Arc<ThreadPool>,
        register: Arc<SignalRegister>,
        frame: Arc<FrameBuffer>,
        factory: AnimationFactory,
        tick_budget: Duration,
    ) -> Self {
        let reports = pool.reports();
        Self {
            pool,
            reports,
            register,
            frame,
            factory,
            tick_budget,
        }
    }
}

impl Launcher for PoolLauncher {
    fn launch(&mut self, slot: SlotId) -> Result<(), LaunchError> {
        let animation =
            (self.factory)(slot, self.frame.width(), self.frame.height()).ok_or(LaunchError::NoAnimation(slot))?;
        let name = animation.name();

        let task = WorkerTask::new(slot, animation, self.register.clone(), self.frame.clone())
            .with_tick_budget(self.tick_budget);
        self.pool.submit(task)?;

        log::info!("Launched {} ({})", slot, name);
        Ok(())
    }

    fn try_recv_report(&mut self) -> Option<TaskReport> {
        self.reports.try_recv().ok()
    }
}
