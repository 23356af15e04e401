//! Generic worker lifecycle around an animation

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::{Animation, Reaction};
use crate::frame::FrameBuffer;
use crate::signal::{Signal, SignalRegister};
use crate::types::{SlotId, TICK_BUDGET};

/// Lifecycle state of a worker for one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// A full tick budget has elapsed: advance and draw
    Running,
    /// Ahead of schedule: read the register, then sleep off the budget
    Polling,
    /// Own stop code observed: acknowledge and exit
    Terminating,
}

/// One animation bound to a slot, ready to be run by the pool
pub struct WorkerTask {
    slot: SlotId,
    animation: Box<dyn Animation>,
    register: Arc<SignalRegister>,
    frame: Arc<FrameBuffer>,
    tick_budget: Duration,
}

impl WorkerTask {
    pub fn new(
        slot: SlotId,
        animation: Box<dyn Animation>,
        register: Arc<SignalRegister>,
        frame: Arc<FrameBuffer>,
    ) -> Self {
        Self {
            slot,
            animation,
            register,
            frame,
            tick_budget: TICK_BUDGET,
        }
    }

    /// Override the render cadence (defaults to [`TICK_BUDGET`])
    pub fn with_tick_budget(mut self, tick_budget: Duration) -> Self {
        self.tick_budget = tick_budget;
        self
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn animation_name(&self) -> &'static str {
        self.animation.name()
    }

    /// Run until this slot's stop code is observed
    ///
    /// The only normal exit writes `Feedback { slot, terminated: true }`.
    pub fn run(mut self) {
        log::info!("{} ({}) running", self.slot, self.animation.name());

        // First iteration renders immediately
        let mut last_render: Option<Instant> = None;

        loop {
            let elapsed = last_render.map_or(self.tick_budget, |t| t.elapsed());

            let state = if elapsed >= self.tick_budget {
                WorkerState::Running
            } else {
                self.poll()
            };

            match state {
                WorkerState::Running => {
                    if let Some(signal) = self.animation.render(&self.frame, elapsed) {
                        log::trace!("{} emits {:?}", self.slot, signal);
                        self.register.send(signal);
                    }
                    last_render = Some(Instant::now());
                }
                WorkerState::Polling => {
                    thread::sleep(self.tick_budget.saturating_sub(elapsed));
                }
                WorkerState::Terminating => {
                    self.register.send(Signal::terminated(self.slot));
                    log::info!("{} ({}) terminated on command", self.slot, self.animation.name());
                    return;
                }
            }
        }
    }

    /// Read the register once and decide between Polling and Terminating
    fn poll(&mut self) -> WorkerState {
        let signal = self.register.signal();
        if signal == Signal::Stop(self.slot) {
            return WorkerState::Terminating;
        }

        if self.animation.on_signal(signal) == Reaction::Notify {
            log::debug!("{} notifies after {:?}", self.slot, signal);
            self.register.send(Signal::notice(self.slot));
        }
        WorkerState::Polling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::testing::{wait_until, CountingAnimation, NotifyingAnimation};
    use std::sync::atomic::Ordering;

    const WAIT: Duration = Duration::from_secs(5);

    fn context() -> (Arc<SignalRegister>, Arc<FrameBuffer>) {
        (Arc::new(SignalRegister::new()), Arc::new(FrameBuffer::new(8, 8)))
    }

    #[test]
    fn test_stop_code_terminates_with_feedback() {
        let (register, frame) = context();
        let (animation, renders) = CountingAnimation::new();
        let task = WorkerTask::new(SlotId::SNOW, Box::new(animation), register.clone(), frame)
            .with_tick_budget(Duration::from_millis(2));

        let handle = thread::spawn(move || task.run());
        assert!(wait_until(WAIT, || renders.load(Ordering::Relaxed) > 0));

        register.write(SlotId::SNOW.stop_code());
        handle.join().unwrap();

        assert_eq!(
            register.signal(),
            Signal::Feedback { slot: 2, terminated: true }
        );
    }

    #[test]
    fn test_other_stop_codes_are_ignored() {
        let (register, frame) = context();
        let (animation, renders) = CountingAnimation::new();
        let task = WorkerTask::new(SlotId::SNOW, Box::new(animation), register.clone(), frame)
            .with_tick_budget(Duration::from_millis(2));

        register.write(SlotId::FOUNTAIN.stop_code());
        let handle = thread::spawn(move || task.run());

        // Keeps rendering while another slot's stop code sits in the register
        assert!(wait_until(WAIT, || renders.load(Ordering::Relaxed) >= 5));
        assert_eq!(register.read(), 256);

        register.write(SlotId::SNOW.stop_code());
        handle.join().unwrap();
    }

    #[test]
    fn test_notify_reaction_writes_transient_feedback() {
        let (register, frame) = context();
        let task = WorkerTask::new(
            SlotId::GALAXY,
            Box::new(NotifyingAnimation::on_command(2)),
            register.clone(),
            frame,
        )
        .with_tick_budget(Duration::from_millis(2));

        let handle = thread::spawn(move || task.run());
        register.write(2);

        let notice = Signal::notice(SlotId::GALAXY);
        assert!(wait_until(WAIT, || register.signal() == notice));

        register.write(SlotId::GALAXY.stop_code());
        handle.join().unwrap();
        assert_eq!(register.signal(), Signal::terminated(SlotId::GALAXY));
    }

    #[test]
    fn test_rendered_signal_is_written() {
        let (register, frame) = context();
        let task = WorkerTask::new(
            SlotId::SNOW,
            Box::new(NotifyingAnimation::emitting(Signal::Command(1))),
            register.clone(),
            frame,
        )
        .with_tick_budget(Duration::from_millis(2));

        let handle = thread::spawn(move || task.run());
        assert!(wait_until(WAIT, || register.signal() == Signal::Command(1)));

        register.write(SlotId::SNOW.stop_code());
        handle.join().unwrap();
    }
}
