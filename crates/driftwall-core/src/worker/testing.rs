//! Minimal animations and helpers for lifecycle tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::{Animation, Reaction};
use crate::frame::FrameBuffer;
use crate::signal::Signal;

/// Poll `condition` every millisecond until it holds or `timeout` passes
pub(crate) fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}

/// Draws nothing, counts renders
pub(crate) struct CountingAnimation {
    renders: Arc<AtomicUsize>,
}

impl CountingAnimation {
    pub(crate) fn new() -> (Self, Arc<AtomicUsize>) {
        let renders = Arc::new(AtomicUsize::new(0));
        (
            Self {
                renders: renders.clone(),
            },
            renders,
        )
    }

    /// Counting into an existing counter, for tasks built by a factory
    pub(crate) fn sharing(renders: Arc<AtomicUsize>) -> Self {
        Self { renders }
    }
}

impl Animation for CountingAnimation {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn render(&mut self, _frame: &FrameBuffer, _dt: Duration) -> Option<Signal> {
        self.renders.fetch_add(1, Ordering::Relaxed);
        None
    }
}

/// Notifies on one command value, or emits one signal on its first render
pub(crate) struct NotifyingAnimation {
    notify_on: Option<u8>,
    emit: Option<Signal>,
}

impl NotifyingAnimation {
    pub(crate) fn on_command(value: u8) -> Self {
        Self {
            notify_on: Some(value),
            emit: None,
        }
    }

    pub(crate) fn emitting(signal: Signal) -> Self {
        Self {
            notify_on: None,
            emit: Some(signal),
        }
    }
}

impl Animation for NotifyingAnimation {
    fn name(&self) -> &'static str {
        "notifying"
    }

    fn render(&mut self, _frame: &FrameBuffer, _dt: Duration) -> Option<Signal> {
        self.emit.take()
    }

    fn on_signal(&mut self, signal: Signal) -> Reaction {
        match (self.notify_on, signal) {
            (Some(expected), Signal::Command(value)) if expected == value => Reaction::Notify,
            _ => Reaction::Continue,
        }
    }
}

/// Panics on its first render
pub(crate) struct PanickingAnimation;

impl Animation for PanickingAnimation {
    fn name(&self) -> &'static str {
        "panicking"
    }

    fn render(&mut self, _frame: &FrameBuffer, _dt: Duration) -> Option<Signal> {
        panic!("render exploded");
    }
}
