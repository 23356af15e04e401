//! Mutex-guarded signal word

use std::sync::Mutex;

use super::Signal;

/// The one word of shared state between coordinator and workers
///
/// Every access is a short critical section: lock, copy or overwrite,
/// unlock. There is no compare-and-swap and no version counter, so the
/// last writer always wins.
#[derive(Debug, Default)]
pub struct SignalRegister {
    value: Mutex<i32>,
}

impl SignalRegister {
    /// Create an idle register
    pub fn new() -> Self {
        Self {
            value: Mutex::new(0),
        }
    }

    /// Copy the current raw value
    pub fn read(&self) -> i32 {
        *self.value.lock().expect("signal register lock poisoned")
    }

    /// Overwrite the raw value unconditionally
    pub fn write(&self, value: i32) {
        *self.value.lock().expect("signal register lock poisoned") = value;
    }

    /// Read and decode in one step
    pub fn signal(&self) -> Signal {
        Signal::decode(self.read())
    }

    /// Encode and write in one step
    pub fn send(&self, signal: Signal) {
        self.write(signal.encode());
    }

    /// Reset to idle
    pub fn clear(&self) {
        self.write(0);
    }
}
