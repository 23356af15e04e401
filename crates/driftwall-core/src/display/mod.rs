//! Display sinks - where composited frames go
//!
//! The coordinator owns exactly one sink and calls [`DisplaySink::present`]
//! on every composite tick. Sinks are created on the coordinator thread, so
//! they do not need to be `Send` (window handles usually are not).

mod error;
mod headless;

pub use error::{DisplayError, DisplayResult};
pub use headless::HeadlessDisplay;

use crate::frame::FrameBuffer;

/// Receives composited frames at the coordinator cadence
pub trait DisplaySink {
    /// Copy `frame` to the surface and show it
    fn present(&mut self, frame: &FrameBuffer) -> DisplayResult<()>;

    /// Human-readable sink name for logs
    fn name(&self) -> &str;
}

/// Builds the display sink on the coordinator thread
pub type DisplayFactory = Box<dyn FnOnce() -> DisplayResult<Box<dyn DisplaySink>> + Send>;
