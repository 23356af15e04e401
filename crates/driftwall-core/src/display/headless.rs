//! Off-screen sink that keeps the last presented frame

use std::time::{Duration, Instant};

use super::{DisplayError, DisplayResult, DisplaySink};
use crate::frame::FrameBuffer;

/// How often the headless sink logs its frame rate
const STATS_INTERVAL: Duration = Duration::from_secs(10);

/// Display sink without a window
///
/// Copies each frame into an owned buffer and counts presents. Used by the
/// player when no window backend is compiled in, and by tests.
pub struct HeadlessDisplay {
    surface: Vec<u32>,
    width: usize,
    height: usize,
    frames_presented: u64,
    window_start: Instant,
    window_frames: u64,
}

impl HeadlessDisplay {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            surface: vec![0; width * height],
            width,
            height,
            frames_presented: 0,
            window_start: Instant::now(),
            window_frames: 0,
        }
    }

    /// Total number of frames presented
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Last presented frame, row-major ARGB
    pub fn surface(&self) -> &[u32] {
        &self.surface
    }
}

impl DisplaySink for HeadlessDisplay {
    fn present(&mut self, frame: &FrameBuffer) -> DisplayResult<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(DisplayError::SizeMismatch {
                surface_width: self.width,
                surface_height: self.height,
                frame_width: frame.width(),
                frame_height: frame.height(),
            });
        }

        frame.copy_into(&mut self.surface);
        self.frames_presented += 1;
        self.window_frames += 1;

        let elapsed = self.window_start.elapsed();
        if elapsed >= STATS_INTERVAL {
            log::debug!(
                "HeadlessDisplay: {:.1} fps over the last {:.0}s ({} frames total)",
                self.window_frames as f64 / elapsed.as_secs_f64(),
                elapsed.as_secs_f64(),
                self.frames_presented
            );
            self.window_start = Instant::now();
            self.window_frames = 0;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_copies_frame() {
        let frame = FrameBuffer::new(4, 4);
        frame.put_pixel(2, 1, 0xFF12_3456);

        let mut display = HeadlessDisplay::new(4, 4);
        display.present(&frame).unwrap();

        assert_eq!(display.frames_presented(), 1);
        // row 1, column 2
        assert_eq!(display.surface()[6], 0xFF12_3456);
    }

    #[test]
    fn test_present_rejects_wrong_size() {
        let frame = FrameBuffer::new(4, 4);
        let mut display = HeadlessDisplay::new(8, 4);
        assert!(matches!(
            display.present(&frame),
            Err(DisplayError::SizeMismatch { .. })
        ));
        assert_eq!(display.frames_presented(), 0);
    }
}
