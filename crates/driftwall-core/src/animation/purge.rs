//! Circle purge - black rings expand from the center and wipe whatever the
//! other animations left behind
//!
//! While the register holds the purge request the rings are drawn filled,
//! blanking the whole disc instead of a band.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::frame::FrameBuffer;
use crate::raster;
use crate::signal::Signal;
use crate::worker::{Animation, Reaction};

/// Command that switches to filled rings
pub const FILL_COMMAND: u8 = 1;

const BLACK: u32 = 0xFF00_0000;
const START_RADIUS: i32 = 10;
/// How far past the frame edge a ring travels before starting over
const OVERSHOOT: i32 = 150;
const MAX_BAND: i32 = 10;

pub struct Purge {
    rng: StdRng,
    radius: i32,
    fill_mode: bool,
}

impl Purge {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            radius: START_RADIUS,
            fill_mode: false,
        }
    }

    pub fn fill_mode(&self) -> bool {
        self.fill_mode
    }
}

impl Default for Purge {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Purge {
    fn name(&self) -> &'static str {
        "purge"
    }

    fn render(&mut self, frame: &FrameBuffer, _dt: Duration) -> Option<Signal> {
        let cx = (frame.width() / 2) as i32;
        let cy = (frame.height() / 2) as i32;

        if self.fill_mode {
            raster::circle_fill(frame, cx, cy, self.radius, BLACK);
        } else {
            let band = self.rng.gen_range(0..MAX_BAND);
            for r in self.radius..=self.radius + band {
                raster::circle(frame, cx, cy, r, BLACK);
            }
        }

        self.radius += 1;
        if self.radius > cx.max(cy) + OVERSHOOT {
            self.radius = START_RADIUS;
        }
        None
    }

    fn on_signal(&mut self, signal: Signal) -> Reaction {
        self.fill_mode = signal == Signal::Command(FILL_COMMAND);
        Reaction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_mode_follows_register() {
        let mut purge = Purge::new();
        purge.on_signal(Signal::Command(FILL_COMMAND));
        assert!(purge.fill_mode());
        purge.on_signal(Signal::Idle);
        assert!(!purge.fill_mode());
    }

    #[test]
    fn test_filled_ring_blanks_center() {
        let frame = FrameBuffer::new(64, 64);
        frame.fill(0xFFFF_FFFF);

        let mut purge = Purge::new();
        purge.on_signal(Signal::Command(FILL_COMMAND));
        purge.render(&frame, Duration::from_millis(10));

        assert_eq!(frame.pixel(32, 32), Some(BLACK));
        assert_eq!(frame.pixel(0, 0), Some(0xFFFF_FFFF));
    }

    #[test]
    fn test_outline_ring_keeps_center() {
        let frame = FrameBuffer::new(64, 64);
        frame.fill(0xFFFF_FFFF);

        let mut purge = Purge::new();
        purge.render(&frame, Duration::from_millis(10));

        assert_eq!(frame.pixel(32, 32), Some(0xFFFF_FFFF));
        // The midpoint walk starts one pixel inside the radius
        assert_eq!(frame.pixel(32 + START_RADIUS - 1, 32), Some(BLACK));
    }

    #[test]
    fn test_radius_wraps_past_frame() {
        let frame = FrameBuffer::new(20, 20);
        let mut purge = Purge::new();
        // Radius climbs from START_RADIUS until it passes 10 + OVERSHOOT
        for _ in 0..(10 + OVERSHOOT - START_RADIUS + 1) {
            purge.render(&frame, Duration::ZERO);
        }
        assert_eq!(purge.radius, START_RADIUS);
    }
}
