//! Snow drift - particles stream outward until enough have left the screen,
//! then the field restarts in a new color and asks for a purge

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::particles::{cycle_color, ParticleField};
use crate::frame::FrameBuffer;
use crate::signal::Signal;
use crate::worker::Animation;

/// Off-screen particles in one frame that trigger a restart
pub const RESTART_THRESHOLD: usize = 750;

/// Command written when the drift restarts (circle purge fill mode)
pub const PURGE_REQUEST: u8 = 1;

/// Heading drift per millisecond, nearly straight paths
const TURN_PER_MS: f64 = 0.0000635;

/// Distance scale per millisecond
const DRIFT_PER_MS: f64 = 0.2;

pub struct Snow {
    field: ParticleField,
    rng: StdRng,
    color: u32,
    phase: f64,
}

impl Snow {
    pub fn new() -> Self {
        let mut rng = StdRng::from_entropy();
        Self {
            field: ParticleField::new(&mut rng),
            rng,
            color: 0xFFFF_FFFF,
            phase: 0.0,
        }
    }

    fn restart(&mut self) {
        self.field.recenter();
        self.field.scatter(&mut self.rng);
        self.color = cycle_color(self.phase, 0xFF);
    }
}

impl Default for Snow {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Snow {
    fn name(&self) -> &'static str {
        "snow"
    }

    fn render(&mut self, frame: &FrameBuffer, dt: Duration) -> Option<Signal> {
        let ms = (dt.as_secs_f64() * 1000.0).min(1000.0);
        self.phase += dt.as_secs_f64();

        let mut off_screen = 0;
        for p in &mut self.field.particles {
            p.advance(ms * DRIFT_PER_MS, TURN_PER_MS / DRIFT_PER_MS);
            let (x, y) = p.to_screen(frame.width(), frame.height());
            if !frame.put_pixel(x, y, self.color) {
                off_screen += 1;
            }
        }

        if off_screen > RESTART_THRESHOLD {
            log::debug!("snow: {} particles left the screen, restarting", off_screen);
            self.restart();
            return Some(Signal::Command(PURGE_REQUEST));
        }
        None
    }
}
