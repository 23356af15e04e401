//! Particle fountain - particles spiral out of the center leaving trails

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::particles::{cycle_color, ParticleField};
use crate::frame::FrameBuffer;
use crate::signal::Signal;
use crate::worker::Animation;

/// Heading change per millisecond; one turn takes about a second
const TURN_PER_MS: f64 = 0.00635;

/// Color phase advance per second
const COLOR_RATE: f64 = 0.35;

pub struct Fountain {
    field: ParticleField,
    phase: f64,
}

impl Fountain {
    pub fn new() -> Self {
        let mut rng = StdRng::from_entropy();
        Self {
            field: ParticleField::new(&mut rng),
            phase: 0.0,
        }
    }
}

impl Default for Fountain {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Fountain {
    fn name(&self) -> &'static str {
        "fountain"
    }

    fn render(&mut self, frame: &FrameBuffer, dt: Duration) -> Option<Signal> {
        // Long stalls would fling everything off screen in one step
        let steps = (dt.as_secs_f64() * 1000.0).min(1000.0);
        self.phase += dt.as_secs_f64() * COLOR_RATE;
        let color = cycle_color(self.phase, 0xFF);

        for p in &mut self.field.particles {
            p.advance(steps, TURN_PER_MS);
            let (x, y) = p.to_screen(frame.width(), frame.height());
            frame.put_pixel(x, y, color);
        }
        None
    }
}
