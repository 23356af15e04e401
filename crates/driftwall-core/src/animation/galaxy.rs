//! Galaxy - a jittery particle cloud that scatters whenever the snow
//! command comes around, and starts over once it has scattered enough

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::particles::{cycle_color, ParticleField};
use crate::frame::FrameBuffer;
use crate::signal::Signal;
use crate::worker::{Animation, Reaction};

/// Command that scatters the cloud
pub const SCATTER_COMMAND: u8 = 2;

/// Scatters tolerated before a full restart
const MAX_ENTROPY: u32 = 5;

const TURN_PER_STEP: f64 = 0.0635;

pub struct Galaxy {
    field: ParticleField,
    rng: StdRng,
    entropy: u32,
    phase: f64,
}

impl Galaxy {
    pub fn new() -> Self {
        let mut rng = StdRng::from_entropy();
        Self {
            field: ParticleField::new(&mut rng),
            rng,
            entropy: 0,
            phase: 0.0,
        }
    }

    pub fn entropy(&self) -> u32 {
        self.entropy
    }
}

impl Default for Galaxy {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Galaxy {
    fn name(&self) -> &'static str {
        "galaxy"
    }

    fn render(&mut self, frame: &FrameBuffer, dt: Duration) -> Option<Signal> {
        self.phase += dt.as_secs_f64() * 0.5;
        let color = cycle_color(self.phase, 0x80);

        for p in &mut self.field.particles {
            let steps = self.rng.gen_range(0..5) as f64;
            p.advance(steps, TURN_PER_STEP);
            let (x, y) = p.to_screen(frame.width(), frame.height());
            frame.put_pixel(x, y, color);
        }
        None
    }

    fn on_signal(&mut self, signal: Signal) -> Reaction {
        if signal != Signal::Command(SCATTER_COMMAND) {
            return Reaction::Continue;
        }

        self.field.scatter(&mut self.rng);
        self.entropy += 1;
        if self.entropy > MAX_ENTROPY {
            log::debug!("galaxy: entropy exceeded, starting over");
            self.field.recenter();
            self.field.scatter(&mut self.rng);
            self.entropy = 0;
        }
        Reaction::Notify
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_command_notifies() {
        let mut galaxy = Galaxy::new();
        assert_eq!(galaxy.on_signal(Signal::Command(SCATTER_COMMAND)), Reaction::Notify);
        assert_eq!(galaxy.entropy(), 1);
    }

    #[test]
    fn test_other_signals_ignored() {
        let mut galaxy = Galaxy::new();
        for signal in [Signal::Idle, Signal::Command(1), Signal::Command(3), Signal::notice(crate::SlotId::SNOW)] {
            assert_eq!(galaxy.on_signal(signal), Reaction::Continue);
        }
        assert_eq!(galaxy.entropy(), 0);
    }

    #[test]
    fn test_entropy_overflow_restarts_cloud() {
        let frame = FrameBuffer::new(64, 64);
        let mut galaxy = Galaxy::new();
        for _ in 0..10 {
            galaxy.render(&frame, Duration::from_millis(10));
        }

        for _ in 0..=MAX_ENTROPY {
            galaxy.on_signal(Signal::Command(SCATTER_COMMAND));
        }
        assert_eq!(galaxy.entropy(), 0);
        assert!(galaxy.field.particles.iter().all(|p| p.x == 0.0 && p.y == 0.0));
    }
}
