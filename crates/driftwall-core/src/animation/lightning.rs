//! Lightning - a handful of bolts zig-zag across the frame, changing course
//! after every segment and re-striking from a random point once they leave

use std::f64::consts::TAU;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::frame::FrameBuffer;
use crate::raster;
use crate::signal::Signal;
use crate::worker::Animation;

pub const BOLT_COUNT: usize = 10;

const BOLT_COLOR: u32 = 0xFFE0_F0FF;
/// Pixels advanced per render
const STEP: f64 = 6.0;
const MIN_SEGMENT: f64 = 10.0;
const MAX_SEGMENT: f64 = 60.0;

#[derive(Debug, Clone, Copy)]
struct Bolt {
    x: f64,
    y: f64,
    heading: f64,
    /// Length of the current segment
    len: f64,
    /// Distance covered on the current segment
    travelled: f64,
}

impl Bolt {
    fn strike(rng: &mut impl Rng, width: usize, height: usize) -> Self {
        let mut bolt = Self {
            x: rng.gen_range(0.0..width.max(1) as f64),
            y: rng.gen_range(0.0..height.max(1) as f64),
            heading: 0.0,
            len: 0.0,
            travelled: 0.0,
        };
        bolt.aim(rng);
        bolt
    }

    fn aim(&mut self, rng: &mut impl Rng) {
        self.heading = rng.gen_range(0.0..TAU);
        self.len = rng.gen_range(MIN_SEGMENT..MAX_SEGMENT);
        self.travelled = 0.0;
    }
}

pub struct Lightning {
    rng: StdRng,
    bolts: Vec<Bolt>,
}

impl Lightning {
    pub fn new(width: usize, height: usize) -> Self {
        let mut rng = StdRng::from_entropy();
        let bolts = (0..BOLT_COUNT)
            .map(|_| Bolt::strike(&mut rng, width, height))
            .collect();
        Self { rng, bolts }
    }
}

impl Animation for Lightning {
    fn name(&self) -> &'static str {
        "lightning"
    }

    fn render(&mut self, frame: &FrameBuffer, _dt: Duration) -> Option<Signal> {
        for bolt in &mut self.bolts {
            let nx = bolt.x + bolt.heading.cos() * STEP;
            let ny = bolt.y + bolt.heading.sin() * STEP;
            raster::line(frame, BOLT_COLOR, bolt.x as i32, bolt.y as i32, nx as i32, ny as i32);

            bolt.x = nx;
            bolt.y = ny;
            bolt.travelled += STEP;

            if !frame.contains(nx as i32, ny as i32) {
                *bolt = Bolt::strike(&mut self.rng, frame.width(), frame.height());
            } else if bolt.travelled > bolt.len {
                bolt.aim(&mut self.rng);
            }
        }
        None
    }
}
