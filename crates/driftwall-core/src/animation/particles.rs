//! Particle field shared by the fountain, snow and galaxy animations
//!
//! Positions live in a normalized space where x spans `[-1, 1]` across the
//! frame width and y uses the same scale around the vertical center.

use std::f64::consts::TAU;

use rand::Rng;

/// Particles per field
pub const PARTICLE_COUNT: usize = 4096;

/// One moving point
#[derive(Debug, Clone, Copy, Default)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Distance per unit step
    pub speed: f64,
    /// Heading in radians
    pub direction: f64,
}

impl Particle {
    /// Move `steps` units along the current heading after turning by `turn * steps`
    #[inline]
    pub fn advance(&mut self, steps: f64, turn: f64) {
        self.direction += steps * turn;
        self.x += self.speed * self.direction.cos() * steps;
        self.y += self.speed * self.direction.sin() * steps;
    }

    /// Pixel coordinates for a `width` x `height` frame
    #[inline]
    pub fn to_screen(&self, width: usize, height: usize) -> (i32, i32) {
        let half_w = (width / 2) as f64;
        let x = (self.x + 1.0) * half_w;
        let y = self.y * half_w + (height / 2) as f64;
        (x as i32, y as i32)
    }
}

/// A fixed-size set of particles emitted from the center
pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    /// Field at the origin with random headings and speeds
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut field = Self {
            particles: vec![Particle::default(); PARTICLE_COUNT],
        };
        field.scatter(rng);
        field
    }

    /// Draw new headings and speeds; positions are kept
    ///
    /// Squaring the speed biases the field towards slow particles.
    pub fn scatter(&mut self, rng: &mut impl Rng) {
        for p in &mut self.particles {
            p.direction = rng.gen_range(0.0..TAU);
            let speed: f64 = rng.gen_range(0.0..0.08);
            p.speed = speed * speed;
        }
    }

    /// Move every particle back to the origin
    pub fn recenter(&mut self) {
        for p in &mut self.particles {
            p.x = 0.0;
            p.y = 0.0;
        }
    }
}

/// ARGB color cycling slowly through hue-ish channel phases
pub fn cycle_color(phase: f64, alpha: u8) -> u32 {
    let channel = |rate: f64| ((1.0 + (phase * rate).sin()) * 127.5) as u32;
    let red = channel(1.0);
    let green = channel(2.0);
    let blue = channel(3.0);
    (alpha as u32) << 24 | red << 16 | green << 8 | blue
}
