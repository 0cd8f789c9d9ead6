//! The two populations of the background animation and their random generation.

use rand::Rng;
use std::f64::consts::TAU;

use super::SurfaceSize;

pub const PARTICLE_COUNT: usize = 50;
pub const STAR_COUNT: usize = 80;
pub const LINK_DISTANCE: f64 = 100.0;

const PARTICLE_SPEED: f64 = 0.15;
const PARTICLE_SIZE: (f64, f64) = (0.5, 2.5);
const PARTICLE_OPACITY: (f64, f64) = (0.1, 0.4);
const STAR_SIZE: (f64, f64) = (0.5, 2.0);
const STAR_TWINKLE_SPEED: (f64, f64) = (0.01, 0.03);

/// A slowly drifting dot. Its position is kept inside the canvas by wraparound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f64,
}

/// A fixed dot whose opacity oscillates with `twinkle_phase`.
///
/// The phase grows without bound; only its sine is ever observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub twinkle_speed: f64,
    pub twinkle_phase: f64,
}

/// Population sizes and the link threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub star_count: usize,
    pub link_distance: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            star_count: STAR_COUNT,
            link_distance: LINK_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
}

/// Uniform in `[low, high)`, or `low` when the range is empty (zero-sized canvas).
fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

impl ParticleField {
    /// Draws a fresh field for a canvas of `size`, every value independently uniform.
    pub fn generate<R: Rng>(size: SurfaceSize, config: &FieldConfig, rng: &mut R) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| Particle {
                x: uniform(rng, 0.0, size.width),
                y: uniform(rng, 0.0, size.height),
                vx: uniform(rng, -PARTICLE_SPEED, PARTICLE_SPEED),
                vy: uniform(rng, -PARTICLE_SPEED, PARTICLE_SPEED),
                size: uniform(rng, PARTICLE_SIZE.0, PARTICLE_SIZE.1),
                opacity: uniform(rng, PARTICLE_OPACITY.0, PARTICLE_OPACITY.1),
            })
            .collect();

        let stars = (0..config.star_count)
            .map(|_| Star {
                x: uniform(rng, 0.0, size.width),
                y: uniform(rng, 0.0, size.height),
                size: uniform(rng, STAR_SIZE.0, STAR_SIZE.1),
                twinkle_speed: uniform(rng, STAR_TWINKLE_SPEED.0, STAR_TWINKLE_SPEED.1),
                twinkle_phase: uniform(rng, 0.0, TAU),
            })
            .collect();

        Self { particles, stars }
    }
}
