//! Advances the field by one tick and draws the resulting frame.

use super::{DrawSurface, FieldConfig, Particle, ParticleField, Point, Rgba};

const STAR_GRAY: u8 = 180;
const PARTICLE_GRAY: u8 = 150;
const LINK_GRAY: u8 = 100;
const STAR_BASE_OPACITY: f64 = 0.15;
const STAR_TWINKLE_AMPLITUDE: f64 = 0.2;
const LINK_MAX_OPACITY: f64 = 0.1;

/// A connection between two particles closer than the link distance, `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

impl Link {
    /// Fades from `0.1` at distance 0 to `0` at `max_distance`.
    pub fn opacity(&self, max_distance: f64) -> f64 {
        LINK_MAX_OPACITY * (1.0 - self.distance / max_distance)
    }
}

/// Star opacity for a twinkle phase. Ranges over roughly `[-0.05, 0.35]`.
pub fn star_opacity(phase: f64) -> f64 {
    STAR_BASE_OPACITY + STAR_TWINKLE_AMPLITUDE * phase.sin()
}

/// Wraps one coordinate to the opposite edge once it leaves `[0, max]`.
///
/// Only strictly-outside values wrap: `0` and `max` themselves stay put.
pub fn wrap_axis(value: f64, max: f64) -> f64 {
    if value < 0.0 {
        max
    } else if value > max {
        0.0
    } else {
        value
    }
}

/// Moves a particle by its velocity and wraps it into `width` x `height`.
pub fn advance_particle(particle: &mut Particle, width: f64, height: f64) {
    particle.x = wrap_axis(particle.x + particle.vx, width);
    particle.y = wrap_axis(particle.y + particle.vy, height);
}

/// Every unordered pair closer than `max_distance`, each reported once.
pub fn proximity_links(particles: &[Particle], max_distance: f64) -> Vec<Link> {
    let mut links = Vec::new();
    for (a, p1) in particles.iter().enumerate() {
        for (offset, p2) in particles[a + 1..].iter().enumerate() {
            let distance = (p1.x - p2.x).hypot(p1.y - p2.y);
            if distance < max_distance {
                links.push(Link {
                    a,
                    b: a + 1 + offset,
                    distance,
                });
            }
        }
    }
    links
}

/// Runs one tick: clear, twinkle and draw stars, move and draw particles, draw links.
pub fn step_frame<S: DrawSurface>(field: &mut ParticleField, surface: &mut S, config: &FieldConfig) {
    let size = surface.size();
    surface.clear_rect(0.0, 0.0, size.width, size.height);

    for star in &mut field.stars {
        star.twinkle_phase += star.twinkle_speed;
        surface.fill_circle(
            Point {
                x: star.x,
                y: star.y,
            },
            star.size,
            Rgba::gray(STAR_GRAY, star_opacity(star.twinkle_phase)),
        );
    }

    for particle in &mut field.particles {
        advance_particle(particle, size.width, size.height);
        surface.fill_circle(
            Point {
                x: particle.x,
                y: particle.y,
            },
            particle.size,
            Rgba::gray(PARTICLE_GRAY, particle.opacity),
        );
    }

    for link in proximity_links(&field.particles, config.link_distance) {
        let (p1, p2) = (&field.particles[link.a], &field.particles[link.b]);
        surface.stroke_line(
            Point { x: p1.x, y: p1.y },
            Point { x: p2.x, y: p2.y },
            Rgba::gray(LINK_GRAY, link.opacity(config.link_distance)),
        );
    }
}
