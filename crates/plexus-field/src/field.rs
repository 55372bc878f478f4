//! The particle set together with the bounds it lives in.

use plexus_core::{FieldSettings, Rect, Size};
use rand::Rng;

use crate::particle::Particle;
use crate::surface::Surface;

/// Particles plus the logical bounds they were generated for.
///
/// Bounds and particles are only ever replaced together, so a frame never
/// wraps particles against the dimensions of a different generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    bounds: Size,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Build a field from explicit particles, wrapping them into `bounds`.
    pub fn new(bounds: Size, mut particles: Vec<Particle>) -> Self {
        for p in &mut particles {
            p.confine(bounds);
        }
        Self { bounds, particles }
    }

    /// Spawn `count` fresh particles inside `bounds`.
    pub fn populate<R: Rng + ?Sized>(
        count: usize,
        bounds: Size,
        settings: &FieldSettings,
        rng: &mut R,
    ) -> Self {
        let particles = (0..count)
            .map(|_| Particle::spawn(bounds, settings, rng))
            .collect();
        Self { bounds, particles }
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.advance(bounds);
        }
    }

    /// Draw dots and connections at the current positions.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, settings: &FieldSettings) {
        let dot = settings.particle_color();
        for p in &self.particles {
            surface.fill_circle(p.position(), p.radius(), dot);
        }

        for (i, a) in self.particles.iter().enumerate() {
            let from = a.position();
            for b in &self.particles[i + 1..] {
                let to = b.position();
                let Some(alpha) = connection_alpha(
                    from.distance(to),
                    settings.connection_distance,
                    settings.max_line_alpha,
                ) else {
                    continue;
                };
                surface.stroke_line(from, to, settings.line_color(alpha), settings.line_width);
            }
        }
    }

    /// One animation frame: clear, move, draw.
    pub fn render_frame<S: Surface + ?Sized>(&mut self, surface: &mut S, settings: &FieldSettings) {
        surface.clear_rect(Rect::from_size(self.bounds));
        self.step();
        self.draw(surface, settings);
    }
}

/// Opacity of the line joining two particles `distance` apart.
///
/// Fades linearly from `max_alpha` at distance zero to nothing at
/// `max_distance`; `None` means no line is drawn.
pub fn connection_alpha(distance: f64, max_distance: f64, max_alpha: f32) -> Option<f32> {
    if distance >= 0.0 && distance < max_distance {
        Some(((1.0 - distance / max_distance) * f64::from(max_alpha)) as f32)
    } else {
        None
    }
}
