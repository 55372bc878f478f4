//! A single drifting particle.

use plexus_core::{FieldSettings, Point, Size};
use rand::Rng;

/// A dot moving at constant velocity across a toroidal field.
///
/// Velocity is fixed at construction; only the position changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    radius: f64,
}

impl Particle {
    pub const fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            radius,
        }
    }

    /// Spawn a particle at a uniformly random position inside `bounds`.
    ///
    /// Each velocity axis is uniform in `[-max_speed, max_speed)` and the
    /// radius is uniform in `[min_radius, max_radius)`.
    pub fn spawn<R: Rng + ?Sized>(bounds: Size, settings: &FieldSettings, rng: &mut R) -> Self {
        let x = wrap_coordinate(rng.random::<f64>() * bounds.width, bounds.width);
        let y = wrap_coordinate(rng.random::<f64>() * bounds.height, bounds.height);
        let vx = (rng.random::<f64>() * 2.0 - 1.0) * settings.max_speed;
        let vy = (rng.random::<f64>() * 2.0 - 1.0) * settings.max_speed;
        let span = settings.max_radius - settings.min_radius;
        let radius = settings.min_radius + rng.random::<f64>() * span;
        Self::new(x, y, vx, vy, radius)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Point {
        Point::new(self.vx, self.vy)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Move by one frame's worth of velocity, wrapping at the edges.
    pub fn advance(&mut self, bounds: Size) {
        self.x = wrap_coordinate(self.x + self.vx, bounds.width);
        self.y = wrap_coordinate(self.y + self.vy, bounds.height);
    }

    /// Bring the position back inside `bounds`.
    pub(crate) fn confine(&mut self, bounds: Size) {
        self.x = wrap_coordinate(self.x, bounds.width);
        self.y = wrap_coordinate(self.y, bounds.height);
    }
}

/// Wrap `value` into `[0, extent)`. Degenerate extents collapse to 0.
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
    if extent.is_nan() || extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_wrap_past_right_edge() {
        let bounds = Size::new(800.0, 600.0);
        let mut p = Particle::new(800.0 - 0.1, 300.0, 0.3, 0.0, 2.0);
        p.advance(bounds);
        assert!((p.position().x - 0.2).abs() < 1e-9);
        assert_eq!(p.position().y, 300.0);
    }

    #[test]
    fn test_wrap_past_left_edge() {
        let bounds = Size::new(800.0, 600.0);
        let mut p = Particle::new(0.1, 0.0, -0.3, -0.1, 2.0);
        p.advance(bounds);
        assert!((p.position().x - 799.8).abs() < 1e-9);
        assert!((p.position().y - 599.9).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_coordinate_edges() {
        assert_eq!(wrap_coordinate(100.0, 100.0), 0.0);
        assert_eq!(wrap_coordinate(-1e-20, 100.0), 0.0);
        assert_eq!(wrap_coordinate(5.0, 0.0), 0.0);
        assert_eq!(wrap_coordinate(5.0, f64::NAN), 0.0);
        assert_eq!(wrap_coordinate(f64::INFINITY, 10.0), 0.0);
    }

    #[test]
    fn test_spawn_ranges() {
        let settings = FieldSettings::default();
        let bounds = Size::new(320.0, 200.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = Particle::spawn(bounds, &settings, &mut rng);
            let pos = p.position();
            let vel = p.velocity();
            assert!((0.0..bounds.width).contains(&pos.x));
            assert!((0.0..bounds.height).contains(&pos.y));
            assert!((-0.2..0.2).contains(&vel.x));
            assert!((-0.2..0.2).contains(&vel.y));
            assert!((1.0..3.0).contains(&p.radius()));
        }
    }

    #[test]
    fn test_velocity_is_constant() {
        let bounds = Size::new(50.0, 40.0);
        let mut p = Particle::new(10.0, 10.0, 0.17, -0.19, 1.5);
        let velocity = p.velocity();
        for _ in 0..5000 {
            p.advance(bounds);
            assert_eq!(p.velocity(), velocity);
            assert!((0.0..bounds.width).contains(&p.position().x));
            assert!((0.0..bounds.height).contains(&p.position().y));
        }
    }
}
