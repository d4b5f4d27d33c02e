use std::time::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ParticleConfig;
use crate::constants::PARTICLE_GLYPHS;

/// One decorative point. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub glyph: char,
}

/// Fixed-size field of points drifting down and wrapping to the top
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    min_speed: f64,
    max_speed: f64,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: &ParticleConfig, width: f64, height: f64, mut rng: StdRng) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let (min_speed, max_speed) = (config.min_speed, config.max_speed.max(config.min_speed));

        let particles = (0..config.count)
            .map(|_| Particle {
                x: rng.gen_range(0.0..width),
                y: rng.gen_range(0.0..height),
                speed: random_speed(&mut rng, min_speed, max_speed),
                glyph: PARTICLE_GLYPHS[rng.gen_range(0..PARTICLE_GLYPHS.len())],
            })
            .collect();

        Self { particles, width, height, min_speed, max_speed, rng }
    }

    pub fn from_entropy(config: &ParticleConfig, width: f64, height: f64) -> Self {
        Self::new(config, width, height, StdRng::from_entropy())
    }

    /// Advance every particle by `dt`
    pub fn step(&mut self, dt: Duration) {
        let dt = dt.as_secs_f64();

        for particle in &mut self.particles {
            particle.y += particle.speed * dt;

            if particle.y >= self.height {
                // 화면 아래로 나가면 위쪽으로 감고 x 재배치
                particle.y %= self.height;
                particle.x = self.rng.gen_range(0.0..self.width);
            }
        }
    }

    /// Rescale positions to a new area; the particle count never changes
    pub fn resize(&mut self, width: f64, height: f64) {
        let width = width.max(1.0);
        let height = height.max(1.0);
        if width == self.width && height == self.height {
            return;
        }

        let (sx, sy) = (width / self.width, height / self.height);
        for particle in &mut self.particles {
            particle.x = (particle.x * sx).min(width - f64::EPSILON).max(0.0);
            particle.y = (particle.y * sy).min(height - f64::EPSILON).max(0.0);
        }
        self.width = width;
        self.height = height;
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

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn speed_range(&self) -> (f64, f64) {
        (self.min_speed, self.max_speed)
    }
}

fn random_speed(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: usize) -> ParticleConfig {
        ParticleConfig { count, min_speed: 0.6, max_speed: 2.2 }
    }

    fn field(count: usize) -> ParticleField {
        ParticleField::new(&config(count), 80.0, 10.0, StdRng::seed_from_u64(7))
    }

    fn assert_inside(field: &ParticleField) {
        for p in field.particles() {
            assert!(p.x >= 0.0 && p.x < field.width(), "x out of range: {}", p.x);
            assert!(p.y >= 0.0 && p.y < field.height(), "y out of range: {}", p.y);
        }
    }

    #[test]
    fn test_seeded_within_bounds() {
        let field = field(48);
        assert_eq!(field.len(), 48);
        assert_inside(&field);
        for p in field.particles() {
            assert!(p.speed >= 0.6 && p.speed < 2.2);
            assert!(PARTICLE_GLYPHS.contains(&p.glyph));
        }
    }

    #[test]
    fn test_particles_drift_downward() {
        let mut field = field(16);
        let before: Vec<f64> = field.particles().iter().map(|p| p.y).collect();

        field.step(Duration::from_millis(100));

        for (p, y0) in field.particles().iter().zip(before) {
            let moved = p.y - y0;
            // 감김(wrap)이 없었다면 아래로 이동
            if moved >= 0.0 {
                assert!((moved - p.speed * 0.1).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_wraps_to_top_and_count_constant() {
        let mut field = field(32);
        for _ in 0..500 {
            field.step(Duration::from_millis(33));
            assert_eq!(field.len(), 32);
            assert_inside(&field);
        }
    }

    #[test]
    fn test_large_step_still_inside() {
        let mut field = field(8);
        field.step(Duration::from_secs(120));
        assert_inside(&field);
    }

    #[test]
    fn test_resize_rescales() {
        let mut field = field(20);
        field.resize(40.0, 5.0);
        assert_eq!(field.width(), 40.0);
        assert_eq!(field.height(), 5.0);
        assert_eq!(field.len(), 20);
        assert_inside(&field);
    }

    #[test]
    fn test_empty_field() {
        let mut field = field(0);
        field.step(Duration::from_secs(1));
        assert!(field.is_empty());
    }
}
