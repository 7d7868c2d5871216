//! Decorative background star shell.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::options::StarfieldOptions;

/// Point positions on a spherical shell plus a slow yaw.
///
/// Polar angles are drawn as `acos(2u - 1)` so points are uniform over the
/// sphere surface rather than bunched at the poles.
#[derive(Debug, Clone)]
pub struct Starfield {
    positions: Vec<Vec3>,
    yaw: f32,
    speed: f32,
}

impl Starfield {
    /// Draw a new field. Uses `options.seed` when set, else a fresh seed.
    #[must_use]
    pub fn generate(options: &StarfieldOptions) -> Self {
        let mut rng = options
            .seed
            .map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);

        let positions = (0..options.count)
            .map(|_| {
                let radius =
                    options.inner_radius + rng.random::<f32>() * options.shell_depth;
                let theta = rng.random::<f32>() * TAU;
                let phi = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
                Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                )
            })
            .collect();

        Self {
            positions,
            yaw: 0.0,
            speed: options.rotation_speed,
        }
    }

    /// Star positions before rotation.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.yaw = (self.yaw + self.speed) % TAU;
    }

    /// Current yaw in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Model matrix applying the current yaw.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> StarfieldOptions {
        StarfieldOptions {
            seed: Some(seed),
            ..StarfieldOptions::default()
        }
    }

    #[test]
    fn stars_lie_in_the_shell() {
        let field = Starfield::generate(&seeded(1));
        assert_eq!(field.positions().len(), 3000);
        for p in field.positions() {
            let r = p.length();
            assert!((49.99..100.01).contains(&r), "radius {r}");
        }
    }

    #[test]
    fn seed_is_reproducible() {
        let a = Starfield::generate(&seeded(42));
        let b = Starfield::generate(&seeded(42));
        let c = Starfield::generate(&seeded(43));
        assert_eq!(a.positions(), b.positions());
        assert_ne!(a.positions(), c.positions());
    }

    #[test]
    fn hemispheres_are_balanced() {
        let field = Starfield::generate(&seeded(7));
        let north = field.positions().iter().filter(|p| p.z > 0.0).count();
        // Uniform on the sphere: roughly half above the equator.
        assert!((1200..1800).contains(&north), "north {north}");
    }

    #[test]
    fn yaw_advances_per_tick() {
        let mut field = Starfield::generate(&StarfieldOptions {
            count: 0,
            ..seeded(0)
        });
        for _ in 0..10 {
            field.tick();
        }
        assert!((field.yaw() - 0.001).abs() < 1e-6);
    }
}
