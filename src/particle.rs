// Simple particle struct: a rendered position that is pushed around by the
// pointer and springs back towards a slowly drifting home anchor

use crate::color::{Color, Palette};
use crate::config::FieldConfig;
use crate::surface::SurfaceSize;
use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub home: Vector2<f64>,
    pub radius: f64,
    pub density: f64,
    pub drift: Vector2<f64>,
    pub color: Color,
}

pub fn spawn<R: Rng + ?Sized>(
    rng: &mut R,
    size: SurfaceSize,
    config: &FieldConfig,
    palette: &Palette,
) -> Particle {
    let home = [rng.gen::<f64>() * size.width, rng.gen::<f64>() * size.height];
    Particle {
        pos: home,
        home,
        radius: rng.gen_range(config.min_radius, config.max_radius),
        density: rng.gen_range(config.min_density, config.max_density),
        drift: [
            (rng.gen::<f64>() - 0.5) * 2.0 * config.max_drift,
            (rng.gen::<f64>() - 0.5) * 2.0 * config.max_drift,
        ],
        color: palette.pick(rng),
    }
}

// Displacement a pointer at `pointer` applies to a particle at `pos`.
// Zero outside the interaction radius and at the pointer itself, where
// there is no direction to push in.
pub fn repulsion(
    pointer: Vector2<f64>,
    pos: Vector2<f64>,
    density: f64,
    config: &FieldConfig,
) -> Vector2<f64> {
    let away = vec2_sub(pos, pointer);
    let distance = vec2_len(away);
    if distance >= config.interaction_radius || distance <= 0.0 {
        return [0.0, 0.0];
    }
    let falloff = (config.interaction_radius - distance) / config.interaction_radius;
    let unit = vec2_scale(away, 1.0 / distance);
    vec2_scale(unit, falloff * density * config.repulsion_scale)
}

// Exponential ease back towards home
pub fn spring_back(particle: &mut Particle, spring: f64) {
    let offset = vec2_sub(particle.home, particle.pos);
    particle.pos = vec2_add(particle.pos, vec2_scale(offset, spring));
}

// Advance the home anchor and wrap it onto the opposite edge
pub fn drift_home(particle: &mut Particle, size: SurfaceSize) {
    let moved = vec2_add(particle.home, particle.drift);
    particle.home = [wrap(moved[0], size.width), wrap(moved[1], size.height)];
}

fn wrap(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid rounds tiny negatives up to exactly `extent`
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

pub fn update(
    particle: &mut Particle,
    pointer: Option<Vector2<f64>>,
    size: SurfaceSize,
    config: &FieldConfig,
) {
    if let Some(pointer) = pointer {
        let push = repulsion(pointer, particle.pos, particle.density, config);
        particle.pos = vec2_add(particle.pos, push);
    }
    spring_back(particle, config.spring);
    drift_home(particle, size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Theme;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn size() -> SurfaceSize {
        SurfaceSize::new(1200.0, 800.0).unwrap()
    }

    fn still_particle(pos: Vector2<f64>) -> Particle {
        Particle {
            pos,
            home: pos,
            radius: 2.0,
            density: 10.0,
            drift: [0.0, 0.0],
            color: Theme::Dark.palette().edge,
        }
    }

    #[test]
    fn spawn_respects_ranges() {
        let config = FieldConfig::default();
        let palette = Theme::Dark.palette();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let p = spawn(&mut rng, size(), &config, &palette);
            assert_eq!(p.pos, p.home);
            assert!(p.home[0] >= 0.0 && p.home[0] < 1200.0);
            assert!(p.home[1] >= 0.0 && p.home[1] < 800.0);
            assert!(p.radius >= 1.0 && p.radius < 4.0);
            assert!(p.density >= 1.0 && p.density < 31.0);
            assert!(p.drift[0] >= -0.25 && p.drift[0] < 0.25);
            assert!(p.drift[1] >= -0.25 && p.drift[1] < 0.25);
            assert!(palette.particles.contains(&p.color));
        }
    }

    #[test]
    fn repulsion_is_zero_outside_radius() {
        let config = FieldConfig::default();
        assert_eq!(repulsion([0.0, 0.0], [150.0, 0.0], 10.0, &config), [0.0, 0.0]);
        assert_eq!(repulsion([0.0, 0.0], [300.0, 40.0], 10.0, &config), [0.0, 0.0]);
        assert_eq!(repulsion([5.0, 5.0], [5.0, 5.0], 10.0, &config), [0.0, 0.0]);
    }

    #[test]
    fn repulsion_grows_towards_pointer() {
        let config = FieldConfig::default();
        let mut last = 0.0;
        for d in (1..150).rev() {
            let push = repulsion([0.0, 0.0], [d as f64, 0.0], 10.0, &config);
            let magnitude = vec2_len(push);
            assert!(magnitude > last, "distance {} gave {}", d, magnitude);
            assert!(push[0] > 0.0, "push must point away from the pointer");
            last = magnitude;
        }
        // falloff 1 * density 10 * scale 0.5 in the limit
        assert!(last < 5.0 && last > 4.9);
    }

    #[test]
    fn repulsion_scales_with_density() {
        let config = FieldConfig::default();
        let light = repulsion([0.0, 0.0], [30.0, 40.0], 2.0, &config);
        let heavy = repulsion([0.0, 0.0], [30.0, 40.0], 20.0, &config);
        assert!((vec2_len(heavy) - 10.0 * vec2_len(light)).abs() < 1e-9);
        // (150 - 50) / 150 * 2 * 0.5 along (0.6, 0.8)
        assert!((light[0] - 0.4).abs() < 1e-9);
        assert!((light[1] - 0.533_333_333_333).abs() < 1e-9);
    }

    #[test]
    fn spring_moves_three_percent_home() {
        let mut p = still_particle([100.0, 100.0]);
        p.pos = [200.0, 0.0];
        spring_back(&mut p, 0.03);
        assert!((p.pos[0] - 197.0).abs() < 1e-9);
        assert!((p.pos[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn home_wraps_to_opposite_edge() {
        let mut p = still_particle([0.1, 799.9]);
        p.drift = [-0.2, 0.2];
        drift_home(&mut p, size());
        assert!((p.home[0] - 1199.9).abs() < 1e-9);
        assert!((p.home[1] - 0.1).abs() < 1e-9);
    }

    #[test]
    fn wrap_never_returns_extent() {
        assert_eq!(wrap(-1e-20, 800.0), 0.0);
        assert_eq!(wrap(800.0, 800.0), 0.0);
        assert_eq!(wrap(12.0, 0.0), 0.0);
    }

    #[test]
    fn update_without_pointer_is_spring_then_drift() {
        let config = FieldConfig::default();
        let mut p = still_particle([600.0, 400.0]);
        p.pos = [700.0, 400.0];
        p.drift = [0.1, -0.1];
        update(&mut p, None, size(), &config);
        assert!((p.pos[0] - 697.0).abs() < 1e-9);
        assert_eq!(p.pos[1], 400.0);
        assert!((p.home[0] - 600.1).abs() < 1e-9);
        assert!((p.home[1] - 399.9).abs() < 1e-9);
    }

    #[test]
    fn update_with_pointer_pushes_then_springs() {
        let config = FieldConfig::default();
        let mut p = still_particle([600.0, 400.0]);
        update(&mut p, Some([500.0, 400.0]), size(), &config);
        // pushed (150 - 100) / 150 * 10 * 0.5 = 5/3 right, then 3% of it recovered
        let pushed = 600.0 + 5.0 / 3.0;
        let expected = pushed + (600.0 - pushed) * 0.03;
        assert!((p.pos[0] - expected).abs() < 1e-9);
        assert_eq!(p.pos[1], 400.0);
    }
}
