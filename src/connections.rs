// Faint lines between particles that are close to each other. Purely
// visual; particles never interact physically.

use crate::color::Color;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::particle::Particle;
use crate::surface::Surface;
use vecmath::{vec2_len, vec2_sub};

// Line opacity for two particles `distance` apart, None when too far to connect
pub fn connection_opacity(distance: f64, config: &FieldConfig) -> Option<f64> {
    if distance < config.connect_distance {
        Some((config.connect_distance - distance) / config.connect_distance * config.max_line_opacity)
    } else {
        None
    }
}

// Visits every unordered pair once. O(n²), bounded by `max_particles`.
pub fn for_each_connection<F>(particles: &[Particle], config: &FieldConfig, mut visit: F)
where
    F: FnMut(&Particle, &Particle, f64),
{
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance = vec2_len(vec2_sub(a.pos, b.pos));
            if let Some(opacity) = connection_opacity(distance, config) {
                visit(a, b, opacity);
            }
        }
    }
}

pub fn draw_connections<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    edge: Color,
    config: &FieldConfig,
) -> Result<(), FieldError> {
    let mut result = Ok(());
    for_each_connection(particles, config, |a, b, opacity| {
        if result.is_ok() {
            result = surface.stroke_line(a.pos, b.pos, config.line_width, edge.with_alpha(opacity));
        }
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Theme;
    use crate::surface::recording::{DrawCall, RecordingSurface};

    fn at(pos: [f64; 2]) -> Particle {
        Particle {
            pos,
            home: pos,
            radius: 1.0,
            density: 1.0,
            drift: [0.0, 0.0],
            color: Theme::Dark.palette().edge,
        }
    }

    #[test]
    fn opacity_falls_off_linearly() {
        let config = FieldConfig::default();
        assert_eq!(connection_opacity(0.0, &config), Some(0.3));
        assert_eq!(connection_opacity(60.0, &config), Some(0.15));
        assert_eq!(connection_opacity(120.0, &config), None);
        assert_eq!(connection_opacity(500.0, &config), None);
        assert!(connection_opacity(119.9, &config).unwrap() > 0.0);
    }

    #[test]
    fn coincident_particles_draw_full_opacity_line() {
        let config = FieldConfig::default();
        let edge = Theme::Dark.palette().edge;
        let particles = [at([10.0, 10.0]), at([10.0, 10.0])];
        let mut surface = RecordingSurface::default();
        draw_connections(&mut surface, &particles, edge, &config).unwrap();
        assert_eq!(
            surface.calls,
            vec![DrawCall::Line {
                from: [10.0, 10.0],
                to: [10.0, 10.0],
                width: 1.0,
                color: edge.with_alpha(0.3),
            }]
        );
    }

    #[test]
    fn far_pairs_are_skipped() {
        let config = FieldConfig::default();
        let particles = [at([0.0, 0.0]), at([120.0, 0.0]), at([0.0, 200.0])];
        let mut surface = RecordingSurface::default();
        draw_connections(&mut surface, &particles, Theme::Dark.palette().edge, &config).unwrap();
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn each_pair_visited_once() {
        let config = FieldConfig::default();
        let particles = [at([0.0, 0.0]), at([10.0, 0.0]), at([20.0, 0.0]), at([30.0, 0.0])];
        let mut pairs = 0;
        for_each_connection(&particles, &config, |_, _, _| pairs += 1);
        assert_eq!(pairs, 6);
    }
}
