// Tunables for the particle field. Defaults reproduce the site's background.

use crate::error::FieldError;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    // Surface area (px²) that buys one particle
    pub area_per_particle: f64,
    pub max_particles: u32,
    pub interaction_radius: f64,
    pub repulsion_scale: f64,
    // Fraction of the home offset recovered each frame
    pub spring: f64,
    pub connect_distance: f64,
    pub max_line_opacity: f64,
    pub line_width: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_density: f64,
    pub max_density: f64,
    pub max_drift: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            area_per_particle: 12000.0,
            max_particles: 150,
            interaction_radius: 150.0,
            repulsion_scale: 0.5,
            spring: 0.03,
            connect_distance: 120.0,
            max_line_opacity: 0.3,
            line_width: 1.0,
            min_radius: 1.0,
            max_radius: 4.0,
            min_density: 1.0,
            max_density: 31.0,
            max_drift: 0.25,
        }
    }
}

#[wasm_bindgen]
impl FieldConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldConfig {
        FieldConfig::default()
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        let positive = [
            ("area_per_particle", self.area_per_particle),
            ("interaction_radius", self.interaction_radius),
            ("connect_distance", self.connect_distance),
            ("line_width", self.line_width),
            ("min_radius", self.min_radius),
            ("min_density", self.min_density),
        ];
        for (name, value) in positive.iter() {
            if !value.is_finite() || *value <= 0.0 {
                return Err(FieldError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("repulsion_scale", self.repulsion_scale),
            ("max_line_opacity", self.max_line_opacity),
            ("max_drift", self.max_drift),
        ];
        for (name, value) in non_negative.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(FieldError::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if !(self.spring > 0.0 && self.spring <= 1.0) {
            return Err(FieldError::InvalidConfig(format!(
                "spring must be in (0, 1], got {}",
                self.spring
            )));
        }
        if !(self.max_radius.is_finite() && self.max_radius > self.min_radius) {
            return Err(FieldError::InvalidConfig(
                "max_radius must exceed min_radius".to_owned(),
            ));
        }
        if !(self.max_density.is_finite() && self.max_density > self.min_density) {
            return Err(FieldError::InvalidConfig(
                "max_density must exceed min_density".to_owned(),
            ));
        }
        Ok(())
    }

    // Fractional counts round up, so a 100x100 surface still gets a particle
    pub fn particle_count(&self, width: f64, height: f64) -> usize {
        let wanted = (width * height) / self.area_per_particle;
        wanted.min(self.max_particles as f64).max(0.0).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn count_scales_with_area() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count(1200.0, 800.0), 80);
        assert_eq!(config.particle_count(1000.0, 700.0), 59);
        assert_eq!(config.particle_count(0.0, 800.0), 0);
    }

    #[test]
    fn count_is_capped() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count(4000.0, 3000.0), 150);

        let small_cap = FieldConfig {
            max_particles: 10,
            ..FieldConfig::default()
        };
        assert_eq!(small_cap.particle_count(1200.0, 800.0), 10);
    }

    #[test]
    fn rejects_bad_values() {
        let config = FieldConfig {
            spring: 0.0,
            ..FieldConfig::default()
        };
        assert!(matches!(config.validate(), Err(FieldError::InvalidConfig(_))));

        let config = FieldConfig {
            interaction_radius: f64::NAN,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FieldConfig {
            max_radius: 0.5,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
