// The particle set and everything that happens to it in one frame

use crate::color::{Palette, Theme};
use crate::config::FieldConfig;
use crate::connections;
use crate::error::FieldError;
use crate::particle::{self, Particle};
use crate::surface::{Surface, SurfaceSize};
use log::debug;
use rand::Rng;
use vecmath::Vector2;

pub struct ParticleField {
    config: FieldConfig,
    size: SurfaceSize,
    palette: Palette,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(
        config: FieldConfig,
        size: SurfaceSize,
        theme: Theme,
        rng: &mut R,
    ) -> Result<Self, FieldError> {
        config.validate()?;
        let mut field = ParticleField {
            config,
            size,
            palette: theme.palette(),
            particles: Vec::new(),
        };
        field.reinitialize(size, theme, rng);
        Ok(field)
    }

    // Throws the whole set away and builds a fresh one for `size`. The
    // theme is only consulted here, existing particles keep their colors.
    pub fn reinitialize<R: Rng + ?Sized>(&mut self, size: SurfaceSize, theme: Theme, rng: &mut R) {
        let count = self.config.particle_count(size.width, size.height);
        self.size = size;
        self.palette = theme.palette();
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(particle::spawn(rng, size, &self.config, &self.palette));
        }
        debug!(
            "particle field rebuilt: {}x{} -> {} particles",
            size.width, size.height, count
        );
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    // Physics only, no drawing
    pub fn update(&mut self, pointer: Option<Vector2<f64>>) {
        for p in &mut self.particles {
            particle::update(p, pointer, self.size, &self.config);
        }
    }

    // Clear, move and draw every particle, then join the close ones
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        pointer: Option<Vector2<f64>>,
    ) -> Result<(), FieldError> {
        surface.clear()?;
        self.update(pointer);
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, p.color)?;
        }
        connections::draw_connections(surface, &self.particles, self.palette.edge, &self.config)
    }
}
