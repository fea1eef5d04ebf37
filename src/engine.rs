// Engine ties a particle field to a surface and a frame loop. All mutable
// state of the effect (particles, pointer, loop handle) lives here.

use crate::color::Theme;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::frame_loop::{FrameLoop, FrameScheduler};
use crate::surface::{Surface, SurfaceSize};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vecmath::Vector2;

pub struct Engine<S: Surface, F: FrameScheduler> {
    config: FieldConfig,
    rng: StdRng,
    surface: Option<S>,
    field: Option<ParticleField>,
    pointer: Option<Vector2<f64>>,
    frames: FrameLoop<F>,
}

impl<S: Surface, F: FrameScheduler> Engine<S, F> {
    pub fn new(config: FieldConfig, scheduler: F) -> Result<Self, FieldError> {
        Self::with_rng(config, scheduler, StdRng::from_entropy())
    }

    pub fn with_rng(config: FieldConfig, scheduler: F, rng: StdRng) -> Result<Self, FieldError> {
        config.validate()?;
        Ok(Engine {
            config,
            rng,
            surface: None,
            field: None,
            pointer: None,
            frames: FrameLoop::new(scheduler),
        })
    }

    // A missing surface is not an error: the effect is decorative, so
    // nothing happens. Calling start again rebuilds and keeps one loop.
    pub fn start(
        &mut self,
        surface: Option<S>,
        width: f64,
        height: f64,
        theme: Theme,
    ) -> Result<(), FieldError> {
        let size = SurfaceSize::new(width, height)?;
        let mut surface = match surface {
            Some(surface) => surface,
            None => {
                debug!("no surface to draw particles on, staying idle");
                return Ok(());
            }
        };

        self.frames.stop();
        surface.resize(size);
        self.surface = Some(surface);
        self.rebuild(size, theme)?;
        self.frames.start()
    }

    pub fn stop(&mut self) {
        self.frames.stop();
    }

    // Cancel, rebuild at the new density, restart. Never touches the set
    // while a frame is iterating it since both run on `&mut self`.
    pub fn on_resize(&mut self, width: f64, height: f64, theme: Theme) -> Result<(), FieldError> {
        let size = SurfaceSize::new(width, height)?;
        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return Ok(()),
        };

        self.frames.stop();
        surface.resize(size);
        self.rebuild(size, theme)?;
        self.frames.start()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<(), FieldError> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(FieldError::InvalidPointer { x, y });
        }
        self.pointer = Some([x, y]);
        Ok(())
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    // Runs when a requested frame fires. The next frame is requested even
    // if drawing failed, a bad frame does not stop the effect.
    pub fn on_frame(&mut self) -> Result<(), FieldError> {
        if !self.frames.is_running() {
            return Ok(());
        }
        let pointer = self.pointer;
        let drawn = match (self.field.as_mut(), self.surface.as_mut()) {
            (Some(field), Some(surface)) => field.frame(surface, pointer),
            _ => Ok(()),
        };
        self.frames.reschedule()?;
        drawn
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    pub fn particle_count(&self) -> usize {
        self.field.as_ref().map_or(0, |f| f.particles().len())
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> Option<&mut ParticleField> {
        self.field.as_mut()
    }

    pub fn pointer(&self) -> Option<Vector2<f64>> {
        self.pointer
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn frames(&self) -> &FrameLoop<F> {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameLoop<F> {
        &mut self.frames
    }

    fn rebuild(&mut self, size: SurfaceSize, theme: Theme) -> Result<(), FieldError> {
        match self.field.as_mut() {
            Some(field) => field.reinitialize(size, theme, &mut self.rng),
            None => {
                self.field = Some(ParticleField::new(self.config, size, theme, &mut self.rng)?);
            }
        }
        Ok(())
    }
}
