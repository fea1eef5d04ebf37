mod utils;

pub mod color;
pub mod config;
pub mod connections;
pub mod engine;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod particle;
pub mod surface;
pub mod web;

use log::{info, Level};
use wasm_bindgen::prelude::*;

pub use crate::color::{Color, Palette, Theme};
pub use crate::config::FieldConfig;
pub use crate::engine::Engine;
pub use crate::error::FieldError;
pub use crate::field::ParticleField;
pub use crate::frame_loop::{FrameLoop, FrameScheduler};
pub use crate::particle::Particle;
pub use crate::surface::{CanvasSurface, Surface, SurfaceSize};
pub use crate::web::ParticleCanvas;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging(Level::Debug);
    info!("particle-field initialized");
}
