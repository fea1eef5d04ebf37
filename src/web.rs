// Browser driver: finds the canvas, sizes it to the window, feeds window
// events into the engine and runs frames through requestAnimationFrame

use crate::color::Theme;
use crate::config::FieldConfig;
use crate::engine::Engine;
use crate::error::FieldError;
use crate::frame_loop::FrameScheduler;
use crate::surface::CanvasSurface;
use log::{debug, error, info};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, MouseEvent, Window};

#[cfg(feature = "frame-timing")]
pub struct Timer<'a> {
    name: &'a str,
}

#[cfg(feature = "frame-timing")]
impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        web_sys::console::time_with_label(name);
        Timer { name }
    }
}

#[cfg(feature = "frame-timing")]
impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        web_sys::console::time_end_with_label(self.name);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

// requestAnimationFrame with a single callback that is installed after the
// engine exists, since the callback needs a handle back to the engine
pub struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrames {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32, FieldError> {
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| FieldError::Scheduler("frame callback not installed".to_owned()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
            .map_err(|e| FieldError::from_js(&e, FieldError::Scheduler))
    }

    fn cancel_frame(&mut self, handle: i32) {
        // cancelling a spent id is a no-op in the browser as well
        let _ = self.window.cancel_animation_frame(handle);
    }
}

pub type WebEngine = Engine<CanvasSurface, AnimationFrames>;

type Listener = Closure<dyn FnMut(Event)>;

#[wasm_bindgen]
pub struct ParticleCanvas {
    engine: Option<Rc<RefCell<WebEngine>>>,
    window: Option<Window>,
    listeners: Vec<(&'static str, Listener)>,
}

#[wasm_bindgen]
impl ParticleCanvas {
    // Looks up the canvas by id and starts the effect. A page without the
    // canvas gets an inert handle rather than an error.
    pub fn mount(canvas_id: &str) -> Result<ParticleCanvas, JsValue> {
        ParticleCanvas::mount_with_config(canvas_id, FieldConfig::default())
    }

    pub fn mount_with_config(canvas_id: &str, config: FieldConfig) -> Result<ParticleCanvas, JsValue> {
        let window = web_sys::window().ok_or("no global `window` exists")?;
        let document = window.document().ok_or("should have a document on window")?;

        let canvas = match document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => canvas,
            None => {
                debug!("no canvas #{}, particle background disabled", canvas_id);
                return Ok(ParticleCanvas::inert());
            }
        };
        let ctx = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let frames = AnimationFrames {
            window: window.clone(),
            callback: callback.clone(),
        };
        let engine: Rc<RefCell<WebEngine>> = Rc::new(RefCell::new(Engine::new(config, frames)?));

        let frame_engine = Rc::downgrade(&engine);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(engine) = frame_engine.upgrade() {
                #[cfg(feature = "frame-timing")]
                let _timer = Timer::new("ParticleCanvas::frame");
                let result = engine.borrow_mut().on_frame();
                if let Err(err) = result {
                    error!("particle frame failed: {}", err);
                }
            }
        }) as Box<dyn FnMut()>));

        let (width, height) = viewport_size(&window)?;
        engine.borrow_mut().start(
            Some(CanvasSurface::new(canvas, ctx)),
            width,
            height,
            read_theme(&document),
        )?;
        info!(
            "particle background mounted on #{} with {} particles",
            canvas_id,
            engine.borrow().particle_count()
        );

        let mut handle = ParticleCanvas {
            engine: Some(engine),
            window: Some(window),
            listeners: Vec::new(),
        };
        handle.listen(document)?;
        Ok(handle)
    }

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.engine
            .as_ref()
            .map_or(false, |engine| engine.borrow().is_running())
    }

    pub fn particle_count(&self) -> usize {
        self.engine
            .as_ref()
            .map_or(0, |engine| engine.borrow().particle_count())
    }

    pub fn stop(&mut self) {
        if let Some(engine) = &self.engine {
            engine.borrow_mut().stop();
        }
    }

    // Rebuilds the field for an explicit size, restarting the loop
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        if let (Some(engine), Some(window)) = (&self.engine, &self.window) {
            let theme = window.document().as_ref().map_or(Theme::Dark, read_theme);
            engine.borrow_mut().on_resize(width, height, theme)?;
        }
        Ok(())
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        if let Some(engine) = &self.engine {
            engine.borrow_mut().on_pointer_move(x, y)?;
        }
        Ok(())
    }

    // Last known pointer position in canvas coordinates, if any
    pub fn pointer(&self) -> Option<Vec<f64>> {
        let engine = self.engine.as_ref()?;
        let pointer = engine.borrow().pointer();
        pointer.map(|p| p.to_vec())
    }

    pub fn pointer_leave(&mut self) {
        if let Some(engine) = &self.engine {
            engine.borrow_mut().on_pointer_leave();
        }
    }

    // Removes the window listeners and stops the loop. Safe to repeat.
    pub fn unmount(&mut self) {
        if let Some(window) = &self.window {
            for (name, listener) in self.listeners.drain(..) {
                let _ = window
                    .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
            }
        }
        if let Some(engine) = self.engine.take() {
            engine.borrow_mut().stop();
        }
    }
}

impl ParticleCanvas {
    fn inert() -> ParticleCanvas {
        ParticleCanvas {
            engine: None,
            window: None,
            listeners: Vec::new(),
        }
    }

    fn listen(&mut self, document: Document) -> Result<(), JsValue> {
        let (engine, window) = match (&self.engine, &self.window) {
            (Some(engine), Some(window)) => (Rc::downgrade(engine), window.clone()),
            _ => return Ok(()),
        };

        let resize: Listener = {
            let (engine, window) = (engine.clone(), window.clone());
            Closure::wrap(Box::new(move |_: Event| {
                let engine = match engine.upgrade() {
                    Some(engine) => engine,
                    None => return,
                };
                let result = viewport_size(&window)
                    .map_err(|e| FieldError::from_js(&e, FieldError::Surface))
                    .and_then(|(w, h)| engine.borrow_mut().on_resize(w, h, read_theme(&document)));
                if let Err(err) = result {
                    error!("particle resize failed: {}", err);
                }
            }) as Box<dyn FnMut(Event)>)
        };

        let mousemove: Listener = {
            let engine = engine.clone();
            Closure::wrap(Box::new(move |event: Event| {
                let (engine, event) = match (engine.upgrade(), event.dyn_ref::<MouseEvent>()) {
                    (Some(engine), Some(event)) => (engine, event),
                    _ => return,
                };
                let origin = pointer_origin(&engine);
                let x = event.client_x() as f64 - origin.0;
                let y = event.client_y() as f64 - origin.1;
                let result = engine.borrow_mut().on_pointer_move(x, y);
                if let Err(err) = result {
                    debug!("ignoring pointer: {}", err);
                }
            }) as Box<dyn FnMut(Event)>)
        };

        let mouseout: Listener = Closure::wrap(Box::new(move |event: Event| {
            // mouseout bubbles from every element; only leaving the page counts
            let left_page = event
                .dyn_ref::<MouseEvent>()
                .map_or(true, |event| event.related_target().is_none());
            if let (true, Some(engine)) = (left_page, engine.upgrade()) {
                engine.borrow_mut().on_pointer_leave();
            }
        }) as Box<dyn FnMut(Event)>);

        for (name, listener) in vec![
            ("resize", resize),
            ("mousemove", mousemove),
            ("mouseout", mouseout),
        ] {
            window.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
            self.listeners.push((name, listener));
        }
        Ok(())
    }
}

impl Drop for ParticleCanvas {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn viewport_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or("innerWidth is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("innerHeight is not a number")?;
    Ok((width, height))
}

// Read on every rebuild only, live theme switches don't recolor particles
fn read_theme(document: &Document) -> Theme {
    let attribute = document
        .document_element()
        .and_then(|root| root.get_attribute("data-theme"));
    Theme::from_attribute(attribute.as_deref())
}

// Client coordinates of the canvas' top left corner
fn pointer_origin(engine: &Rc<RefCell<WebEngine>>) -> (f64, f64) {
    engine.borrow().surface().map_or((0.0, 0.0), |surface| {
        let rect = surface.canvas().get_bounding_client_rect();
        (rect.left(), rect.top())
    })
}
