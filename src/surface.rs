// Drawing surface abstraction. The field only ever clears, fills discs and
// strokes lines, so that is all a surface has to provide.

use crate::color::Color;
use crate::error::FieldError;
use vecmath::Vector2;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Result<SurfaceSize, FieldError> {
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            Ok(SurfaceSize { width, height })
        } else {
            Err(FieldError::InvalidSurfaceSize { width, height })
        }
    }
}

pub trait Surface {
    fn resize(&mut self, size: SurfaceSize);
    fn clear(&mut self) -> Result<(), FieldError>;
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color)
        -> Result<(), FieldError>;
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
    ) -> Result<(), FieldError>;
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        CanvasSurface { canvas, ctx }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width as u32);
        self.canvas.set_height(size.height as u32);
    }

    fn clear(&mut self) -> Result<(), FieldError> {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    ) -> Result<(), FieldError> {
        self.ctx.begin_path();
        self.ctx
            .arc(center[0], center[1], radius, 0.0, std::f64::consts::TAU)
            .map_err(|e| FieldError::from_js(&e, FieldError::Surface))?;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
    ) -> Result<(), FieldError> {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from[0], from[1]);
        self.ctx.line_to(to[0], to[1]);
        self.ctx.stroke();
        Ok(())
    }
}
