//! Browser canvas draw target

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::target::DrawTarget;
use crate::error::{ConstructionError, FrameError};
use crate::mapper::CanvasExtents;

/// A `<canvas>` element and its 2d context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the canvas by id and acquire its 2d context
    pub fn from_document(document: &Document, id: &str) -> Result<Self, ConstructionError> {
        let canvas = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| ConstructionError::MissingCanvas(id.to_string()))?;
        Self::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, ConstructionError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(ConstructionError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }
}

impl DrawTarget for CanvasSurface {
    fn extents(&self) -> CanvasExtents {
        CanvasExtents {
            width: self.canvas.width() as f64,
            height: self.canvas.height() as f64,
        }
    }

    fn clear(&mut self, background: Option<&str>) {
        let CanvasExtents { width, height } = self.extents();
        match background {
            Some(colour) => {
                self.ctx.set_fill_style_str(colour);
                self.ctx.fill_rect(0.0, 0.0, width, height);
            }
            None => self.ctx.clear_rect(0.0, 0.0, width, height),
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, colour: &str) -> Result<(), FrameError> {
        self.ctx.set_fill_style_str(colour);
        self.ctx.begin_path();
        self.ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .map_err(|e| FrameError::Host(format!("{:?}", e)))?;
        self.ctx.fill();
        Ok(())
    }
}
