//! Drawing sink abstraction
//!
//! The render loop draws through [`DrawTarget`] so the browser canvas and
//! the in-memory [`RecordingCanvas`] are interchangeable.

use glam::DVec2;

use crate::error::FrameError;
use crate::mapper::CanvasExtents;

/// Minimal set of 2D primitives the renderer needs, in canvas pixels
pub trait DrawTarget {
    /// Pixel dimensions of the drawing surface
    fn extents(&self) -> CanvasExtents;

    /// Wipe the whole surface. With a background colour the surface is
    /// filled with it, otherwise it becomes transparent.
    fn clear(&mut self, background: Option<&str>);

    /// Fill a full circle centred at `center`
    fn fill_circle(&mut self, center: DVec2, radius: f64, colour: &str) -> Result<(), FrameError>;
}

impl<T: DrawTarget + ?Sized> DrawTarget for &mut T {
    fn extents(&self) -> CanvasExtents {
        (**self).extents()
    }

    fn clear(&mut self, background: Option<&str>) {
        (**self).clear(background)
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, colour: &str) -> Result<(), FrameError> {
        (**self).fill_circle(center, radius, colour)
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        background: Option<String>,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        colour: String,
    },
}

/// Draw target that records every call instead of rasterising
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    extents: CanvasExtents,
    commands: Vec<DrawCommand>,
    /// Fail the fill call with this index (counted over the canvas lifetime)
    fail_at: Option<usize>,
    fills: usize,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            extents: CanvasExtents { width, height },
            commands: Vec::new(),
            fail_at: None,
            fills: 0,
        }
    }

    /// Make the `n`th fill call (0-based) fail with a host error
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clear calls recorded so far
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }

    /// Recorded fills as `(center, radius, colour)`
    pub fn circles(&self) -> impl Iterator<Item = (DVec2, f64, &str)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle {
                center,
                radius,
                colour,
            } => Some((*center, *radius, colour.as_str())),
            DrawCommand::Clear { .. } => None,
        })
    }
}

impl DrawTarget for RecordingCanvas {
    fn extents(&self) -> CanvasExtents {
        self.extents
    }

    fn clear(&mut self, background: Option<&str>) {
        self.commands.push(DrawCommand::Clear {
            background: background.map(str::to_owned),
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, colour: &str) -> Result<(), FrameError> {
        let index = self.fills;
        self.fills += 1;
        if self.fail_at == Some(index) {
            return Err(FrameError::Host(format!("injected failure at fill {index}")));
        }
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            colour: colour.to_owned(),
        });
        Ok(())
    }
}
