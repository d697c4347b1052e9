//! Arena space to canvas space transform
//!
//! Arena space is centred on the origin with Y pointing up and extends to
//! `±x_max, ±y_max`. Canvas space has its origin at the top-left corner,
//! Y pointing down, and extends to `width × height` pixels.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;

/// Half-width and half-height of arena space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaExtents {
    pub x_max: f64,
    pub y_max: f64,
}

/// Pixel dimensions of the render target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasExtents {
    pub width: f64,
    pub height: f64,
}

/// Maps arena positions and lengths onto canvas pixels.
///
/// Immutable after construction. No clamping is applied: positions outside
/// the arena map outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    arena: ArenaExtents,
    canvas: CanvasExtents,
    x_scale: f64,
    y_scale: f64,
    length_scale: f64,
}

impl CoordinateMapper {
    pub fn new(arena: ArenaExtents, canvas: CanvasExtents) -> Result<Self, ConstructionError> {
        // NaN and infinities are rejected too
        let positive = |v: f64| v > 0.0 && v.is_finite();
        if !(positive(arena.x_max)
            && positive(arena.y_max)
            && positive(canvas.width)
            && positive(canvas.height))
        {
            return Err(ConstructionError::InvalidExtents {
                x_max: arena.x_max,
                y_max: arena.y_max,
                width: canvas.width,
                height: canvas.height,
            });
        }

        let x_scale = canvas.width / (2.0 * arena.x_max);
        let y_scale = canvas.height / (2.0 * arena.y_max);
        let length_scale = canvas.width / arena.x_max;
        // Tiny extents can still overflow the scale
        if !(x_scale.is_finite() && y_scale.is_finite() && length_scale.is_finite()) {
            return Err(ConstructionError::InvalidExtents {
                x_max: arena.x_max,
                y_max: arena.y_max,
                width: canvas.width,
                height: canvas.height,
            });
        }

        Ok(Self {
            arena,
            canvas,
            x_scale,
            y_scale,
            length_scale,
        })
    }

    #[inline]
    pub fn arena(&self) -> ArenaExtents {
        self.arena
    }

    #[inline]
    pub fn canvas(&self) -> CanvasExtents {
        self.canvas
    }

    /// Pixels per arena unit along X
    #[inline]
    pub fn x_scale(&self) -> f64 {
        self.x_scale
    }

    /// Pixels per arena unit along Y
    #[inline]
    pub fn y_scale(&self) -> f64 {
        self.y_scale
    }

    /// Convert an arena position to a canvas position (flips Y, moves origin to top-left)
    #[inline]
    pub fn to_canvas_pos(&self, pos: DVec2) -> DVec2 {
        DVec2::new(
            (pos.x + self.arena.x_max) * self.x_scale,
            (self.arena.y_max - pos.y) * self.y_scale,
        )
    }

    /// Pixels per arena unit for lengths: `width / x_max`
    #[inline]
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    /// Convert an arena length (a radius) to canvas pixels.
    ///
    /// Scales by `width / x_max`, twice the position scale along X, so an
    /// arena radius of 2 on a ±20 arena drawn 800 px wide becomes 80 px.
    /// Only the X axis is used: on a canvas whose aspect ratio differs from
    /// the arena's, circles come out elliptical relative to the Y axis.
    #[inline]
    pub fn map_length_to_width(&self, length: f64) -> f64 {
        length * self.length_scale
    }
}
