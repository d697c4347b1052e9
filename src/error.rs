//! Error types
//!
//! Construction failures are fatal for a session: the render loop never
//! starts. Frame failures are logged and the frame is skipped.

use thiserror::Error;

/// Failures raised by the arena generator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid game options: {0}")]
    InvalidOptions(&'static str),
    #[error("no valid position found for {0} after {1} attempts")]
    NoValidPosition(&'static str, usize),
}

/// Failures that prevent a render session from starting
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error(
        "invalid extents: arena ({x_max}, {y_max}), canvas {width}x{height}; all must be positive"
    )]
    InvalidExtents {
        x_max: f64,
        y_max: f64,
        width: f64,
        height: f64,
    },
    #[error("team palette must contain at least one colour")]
    EmptyPalette,
    #[error("canvas element `{0}` not found")]
    MissingCanvas(String),
    #[error("2d drawing context unavailable")]
    ContextUnavailable,
    #[error("simulation construction failed: {0}")]
    Simulation(#[from] SimError),
}

/// A host-level draw call failed mid-frame
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("draw call failed: {0}")]
    Host(String),
}

#[cfg(target_arch = "wasm32")]
impl From<ConstructionError> for wasm_bindgen::JsValue {
    fn from(err: ConstructionError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
