//! Canvas 2D rendering module
//!
//! Paints obstacles and team players as filled circles, once per animation
//! frame and only when the simulation reported a change.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod paint;
pub mod session;
pub mod target;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use paint::{paint_obstacles, paint_players, team_colour};
pub use session::{DirtyFlag, FrameOutcome, RenderSession};
pub use target::{DrawCommand, DrawTarget, RecordingCanvas};
