//! Graph Fight - canvas renderer for a multi-team arena
//!
//! Core modules:
//! - `mapper`: Arena space to canvas space transform
//! - `sim`: Simulation trait and the seeded arena generator
//! - `renderer`: Draw routines and the dirty-flag render loop
//! - `platform`: Browser frame scheduling and logging setup
//! - `settings`: Persisted renderer configuration

pub mod error;
pub mod mapper;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConstructionError, FrameError, SimError};
pub use mapper::{ArenaExtents, CanvasExtents, CoordinateMapper};
pub use settings::{Settings, Style};
