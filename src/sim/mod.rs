//! Simulation side of the renderer
//!
//! The render loop only sees the [`Simulation`] trait. [`Game`] is the
//! bundled implementation: a seeded arena of obstacles and teams.

pub mod arena;
pub mod geometry;

pub use arena::{Arena, Game, MAX_PLACEMENT_ATTEMPTS, Options, Player, Team};
pub use geometry::{Circle, Range, Rectangle};

/// Read access to a running simulation.
///
/// `arena` returns an owned snapshot: the renderer may keep or mutate it
/// without touching simulation state, and never aliases live state across
/// a frame boundary.
pub trait Simulation {
    fn arena(&self) -> Arena;
}

impl<S: Simulation + ?Sized> Simulation for Box<S> {
    fn arena(&self) -> Arena {
        (**self).arena()
    }
}
