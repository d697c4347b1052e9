//! Draw routines for arena entities
//!
//! Every routine paints in the order the simulation hands the shapes over:
//! later shapes cover earlier ones where they overlap.

use crate::error::FrameError;
use crate::mapper::CoordinateMapper;
use crate::sim::Circle;

use super::target::DrawTarget;

/// Default obstacle fill
pub const OBSTACLE_COLOUR: &str = "#000";

/// Default team palette, indexed by team position
pub const TEAM_PALETTE: &[&str] = &[
    "#F00", "#00F", "#0F0", "#f6ff52", "#F0F", "#0FF", "#A4C639", "#ffaf19", "#DFFF00", "#b219ff",
];

/// Colour for the team at `index`, wrapping around the palette.
///
/// Returns None only for an empty palette.
#[inline]
pub fn team_colour<S: AsRef<str>>(palette: &[S], index: usize) -> Option<&str> {
    if palette.is_empty() {
        return None;
    }
    Some(palette[index % palette.len()].as_ref())
}

/// Fill each circle in canvas space. Returns the number of circles painted.
pub fn paint_circles<'a, T, I>(
    target: &mut T,
    mapper: &CoordinateMapper,
    circles: I,
    colour: &str,
) -> Result<usize, FrameError>
where
    T: DrawTarget + ?Sized,
    I: IntoIterator<Item = &'a Circle>,
{
    let mut painted = 0;
    for circle in circles {
        let center = mapper.to_canvas_pos(circle.pos);
        let radius = mapper.map_length_to_width(circle.radius);
        target.fill_circle(center, radius, colour)?;
        painted += 1;
    }
    Ok(painted)
}

pub fn paint_obstacles<'a, T, I>(
    target: &mut T,
    mapper: &CoordinateMapper,
    obstacles: I,
    colour: &str,
) -> Result<usize, FrameError>
where
    T: DrawTarget + ?Sized,
    I: IntoIterator<Item = &'a Circle>,
{
    paint_circles(target, mapper, obstacles, colour)
}

pub fn paint_players<'a, T, I>(
    target: &mut T,
    mapper: &CoordinateMapper,
    players: I,
    colour: &str,
) -> Result<usize, FrameError>
where
    T: DrawTarget + ?Sized,
    I: IntoIterator<Item = &'a Circle>,
{
    paint_circles(target, mapper, players, colour)
}
