//! Per-frame render loop
//!
//! A [`RenderSession`] owns the simulation handle, the draw target and the
//! mapper between them. The host calls [`RenderSession::tick`] once per
//! animation frame; a frame is only painted when the [`DirtyFlag`] is set.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ConstructionError, FrameError};
use crate::mapper::CoordinateMapper;
use crate::settings::Style;
use crate::sim::{Arena, Simulation};

use super::paint::{paint_obstacles, paint_players, team_colour};
use super::target::DrawTarget;

/// Shared "something changed, redraw" marker.
///
/// Clones share the same flag. A tick consumes it with a single atomic swap,
/// so a mark that lands while a frame is being painted is kept for the next
/// tick.
#[derive(Debug, Clone)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    /// A new flag, initially set so the first tick paints
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn mark(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_dirty(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Read and clear in one step
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for DirtyFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing changed since the last frame
    Skipped,
    /// Frame painted completely
    Drawn { circles: usize },
    /// A draw call failed; the rest of the frame was abandoned
    Dropped,
}

pub struct RenderSession<S, T> {
    sim: S,
    target: T,
    mapper: CoordinateMapper,
    style: Style,
    dirty: DirtyFlag,
    frames_drawn: u64,
}

impl<S: Simulation, T: DrawTarget> RenderSession<S, T> {
    /// Build a session. Fails on non-positive extents or an empty palette;
    /// nothing is drawn in that case.
    pub fn new(sim: S, target: T, style: Style) -> Result<Self, ConstructionError> {
        if style.team_palette.is_empty() {
            return Err(ConstructionError::EmptyPalette);
        }
        let mapper = CoordinateMapper::new(sim.arena().extents(), target.extents())?;

        log::info!(
            "Render session ready: arena ±{}x±{}, canvas {}x{}",
            mapper.arena().x_max,
            mapper.arena().y_max,
            mapper.canvas().width,
            mapper.canvas().height
        );

        Ok(Self {
            sim,
            target,
            mapper,
            style,
            dirty: DirtyFlag::new(),
            frames_drawn: 0,
        })
    }

    /// Handle for signalling changes from outside the loop
    pub fn dirty_flag(&self) -> DirtyFlag {
        self.dirty.clone()
    }

    pub fn mark_changed(&self) {
        self.dirty.mark();
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }

    /// Mutable access to the simulation. Callers mark the flag themselves
    /// once they have changed something visible.
    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Swap in a new simulation and remap to its extents.
    ///
    /// On error the session keeps the old simulation.
    pub fn replace_simulation(&mut self, sim: S) -> Result<(), ConstructionError> {
        self.mapper = CoordinateMapper::new(sim.arena().extents(), self.target.extents())?;
        self.sim = sim;
        self.dirty.mark();
        Ok(())
    }

    /// Run one animation frame
    pub fn tick(&mut self) -> FrameOutcome {
        if !self.dirty.take() {
            return FrameOutcome::Skipped;
        }

        self.target.clear(self.style.background.as_deref());
        let arena = self.sim.arena();

        match self.paint(&arena) {
            Ok(circles) => {
                self.frames_drawn += 1;
                log::trace!("Frame {} drawn ({} circles)", self.frames_drawn, circles);
                FrameOutcome::Drawn { circles }
            }
            Err(e) => {
                log::warn!("Dropping frame: {}", e);
                FrameOutcome::Dropped
            }
        }
    }

    fn paint(&mut self, arena: &Arena) -> Result<usize, FrameError> {
        let mut circles = paint_obstacles(
            &mut self.target,
            &self.mapper,
            &arena.obstacles,
            &self.style.obstacle_colour,
        )?;

        for (i, team) in arena.teams.iter().enumerate() {
            // Palette is checked non-empty at construction
            let Some(colour) = team_colour(&self.style.team_palette, i) else {
                break;
            };
            circles += paint_players(&mut self.target, &self.mapper, team.shapes(), colour)?;
        }

        Ok(circles)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::DVec2;

    use super::*;
    use crate::renderer::target::{DrawCommand, RecordingCanvas};
    use crate::sim::{Circle, Game, Options, Player, Rectangle, Team};

    /// Simulation whose arena is set directly by the test
    #[derive(Clone)]
    struct Scripted {
        arena: Rc<RefCell<Arena>>,
        reads: Rc<Cell<usize>>,
    }

    impl Scripted {
        fn new(arena: Arena) -> Self {
            Self {
                arena: Rc::new(RefCell::new(arena)),
                reads: Rc::new(Cell::new(0)),
            }
        }
    }

    impl Simulation for Scripted {
        fn arena(&self) -> Arena {
            self.reads.set(self.reads.get() + 1);
            self.arena.borrow().clone()
        }
    }

    fn team(players: &[(f64, f64)]) -> Team {
        let mut team = Team::new(Rectangle::new(DVec2::ZERO, 40.0, 20.0));
        team.players = players
            .iter()
            .map(|&(x, y)| Player::new(Circle::new(DVec2::new(x, y), 0.5)))
            .collect();
        team
    }

    fn small_arena(teams: usize) -> Arena {
        let mut arena = Arena::new(20.0, 10.0);
        arena.obstacles.push(Circle::new(DVec2::ZERO, 2.0));
        arena.teams = (0..teams).map(|i| team(&[(i as f64, 1.0)])).collect();
        arena
    }

    fn style(palette: &[&str]) -> Style {
        Style {
            team_palette: palette.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_tick_draws_second_skips() {
        let sim = Scripted::new(small_arena(2));
        let mut session =
            RenderSession::new(sim, RecordingCanvas::new(800.0, 400.0), Style::default()).unwrap();

        assert_eq!(session.tick(), FrameOutcome::Drawn { circles: 3 });
        assert_eq!(session.tick(), FrameOutcome::Skipped);
        assert_eq!(session.target().clear_count(), 1);
        assert_eq!(session.frames_drawn(), 1);
    }

    #[test]
    fn test_skipped_tick_does_not_read_arena() {
        let sim = Scripted::new(small_arena(1));
        let reads = sim.reads.clone();
        let mut session =
            RenderSession::new(sim, RecordingCanvas::new(800.0, 400.0), Style::default()).unwrap();
        let after_construction = reads.get();

        session.tick();
        assert_eq!(reads.get(), after_construction + 1);
        session.tick();
        session.tick();
        assert_eq!(reads.get(), after_construction + 1);
    }

    #[test]
    fn test_mark_triggers_redraw_with_fresh_state() {
        let sim = Scripted::new(small_arena(1));
        let arena = sim.arena.clone();
        let mut session =
            RenderSession::new(sim, RecordingCanvas::new(800.0, 400.0), Style::default()).unwrap();
        let flag = session.dirty_flag();

        session.tick();
        arena.borrow_mut().obstacles.push(Circle::new(DVec2::new(10.0, 5.0), 1.0));

        // Not marked yet: the new obstacle is not drawn
        assert_eq!(session.tick(), FrameOutcome::Skipped);

        flag.mark();
        assert_eq!(session.tick(), FrameOutcome::Drawn { circles: 3 });
        assert_eq!(session.target().clear_count(), 2);
    }

    /// Simulation that signals a change while its arena is being read
    struct MarksWhileRead {
        arena: Arena,
        flag: Rc<RefCell<Option<DirtyFlag>>>,
        marks_left: Rc<Cell<usize>>,
    }

    impl Simulation for MarksWhileRead {
        fn arena(&self) -> Arena {
            if self.marks_left.get() > 0 {
                self.marks_left.set(self.marks_left.get() - 1);
                if let Some(flag) = self.flag.borrow().as_ref() {
                    flag.mark();
                }
            }
            self.arena.clone()
        }
    }

    #[test]
    fn test_mark_during_draw_kept_for_next_tick() {
        let flag_slot = Rc::new(RefCell::new(None));
        let marks_left = Rc::new(Cell::new(0));
        let sim = MarksWhileRead {
            arena: small_arena(1),
            flag: flag_slot.clone(),
            marks_left: marks_left.clone(),
        };
        let mut session =
            RenderSession::new(sim, RecordingCanvas::new(800.0, 400.0), Style::default()).unwrap();
        let flag = session.dirty_flag();
        *flag_slot.borrow_mut() = Some(flag.clone());
        marks_left.set(1);

        assert_eq!(session.tick(), FrameOutcome::Drawn { circles: 2 });
        // The mark raised mid-frame survives the frame that consumed the old one
        assert!(flag.is_dirty());

        assert_eq!(session.tick(), FrameOutcome::Drawn { circles: 2 });
        assert!(!flag.is_dirty());
        assert_eq!(session.tick(), FrameOutcome::Skipped);
        assert_eq!(session.target().clear_count(), 2);
        assert_eq!(session.frames_drawn(), 2);
    }

    #[test]
    fn test_frame_layout() {
        let sim = Scripted::new(small_arena(2));
        let mut session = RenderSession::new(
            sim,
            RecordingCanvas::new(800.0, 400.0),
            style(&["red", "blue", "green"]),
        )
        .unwrap();
        session.tick();

        let commands = session.target().commands();
        assert_eq!(commands[0], DrawCommand::Clear { background: None });
        assert_eq!(
            commands[1],
            DrawCommand::FillCircle {
                center: DVec2::new(400.0, 200.0),
                radius: 80.0,
                colour: "#000".into(),
            }
        );
        let colours: Vec<_> = session.target().circles().map(|(_, _, c)| c).collect();
        assert_eq!(colours, vec!["#000", "red", "blue"]);
    }

    #[test]
    fn test_team_colours_wrap() {
        let sim = Scripted::new(small_arena(5));
        let mut session = RenderSession::new(
            sim,
            RecordingCanvas::new(800.0, 400.0),
            style(&["red", "blue", "green"]),
        )
        .unwrap();
        session.tick();

        let colours: Vec<_> = session.target().circles().skip(1).map(|(_, _, c)| c).collect();
        assert_eq!(colours, vec!["red", "blue", "green", "red", "blue"]);
    }

    #[test]
    fn test_background_fill() {
        let sim = Scripted::new(small_arena(1));
        let style = Style {
            background: Some("#FFF".into()),
            ..Default::default()
        };
        let mut session =
            RenderSession::new(sim, RecordingCanvas::new(800.0, 400.0), style).unwrap();
        session.tick();

        assert_eq!(
            session.target().commands()[0],
            DrawCommand::Clear {
                background: Some("#FFF".into())
            }
        );
    }

    #[test]
    fn test_zero_extent_arena_rejected() {
        let sim = Scripted::new(Arena::new(0.0, 10.0));
        let result = RenderSession::new(sim, RecordingCanvas::new(800.0, 400.0), Style::default());
        assert!(matches!(
            result,
            Err(ConstructionError::InvalidExtents { .. })
        ));
    }

    #[test]
    fn test_empty_palette_rejected() {
        let sim = Scripted::new(small_arena(1));
        let result = RenderSession::new(sim, RecordingCanvas::new(800.0, 400.0), style(&[]));
        assert!(matches!(result, Err(ConstructionError::EmptyPalette)));
    }

    #[test]
    fn test_failed_draw_drops_frame() {
        let sim = Scripted::new(small_arena(2));
        let canvas = RecordingCanvas::new(800.0, 400.0).failing_at(1);
        let mut session = RenderSession::new(sim, canvas, Style::default()).unwrap();

        assert_eq!(session.tick(), FrameOutcome::Dropped);
        assert_eq!(session.frames_drawn(), 0);
        // No retry until something changes
        assert_eq!(session.tick(), FrameOutcome::Skipped);

        session.mark_changed();
        assert_eq!(session.tick(), FrameOutcome::Drawn { circles: 3 });
    }

    #[test]
    fn test_replace_simulation_remaps() {
        let sim = Scripted::new(small_arena(1));
        let mut session =
            RenderSession::new(sim, RecordingCanvas::new(800.0, 400.0), Style::default()).unwrap();
        session.tick();

        let mut wide = small_arena(1);
        wide.x_max = 40.0;
        session.replace_simulation(Scripted::new(wide)).unwrap();
        assert_eq!(session.mapper().x_scale(), 10.0);
        assert!(matches!(session.tick(), FrameOutcome::Drawn { .. }));

        let bad = session.replace_simulation(Scripted::new(Arena::new(-1.0, 1.0)));
        assert!(bad.is_err());
        assert_eq!(session.mapper().x_scale(), 10.0);
    }

    #[test]
    fn test_renders_generated_game() {
        let game = Game::new(Options::default()).unwrap();
        let mut session =
            RenderSession::new(game, RecordingCanvas::new(800.0, 400.0), Style::default()).unwrap();

        assert_eq!(session.tick(), FrameOutcome::Drawn { circles: 38 });

        session.simulation_mut().reset(7).unwrap();
        session.mark_changed();
        assert_eq!(session.tick(), FrameOutcome::Drawn { circles: 38 });
        assert_eq!(session.target().clear_count(), 2);
    }
}
