//! Seeded arena generator
//!
//! Places teams and obstacles inside a rectangular arena. Same options and
//! seed always produce the same arena.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::Simulation;
use super::geometry::{Circle, Range, Rectangle};
use crate::error::SimError;
use crate::mapper::ArenaExtents;

/// Placement attempts before giving up on a shape
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Upper bound on obstacles plus players in one arena
pub const MAX_ENTITIES: usize = 100_000;

/// Standard deviation of the obstacle radius distribution
const OBSTACLE_SIZE_SPREAD: f64 = 0.8;

/// Game construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Arena half-width
    pub x_max: f64,
    /// Arena half-height
    pub y_max: f64,
    pub num_obstacles: usize,
    pub min_obstacle_size: f64,
    pub max_obstacle_size: f64,
    /// One entry per team, giving its player count
    pub players_per_team: Vec<usize>,
    /// Player radius
    pub player_size: f64,
    pub seed: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            x_max: 20.0,
            y_max: 10.0,
            num_obstacles: 30,
            min_obstacle_size: 0.2,
            max_obstacle_size: 2.0,
            players_per_team: vec![4, 4],
            player_size: 0.5,
            seed: 1,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.x_max > 0.0 && self.y_max > 0.0) {
            return Err(SimError::InvalidOptions(
                "x_max and y_max must have a positive value",
            ));
        }
        if !(self.min_obstacle_size > 0.0 && self.player_size > 0.0) {
            return Err(SimError::InvalidOptions(
                "min obstacle size and player radius must be a positive value",
            ));
        }
        if !(self.min_obstacle_size < self.max_obstacle_size) {
            return Err(SimError::InvalidOptions(
                "the maximum obstacle size must be larger than the minimum obstacle size",
            ));
        }
        if self.players_per_team.is_empty() {
            return Err(SimError::InvalidOptions("at least one team is required"));
        }
        let total = self
            .players_per_team
            .iter()
            .try_fold(self.num_obstacles, |acc, &n| acc.checked_add(n));
        if !total.is_some_and(|n| n <= MAX_ENTITIES) {
            return Err(SimError::InvalidOptions(
                "too many obstacles and players for one arena",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub shape: Circle,
    pub alive: bool,
}

impl Player {
    pub fn new(shape: Circle) -> Self {
        Self { shape, alive: true }
    }
}

/// A team owns a region of the arena and the players spawned inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub area: Rectangle,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(area: Rectangle) -> Self {
        Self {
            area,
            players: Vec::new(),
        }
    }

    /// True if the shape touches any player of the team
    pub fn collides_with_player(&self, shape: &Circle) -> bool {
        self.players.iter().any(|p| p.shape.overlaps(shape))
    }

    /// Player shapes in spawn order
    pub fn shapes(&self) -> impl Iterator<Item = &Circle> {
        self.players.iter().map(|p| &p.shape)
    }
}

/// Point-in-time view of the arena: obstacles and teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub x_max: f64,
    pub y_max: f64,
    pub obstacles: Vec<Circle>,
    pub teams: Vec<Team>,
}

impl Arena {
    pub fn new(x_max: f64, y_max: f64) -> Self {
        Self {
            x_max,
            y_max,
            obstacles: Vec::new(),
            teams: Vec::new(),
        }
    }

    pub fn extents(&self) -> ArenaExtents {
        ArenaExtents {
            x_max: self.x_max,
            y_max: self.y_max,
        }
    }

    /// The whole arena as a rectangle centred on the origin
    pub fn area(&self) -> Rectangle {
        Rectangle::new(DVec2::ZERO, 2.0 * self.x_max, 2.0 * self.y_max)
    }

    pub fn collides_with_player(&self, shape: &Circle) -> bool {
        self.teams.iter().any(|t| t.collides_with_player(shape))
    }

    pub fn collides_with_obstacle(&self, shape: &Circle) -> bool {
        self.obstacles.iter().any(|o| o.overlaps(shape))
    }

    /// Spawn one team per entry of `players_per_team`, each in its own region
    pub fn add_teams<R: Rng + ?Sized>(
        &mut self,
        players_per_team: &[usize],
        player_size: f64,
        rng: &mut R,
    ) -> Result<(), SimError> {
        let areas = self.area().partition(players_per_team.len());

        for (&team_size, area) in players_per_team.iter().zip(areas) {
            let mut team = Team::new(area);
            let x_range = area.range_h().shrink(player_size);
            let y_range = area.range_v().shrink(player_size);
            let (Some(x_range), Some(y_range)) = (x_range, y_range) else {
                if team_size > 0 {
                    return Err(SimError::NoValidPosition("player", 0));
                }
                self.teams.push(team);
                continue;
            };

            for _ in 0..team_size {
                let shape = find_free_spot(&x_range, &y_range, player_size, rng, |c| {
                    !team.collides_with_player(c) && !self.collides_with_obstacle(c)
                })
                .ok_or(SimError::NoValidPosition("player", MAX_PLACEMENT_ATTEMPTS))?;
                team.players.push(Player::new(shape));
            }
            self.teams.push(team);
        }

        Ok(())
    }

    /// Scatter obstacles over the arena, keeping clear of every player.
    ///
    /// Radii are drawn from a normal distribution centred on half the size
    /// span and clamped to `[min_size, max_size]`.
    pub fn add_obstacles<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        min_size: f64,
        max_size: f64,
        rng: &mut R,
    ) -> Result<(), SimError> {
        let area = self.area();
        let (x_range, y_range) = (area.range_h(), area.range_v());
        let sizes = Normal::new((max_size - min_size) / 2.0, OBSTACLE_SIZE_SPREAD)
            .map_err(|_| SimError::InvalidOptions("obstacle sizes must be finite"))?;

        for _ in 0..count {
            let size = sizes.sample(rng).clamp(min_size, max_size);
            let shape = find_free_spot(&x_range, &y_range, size, rng, |c| {
                !self.collides_with_player(c)
            })
            .ok_or(SimError::NoValidPosition("obstacle", MAX_PLACEMENT_ATTEMPTS))?;
            self.obstacles.push(shape);
        }

        Ok(())
    }

    /// Number of circles a full frame paints
    pub fn circle_count(&self) -> usize {
        self.obstacles.len() + self.teams.iter().map(|t| t.players.len()).sum::<usize>()
    }
}

fn find_free_spot<R: Rng + ?Sized>(
    x_range: &Range,
    y_range: &Range,
    radius: f64,
    rng: &mut R,
    is_free: impl Fn(&Circle) -> bool,
) -> Option<Circle> {
    (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
        let pos = DVec2::new(x_range.sample(rng), y_range.sample(rng));
        let shape = Circle::new(pos, radius);
        is_free(&shape).then_some(shape)
    })
}

/// The default simulation: a seeded, generated arena
#[derive(Debug, Clone)]
pub struct Game {
    options: Options,
    arena: Arena,
}

impl Game {
    pub fn new(options: Options) -> Result<Self, SimError> {
        options.validate()?;
        let mut game = Self {
            arena: Arena::new(options.x_max, options.y_max),
            options,
        };
        game.init()?;
        Ok(game)
    }

    /// Clear and regenerate the arena from the current seed
    pub fn init(&mut self) -> Result<(), SimError> {
        let mut arena = Arena::new(self.options.x_max, self.options.y_max);
        let mut rng = Pcg32::seed_from_u64(self.options.seed);

        arena.add_teams(
            &self.options.players_per_team,
            self.options.player_size,
            &mut rng,
        )?;
        arena.add_obstacles(
            self.options.num_obstacles,
            self.options.min_obstacle_size,
            self.options.max_obstacle_size,
            &mut rng,
        )?;

        log::debug!(
            "Arena generated: {} obstacles, {} teams (seed {})",
            arena.obstacles.len(),
            arena.teams.len(),
            self.options.seed
        );
        self.arena = arena;
        Ok(())
    }

    /// Re-seed and regenerate. The previous arena is kept if generation fails.
    pub fn reset(&mut self, seed: u64) -> Result<(), SimError> {
        let previous = self.options.seed;
        self.options.seed = seed;
        if let Err(e) = self.init() {
            self.options.seed = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl Simulation for Game {
    fn arena(&self) -> Arena {
        self.arena.clone()
    }
}
