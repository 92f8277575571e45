//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::world_gen::generate_platforms;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; the simulation no longer changes
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Dropped below the bottom of the viewport
    Fell,
    /// Touched an enemy
    EnemyCollision,
}

/// Notable things that happened during a tick, drained by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameOver { cause: GameOverCause, score: u64 },
}

/// The player's runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (same `f32` spacing caveat as `Enemy::pos`)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = down)
    pub vy: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn new(x: f32, size: f32) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            size: Vec2::splat(size),
            vy: 0.0,
            on_ground: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Stand on top of a platform
    pub fn land_on(&mut self, platform: &Platform) {
        self.pos.y = platform.pos.y - self.size.y;
        self.vy = 0.0;
        self.on_ground = true;
    }

    /// Place the player on the platform covering its x, if any
    pub fn place_on_start_platform(&mut self, platforms: &[Platform]) {
        let x = self.pos.x;
        if let Some(platform) = platforms
            .iter()
            .find(|p| p.pos.x <= x && p.pos.x + p.size.x > x)
        {
            self.land_on(platform);
        }
    }
}

/// A ground tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    /// Oscillates horizontally between the world edges
    pub moves: bool,
    /// Current horizontal direction (±1)
    pub dir: f32,
}

impl Platform {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Advance a mover one step, turning around past either world edge
    pub fn advance(&mut self, world_width: f32) {
        if !self.moves {
            return;
        }
        self.pos.x += self.dir;
        if self.pos.x < 0.0 || self.pos.x + self.size.x > world_width {
            self.dir = -self.dir;
        }
    }
}

/// Enemy behavior profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Drifts horizontally at ground level
    Walker,
    /// Drops from above the viewport
    Faller,
    /// Climbs from below the viewport
    Riser,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Walker, EnemyKind::Faller, EnemyKind::Riser];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Walker => "walker",
            EnemyKind::Faller => "faller",
            EnemyKind::Riser => "riser",
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            EnemyKind::Walker => WALKER_SIZE,
            EnemyKind::Faller | EnemyKind::Riser => FLYER_SIZE,
        }
    }

    /// Starting y for this kind
    pub fn spawn_y(&self, viewport_height: f32) -> f32 {
        match self {
            EnemyKind::Walker => viewport_height - WALKER_GROUND_OFFSET,
            EnemyKind::Faller => -FLYER_EDGE_OFFSET,
            EnemyKind::Riser => viewport_height + FLYER_EDGE_OFFSET,
        }
    }

    /// Velocity for this kind; `leftward` only matters for walkers
    pub fn velocity(&self, leftward: bool) -> Vec2 {
        match self {
            EnemyKind::Walker => {
                let vx = if leftward { -WALKER_SPEED } else { WALKER_SPEED };
                Vec2::new(vx, 0.0)
            }
            EnemyKind::Faller => Vec2::new(0.0, FLYER_SPEED),
            EnemyKind::Riser => Vec2::new(0.0, -FLYER_SPEED),
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Top-left corner
    ///
    /// `f32` like every other position. Past x = 2^19 the x spacing is
    /// 1/16, so a walker's 1.2 step lands on 1.1875 out there; per-frame
    /// error stays under half that spacing.
    pub pos: Vec2,
    pub size: Vec2,
    /// Per-frame motion; an axis the kind doesn't move along is zero
    pub vel: Vec2,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, viewport_height: f32, leftward: bool) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, kind.spawn_y(viewport_height)),
            size: Vec2::splat(kind.size()),
            vel: kind.velocity(leftward),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Still within the despawn margin around the world and viewport
    pub fn in_bounds(&self, world_width: f32, viewport_height: f32, margin: f32) -> bool {
        self.pos.x > -margin
            && self.pos.x < world_width + margin
            && self.pos.y > -margin
            && self.pos.y < viewport_height + margin
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Frames survived
    pub score: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Ground tiles in generation order (ascending starting x)
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Generate a level from `seed` and stand the player on it
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = generate_platforms(&tuning, &mut rng);

        let mut player = Player::new(tuning.player_start_x, tuning.player_size);
        player.place_on_start_platform(&platforms);

        log::info!(
            "Generated {} platforms ({} movers) across {} units",
            platforms.len(),
            platforms.iter().filter(|p| p.moves).count(),
            tuning.world_width
        );

        Self {
            seed,
            tuning,
            score: 0,
            phase: GamePhase::Playing,
            player,
            platforms,
            enemies: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// One-way transition into GameOver; later causes are ignored
    pub fn end_game(&mut self, cause: GameOverCause) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.score,
        });
        log::info!("Game over ({:?}) with score {}", cause, self.score);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
