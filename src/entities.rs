/// All game entity types — plain data plus a few geometric accessors.
///
/// Behaviour lives in `physics`, `enemy` and `compute`; this module only
/// describes shapes and state.
use serde::{Deserialize, Serialize};

use crate::config::{EnemyConfig, PlayerConfig};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units.  `(x, y)` is the top-left corner and
/// `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

// ── Status & input ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    LevelComplete,
}

impl GameStatus {
    /// `GameOver` and `LevelComplete` end the session; ticks become no-ops.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }
}

/// Per-frame player intents, already decoded from raw input upstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal velocity set by a move intent.
    pub speed: f64,
    /// Initial vertical velocity of a jump (negative = upward).
    pub jump_power: f64,
    /// Added to `vy` every tick.
    pub gravity: f64,
    pub can_jump: bool,
    pub facing_right: bool,
    pub is_invulnerable: bool,
    /// Ticks spent invulnerable so far; always below the window length.
    pub invulnerability_timer: u32,
}

impl Player {
    /// Fresh player at the spawn point: at rest, airborne, facing right.
    pub fn new(x: f64, y: f64, cfg: &PlayerConfig) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width: cfg.width,
            height: cfg.height,
            speed: cfg.speed,
            jump_power: cfg.jump_power,
            gravity: cfg.gravity,
            can_jump: false,
            facing_right: true,
            is_invulnerable: false,
            invulnerability_timer: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Patrol bounds; `min_x < max_x` is the caller's responsibility.
    pub min_x: f64,
    pub max_x: f64,
    pub speed: f64,
    pub direction: Direction,
    pub is_defeated: bool,
    pub defeat_timer: u32,
}

impl Enemy {
    pub fn new(x: f64, y: f64, min_x: f64, max_x: f64, cfg: &EnemyConfig) -> Self {
        Self {
            x,
            y,
            width: cfg.width,
            height: cfg.height,
            min_x,
            max_x,
            speed: cfg.speed,
            direction: Direction::Right,
            is_defeated: false,
            defeat_timer: 0,
        }
    }

    /// Current collidable shape, in every state (defeated enemies included).
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Vertical midpoint used by stomp detection.
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

/// Everything that changes during a session.  Static level geometry
/// (platforms, goal, world bounds) lives in `level::Level` and is passed
/// alongside.  Cloneable so `compute::tick` can return a new copy without
/// mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// Every enemy spawned for the level.  Defeated enemies stay here.
    pub enemies: Vec<Enemy>,
    /// Coins not yet collected.  Order is irrelevant.
    pub coins: Vec<Rect>,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    pub frame: u64,
}
