/// All game entity types and the board geometry they live on.
///
/// Behaviour lives in `compute`; this module only describes shapes and
/// fixed tables.

use crate::platform::Sprite;

// ── Board geometry (pixels) ───────────────────────────────────────────────────

pub const TILE_WIDTH: i32 = 101;
pub const TILE_HEIGHT: i32 = 83;

/// The five x-columns the player and gems occupy.
pub const LANES: [i32; 5] = [0, 101, 202, 303, 404];

/// y-offsets of the four rows enemies run along and gems sit on.
pub const ENEMY_ROWS: [i32; 4] = [60, 143, 226, 309];

pub const HOME_X: i32 = 202;
pub const HOME_Y: i32 = 400;

/// Row where the character picker is drawn.
pub const CHARACTER_ROW_Y: i32 = 500;

/// Chebyshev distance at or below which two entities touch.
pub const COLLISION_DISTANCE: f32 = 30.0;

// ── Enemy tuning ──────────────────────────────────────────────────────────────

pub const ENEMY_SPAWN_X: f32 = -101.0;
pub const ENEMY_BOUNDARY_X: f32 = 505.0;

/// Six-slot weighted speed table: slow bugs are the most common.
pub const ENEMY_SPEEDS: [f32; 6] = [300.0, 300.0, 300.0, 600.0, 600.0, 900.0];

// ── Player tuning ─────────────────────────────────────────────────────────────

pub const PLAYER_STEP_X: i32 = TILE_WIDTH;
pub const PLAYER_STEP_Y: i32 = TILE_HEIGHT;
pub const PLAYER_BOUNDARY_X: i32 = 404;
pub const PLAYER_BOUNDARY_Y: i32 = 500;

/// Moving above this y means the player reached the water.
pub const WIN_ROW_Y: i32 = 60;

// ── Score deltas ──────────────────────────────────────────────────────────────

pub const WIN_POINTS: i64 = 100;
pub const LOSE_POINTS: i64 = 10;

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a key name to a direction. Unknown names give `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Pixel delta of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -PLAYER_STEP_Y),
            Direction::Down => (0, PLAYER_STEP_Y),
            Direction::Left => (-PLAYER_STEP_X, 0),
            Direction::Right => (PLAYER_STEP_X, 0),
        }
    }
}

// ── Characters ────────────────────────────────────────────────────────────────

/// Selectable player sprites, one per lane on the bottom row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Character {
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    PrincessGirl,
}

impl Character {
    pub const ALL: [Character; 5] = [
        Character::Boy,
        Character::CatGirl,
        Character::HornGirl,
        Character::PinkGirl,
        Character::PrincessGirl,
    ];

    /// Character standing in the lane at `x`, if `x` is a lane.
    pub fn for_lane(x: i32) -> Option<Self> {
        LANES
            .iter()
            .position(|&lane| lane == x)
            .map(|i| Self::ALL[i])
    }

    pub fn sprite(self) -> Sprite {
        match self {
            Character::Boy => Sprite::CharBoy,
            Character::CatGirl => Sprite::CharCatGirl,
            Character::HornGirl => Sprite::CharHornGirl,
            Character::PinkGirl => Sprite::CharPinkGirl,
            Character::PrincessGirl => Sprite::CharPrincessGirl,
        }
    }
}

// ── Gems ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GemKind {
    Blue,
    Green,
    Orange,
}

impl GemKind {
    pub const ALL: [GemKind; 3] = [GemKind::Blue, GemKind::Green, GemKind::Orange];

    /// Points awarded for picking the gem up.
    pub fn value(self) -> u32 {
        match self {
            GemKind::Blue => 500,
            GemKind::Green => 2000,
            GemKind::Orange => 5000,
        }
    }

    pub fn sprite(self) -> Sprite {
        match self {
            GemKind::Blue => Sprite::GemBlue,
            GemKind::Green => Sprite::GemGreen,
            GemKind::Orange => Sprite::GemOrange,
        }
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// A bug running left to right along one of the enemy rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: i32,
    /// Pixels per second.
    pub move_speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Sprite drawn for the player. Only changes while on the bottom row.
    pub character: Character,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Collectable {
    pub x: i32,
    pub y: i32,
    pub gem: GemKind,
}

/// Running score. Every change is pushed to `display` straight away.
#[derive(Debug)]
pub struct Score<D> {
    pub(crate) value: i64,
    pub(crate) display: D,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one game needs: the entities plus the random source they draw
/// from. `D` receives score updates and `R` drives every random choice.
#[derive(Debug)]
pub struct GameState<D, R> {
    pub enemies: Vec<Enemy>,
    pub player: Player,
    pub collectable: Collectable,
    pub score: Score<D>,
    pub rng: R,
    /// Frames rendered so far.
    pub frame: u64,
}

/// What happened during one `GameState::render` pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Number of enemies that touched the player this frame.
    pub enemy_hits: u32,
    /// Value of the gem picked up this frame, if any.
    pub gem_collected: Option<u32>,
}
