//! Game state and core simulation types
//!
//! One `GameState` exists per game. It is replaced wholesale on restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::tuning::Tuning;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Slid to the bottom of the pole
    GameOver,
    /// Reached the top of the pole
    Win,
}

impl GamePhase {
    /// GameOver and Win are only left through a reset
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// The two balance inputs a slip can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceKey {
    Left,
    Right,
}

impl BalanceKey {
    /// Keyboard label shown in the balance prompt
    pub fn label(&self) -> char {
        match self {
            BalanceKey::Left => 'A',
            BalanceKey::Right => 'D',
        }
    }
}

/// An in-progress slip. Its presence is what "slipping" means, so a slip
/// always carries exactly one required key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slip {
    pub key: BalanceKey,
    /// Ticks since onset
    pub timer: u32,
}

/// A falling coconut (point position, drawn centered)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coconut {
    pub pos: Vec2,
}

impl Coconut {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

/// Complete game state (deterministic given the injected RNG)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance values for this game
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Climber top edge; decreases while climbing
    pub climber_y: f32,
    /// Climber left edge, locked to the pole every tick
    pub climber_x: f32,
    /// Active slip, if any
    pub slip: Option<Slip>,
    /// Live coconuts in spawn order
    pub coconuts: Vec<Coconut>,
    /// Ticks toward the next spawn check
    pub coconut_spawn_timer: u32,
    /// Height climbed, 0-100
    pub score: u32,
    /// Ticks simulated while playing
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh game with default tuning
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Fresh game: climber at the foot of the pole, nothing falling
    pub fn with_tuning(tuning: Tuning) -> Self {
        let climber_y = Self::lowest_y();
        Self {
            tuning,
            phase: GamePhase::Playing,
            climber_y,
            climber_x: Self::locked_x(),
            slip: None,
            coconuts: Vec::new(),
            coconut_spawn_timer: 0,
            score: Self::score_for(climber_y),
            time_ticks: 0,
        }
    }

    /// Replace this game with a fresh one, keeping the tuning
    pub fn reset(&mut self) {
        *self = Self::with_tuning(self.tuning);
    }

    /// Highest allowed climber_y value (the top of the pole)
    #[inline]
    pub const fn highest_y() -> f32 {
        POLE_TOP
    }

    /// Lowest allowed climber_y value (feet on the ground)
    #[inline]
    pub const fn lowest_y() -> f32 {
        POLE_BOTTOM - CLIMBER_HEIGHT
    }

    /// Distance the climber can travel along the pole
    #[inline]
    pub const fn pole_height() -> f32 {
        Self::lowest_y() - Self::highest_y()
    }

    /// Climber x that keeps them centered on the pole
    #[inline]
    pub fn locked_x() -> f32 {
        SCREEN_WIDTH / 2.0 - CLIMBER_WIDTH / 2.0
    }

    /// Height score for a climber position
    pub fn score_for(climber_y: f32) -> u32 {
        let climbed = (POLE_BOTTOM - climber_y - CLIMBER_HEIGHT) / Self::pole_height();
        (climbed * 100.0).round().clamp(0.0, 100.0) as u32
    }

    pub fn climber_rect(&self) -> Rect {
        Rect::new(self.climber_x, self.climber_y, CLIMBER_WIDTH, CLIMBER_HEIGHT)
    }

    /// The pole as drawn (full screen height)
    pub fn pole_rect() -> Rect {
        Rect::new(
            SCREEN_WIDTH / 2.0 - POLE_WIDTH / 2.0,
            0.0,
            POLE_WIDTH,
            SCREEN_HEIGHT,
        )
    }

    #[inline]
    pub fn is_slipping(&self) -> bool {
        self.slip.is_some()
    }

    /// Ticks into the current slip (0 when steady)
    #[inline]
    pub fn slip_timer(&self) -> u32 {
        self.slip.map_or(0, |s| s.timer)
    }

    /// The key that ends the current slip, if slipping
    #[inline]
    pub fn balance_key_needed(&self) -> Option<BalanceKey> {
        self.slip.map(|s| s.key)
    }

    /// Start a slip that needs `key` to recover
    pub fn begin_slip(&mut self, key: BalanceKey) {
        self.slip = Some(Slip { key, timer: 0 });
    }

    /// Back to steady climbing
    pub fn end_slip(&mut self) {
        self.slip = None;
    }
}
