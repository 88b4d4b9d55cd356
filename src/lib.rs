//! Slippery Pole - climb the greasy pole before it climbs you
//!
//! Core modules:
//! - `sim`: Deterministic simulation (climbing, slipping, coconuts, win/loss)
//! - `session`: Owns the single live game and handles restarts
//! - `renderer`: Character-cell drawing and the crossterm frontend
//! - `input`: Edge-triggered key tracking for the fixed-tick loop
//! - `audio`: Sound cue dispatch (never blocks the simulation)
//! - `settings`: Player preferences persisted as JSON

pub mod audio;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;

    /// Screen dimensions (world units, y grows downward)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Pole geometry
    pub const POLE_WIDTH: f32 = 40.0;
    pub const POLE_TOP: f32 = 50.0;
    pub const POLE_BOTTOM: f32 = SCREEN_HEIGHT - 50.0;

    /// Climber box
    pub const CLIMBER_WIDTH: f32 = 60.0;
    pub const CLIMBER_HEIGHT: f32 = 80.0;

    /// Coconut sprite size (collision treats a coconut as a point)
    pub const COCONUT_SIZE: f32 = 30.0;

    /// Per-tick motion
    pub const CLIMB_SPEED: f32 = 2.0;
    pub const SLIP_SPEED: f32 = 1.0;
    pub const FALL_SPEED: f32 = 4.0;
    pub const COCONUT_SPEED: f32 = 3.0;
    /// Knock-down distance when a coconut lands on the climber
    pub const HIT_PENALTY: f32 = FALL_SPEED * 5.0;

    /// Ticks between coconut spawn checks
    pub const SPAWN_INTERVAL: u32 = 60;
    /// Slip ticks before the climber starts falling properly (1s at 60 Hz)
    pub const SLIP_GRACE_TICKS: u32 = 60;
    /// Slip ticks after which the climber catches themselves
    pub const SLIP_TIMEOUT_TICKS: u32 = 90;

    /// Per-tick probabilities
    pub const P_SLIP: f32 = 0.01;
    pub const P_SPAWN: f32 = 0.5;
    pub const P_CLIMB_SOUND: f32 = 0.05;
    pub const P_FALL_SOUND: f32 = 0.1;
}
