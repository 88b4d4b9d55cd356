//! Game balance values
//!
//! Fixed for the lifetime of a game. Tests override individual fields to
//! force or suppress random branches.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Chance per tick that a steady climber starts slipping
    pub p_slip: f32,
    /// Chance that a spawn check produces a coconut
    pub p_spawn: f32,
    /// Chance per climbing tick of a climb cue
    pub p_climb_sound: f32,
    /// Chance per falling tick of a fall cue
    pub p_fall_sound: f32,
    /// Ticks between spawn checks
    pub spawn_interval: u32,
    /// Slip ticks tolerated before the fall speeds up
    pub slip_grace_ticks: u32,
    /// Slip ticks after which the slip ends on its own
    pub slip_timeout_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            p_slip: P_SLIP,
            p_spawn: P_SPAWN,
            p_climb_sound: P_CLIMB_SOUND,
            p_fall_sound: P_FALL_SOUND,
            spawn_interval: SPAWN_INTERVAL,
            slip_grace_ticks: SLIP_GRACE_TICKS,
            slip_timeout_ticks: SLIP_TIMEOUT_TICKS,
        }
    }
}

impl Tuning {
    /// No random slips and no coconuts; sound sampling unchanged
    pub fn calm() -> Self {
        Self {
            p_slip: 0.0,
            p_spawn: 0.0,
            ..Self::default()
        }
    }
}
