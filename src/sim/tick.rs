//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The order of
//! the steps matters: balance, climb, slip onset, slip progression, coconut
//! spawn, coconut advance, horizontal lock, clamp, score.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{BalanceKey, Coconut, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
///
/// `up` is level-triggered (held). The balance and restart flags are
/// edge-triggered: true only on the tick the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Climb key held
    pub up: bool,
    /// Left balance key pressed this tick
    pub balance_left: bool,
    /// Right balance key pressed this tick
    pub balance_right: bool,
    /// Restart key pressed this tick (acted on by the session, not the tick)
    pub restart: bool,
}

impl TickInput {
    pub fn balance_pressed(&self, key: BalanceKey) -> bool {
        match key {
            BalanceKey::Left => self.balance_left,
            BalanceKey::Right => self.balance_right,
        }
    }
}

/// Sound cues emitted by a tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEvent {
    Climb,
    SlipStart,
    Balance,
    Fall,
    Hit,
    Win,
}

/// Uniform draw in [0, 1) against `p`: 0 never fires, 1 always does
#[inline]
fn roll<R: Rng>(rng: &mut R, p: f32) -> bool {
    rng.random::<f32>() < p
}

/// Advance the game state by one fixed timestep
///
/// Terminal phases are left untouched; restarting is the caller's job.
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) -> Vec<SoundEvent> {
    let mut events = Vec::new();

    if state.phase.is_terminal() {
        return events;
    }

    state.time_ticks += 1;
    let tuning = state.tuning;

    // Balance recovery (discrete key event, races the timeout below)
    if let Some(key) = state.balance_key_needed() {
        if input.balance_pressed(key) {
            state.end_slip();
            events.push(SoundEvent::Balance);
            log::debug!("tick {}: balanced with {:?}", state.time_ticks, key);
        }
    }

    // Climbing
    if input.up && !state.is_slipping() {
        state.climber_y -= CLIMB_SPEED;
        if roll(rng, tuning.p_climb_sound) {
            events.push(SoundEvent::Climb);
        }
    }

    // Slip onset
    if !state.is_slipping() && roll(rng, tuning.p_slip) {
        let key = if rng.random::<bool>() {
            BalanceKey::Left
        } else {
            BalanceKey::Right
        };
        state.begin_slip(key);
        events.push(SoundEvent::SlipStart);
        log::debug!("tick {}: slipping, needs {:?}", state.time_ticks, key);
    }

    // Slip progression
    let mut timed_out = false;
    if let Some(slip) = state.slip.as_mut() {
        slip.timer += 1;
        state.climber_y += SLIP_SPEED;

        if slip.timer > tuning.slip_grace_ticks {
            state.climber_y += FALL_SPEED;
            if roll(rng, tuning.p_fall_sound) {
                events.push(SoundEvent::Fall);
            }
        }

        timed_out = slip.timer > tuning.slip_timeout_ticks;
    }
    if timed_out {
        state.end_slip();
        log::debug!("tick {}: caught after slipping", state.time_ticks);
    }

    // Coconut spawn
    state.coconut_spawn_timer += 1;
    if state.coconut_spawn_timer >= tuning.spawn_interval {
        state.coconut_spawn_timer = 0;
        if roll(rng, tuning.p_spawn) {
            let x = rng.random_range(0..=SCREEN_WIDTH as u32) as f32;
            state.coconuts.push(Coconut::new(x, 0.0));
        }
    }

    // Coconut advance and collision. Builds the next list instead of
    // removing from the one being walked.
    let climber_x = state.climber_x;
    let mut climber_y = state.climber_y;
    let falling = std::mem::take(&mut state.coconuts);
    state.coconuts = falling
        .into_iter()
        .filter_map(|mut coconut| {
            coconut.pos.y += COCONUT_SPEED;

            let climber = Rect::new(climber_x, climber_y, CLIMBER_WIDTH, CLIMBER_HEIGHT);
            if climber.contains_point(coconut.pos) {
                climber_y += HIT_PENALTY;
                events.push(SoundEvent::Hit);
                log::debug!("coconut hit at x={}", coconut.pos.x);
                return None;
            }

            (coconut.pos.y <= SCREEN_HEIGHT).then_some(coconut)
        })
        .collect();
    state.climber_y = climber_y;

    // Horizontal lock
    state.climber_x = GameState::locked_x();

    // Bounds clamp and terminal check
    if state.climber_y < GameState::highest_y() {
        state.climber_y = GameState::highest_y();
        state.phase = GamePhase::Win;
        events.push(SoundEvent::Win);
    } else if state.climber_y > GameState::lowest_y() {
        state.climber_y = GameState::lowest_y();
        state.phase = GamePhase::GameOver;
    }

    state.score = GameState::score_for(state.climber_y);

    events
}
