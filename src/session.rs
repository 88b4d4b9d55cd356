//! The single live game
//!
//! Owns the state and the RNG for the current run and turns a restart press
//! in a terminal phase into a wholesale reset.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::sim::{GameState, RenderSnapshot, SoundEvent, TickInput, Tuning, tick};

pub struct Session {
    state: GameState,
    rng: Pcg32,
    seed: u64,
    games_played: u32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("New game (seed {seed})");
        Self {
            state: GameState::with_tuning(tuning),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            games_played: 1,
        }
    }

    /// Advance one tick, or restart if the game is over and restart was pressed
    pub fn step(&mut self, input: &TickInput) -> Vec<SoundEvent> {
        if self.state.phase.is_terminal() {
            if input.restart {
                self.reset();
            }
            return Vec::new();
        }

        let before = self.state.phase;
        let events = tick(&mut self.state, input, &mut self.rng);
        if self.state.phase != before {
            log::info!(
                "Game {} ended: {:?} at {}% after {} ticks",
                self.games_played,
                self.state.phase,
                self.state.score,
                self.state.time_ticks
            );
        }
        events
    }

    /// Throw the current game away and start a fresh one on a new seed
    pub fn reset(&mut self) {
        self.seed = next_seed(self.seed);
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.state.reset();
        self.games_played += 1;
        log::info!("Restarted (game {}, seed {})", self.games_played, self.seed);
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ticks simulated since the last reset
    pub fn ticks(&self) -> u64 {
        self.state.time_ticks
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }
}

/// Deterministic seed chain so a replay of the same key presses across
/// restarts reproduces every game
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn up() -> TickInput {
        TickInput {
            up: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut session = Session::with_tuning(1, Tuning::calm());
        let input = TickInput {
            restart: true,
            ..up()
        };
        session.step(&input);
        assert_eq!(session.games_played(), 1);
        assert_eq!(session.ticks(), 1);
        assert_eq!(session.state().climber_y, GameState::lowest_y() - 2.0);
    }

    #[test]
    fn test_win_then_restart() {
        let mut session = Session::with_tuning(7, Tuning::calm());
        while session.state().phase == GamePhase::Playing {
            session.step(&up());
        }
        assert_eq!(session.state().phase, GamePhase::Win);
        assert_eq!(session.snapshot().score, 100);

        // Stays won until restart is pressed
        assert!(session.step(&up()).is_empty());
        assert_eq!(session.state().phase, GamePhase::Win);

        let events = session.step(&TickInput {
            restart: true,
            ..Default::default()
        });
        assert!(events.is_empty());
        assert_eq!(session.games_played(), 2);
        assert_eq!(session.state().phase, GamePhase::Playing);
        assert_eq!(session.state().climber_y, GameState::lowest_y());
        assert_eq!(session.ticks(), 0);
        assert_ne!(session.seed(), 7);
        // Tuning survives the reset
        assert_eq!(session.state().tuning, Tuning::calm());
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Session::new(42);
        let mut b = Session::new(42);
        for i in 0..1500 {
            let input = TickInput {
                up: i % 5 != 0,
                balance_left: i % 9 == 0,
                balance_right: i % 10 == 0,
                restart: i % 100 == 0,
            };
            assert_eq!(a.step(&input), b.step(&input));
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.seed(), b.seed());
    }
}
