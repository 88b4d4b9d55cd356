//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only from the injected RNG
//! - Stable iteration order (coconuts in spawn order)
//! - No rendering, audio or terminal dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod tuning;

pub use collision::Rect;
pub use snapshot::RenderSnapshot;
pub use state::{BalanceKey, Coconut, GamePhase, GameState};
pub use tick::{SoundEvent, TickInput, tick};
pub use tuning::Tuning;
