//! Read-only view of a tick's result for the drawing side

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{BalanceKey, GamePhase, GameState};

/// Everything a renderer needs, taken once per tick after the update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub climber: Rect,
    pub pole: Rect,
    pub coconuts: Vec<glam::Vec2>,
    pub score: u32,
    pub phase: GamePhase,
    /// Key the player must press, while slipping
    pub slip_prompt: Option<BalanceKey>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            climber: state.climber_rect(),
            pole: GameState::pole_rect(),
            coconuts: state.coconuts.iter().map(|c| c.pos).collect(),
            score: state.score,
            phase: state.phase,
            slip_prompt: state.balance_key_needed(),
        }
    }

    pub fn score_text(&self) -> String {
        format!("Height: {}%", self.score)
    }

    pub fn prompt_text(&self) -> Option<String> {
        self.slip_prompt
            .map(|key| format!("Press '{}' to balance!", key.label()))
    }

    /// Overlay message for terminal phases
    pub fn banner_text(&self) -> Option<&'static str> {
        match self.phase {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some("Game Over! Press 'R' to restart"),
            GamePhase::Win => Some("You Win! Press 'R' to play again"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Coconut;

    #[test]
    fn test_capture_playing() {
        let mut state = GameState::new();
        state.coconuts.push(Coconut::new(12.0, 34.0));
        state.begin_slip(BalanceKey::Right);

        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.climber, state.climber_rect());
        assert_eq!(snap.coconuts, vec![glam::Vec2::new(12.0, 34.0)]);
        assert_eq!(snap.score_text(), "Height: 0%");
        assert_eq!(snap.prompt_text().as_deref(), Some("Press 'D' to balance!"));
        assert_eq!(snap.banner_text(), None);
    }

    #[test]
    fn test_banners() {
        let mut state = GameState::new();
        state.phase = GamePhase::Win;
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.banner_text(), Some("You Win! Press 'R' to play again"));
        assert_eq!(snap.prompt_text(), None);

        state.phase = GamePhase::GameOver;
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.banner_text(), Some("Game Over! Press 'R' to restart"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let snap = RenderSnapshot::capture(&GameState::new());
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["score"], 0);
        assert!(json["slip_prompt"].is_null());
    }
}
