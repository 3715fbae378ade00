//! Read-only view of the game handed to renderers.
//!
//! Building a snapshot never touches the simulation.

use serde::Serialize;

use crate::settings::GameMode;
use crate::sim::{Arena, Entity, GameState, Outcome};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub arena: Arena,
    /// Active entities in id order
    pub entities: Vec<Entity>,
    pub score: u64,
    pub lives: u8,
    pub outcome: Outcome,
    pub paused: bool,
    pub time_remaining: Option<f32>,
    pub tick: u64,
}

/// Build a snapshot from the current state
pub fn build_snapshot(state: &GameState) -> Snapshot {
    Snapshot {
        mode: state.settings.mode,
        arena: state.arena,
        entities: state.entities.active().copied().collect(),
        score: state.score,
        lives: state.lives,
        outcome: state.outcome,
        paused: state.paused,
        time_remaining: state.time_remaining,
        tick: state.time_ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_snapshot_skips_inactive() {
        let mut state = GameState::new(Settings::default()).unwrap();
        let total = state.entities.len();
        let first = state.entities.iter_mut().next().unwrap();
        first.active = false;

        let snapshot = build_snapshot(&state);
        assert_eq!(snapshot.entities.len(), total - 1);
        assert!(snapshot.entities.iter().all(|e| e.active));
        assert_eq!(snapshot.outcome, Outcome::InProgress);
        assert_eq!(snapshot.tick, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(Settings::default()).unwrap();
        let json = serde_json::to_value(build_snapshot(&state)).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["outcome"], "InProgress");
        assert_eq!(json["mode"], "breakout");
    }
}
