//! Game state and core simulation types
//!
//! Everything `tick` reads or writes lives in `GameState`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::layout;
use super::store::EntityStore;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Result of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Settings the board was built from
    pub settings: Settings,
    pub arena: Arena,
    /// All entities, sorted by id
    pub entities: EntityStore,
    pub score: u64,
    pub lives: u8,
    pub outcome: Outcome,
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds left on the round clock, if it has one
    pub time_remaining: Option<f32>,
    /// Blocks and enemies destroyed this round
    pub targets_destroyed: u32,
    /// Launch-angle RNG, reseeded on reset
    pub rng: Pcg32,
}

impl GameState {
    /// Validate the settings and lay out the starting board
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let arena = settings.arena()?;

        let mut state = Self {
            arena,
            entities: EntityStore::new(),
            score: 0,
            lives: settings.lives,
            outcome: Outcome::InProgress,
            paused: false,
            time_ticks: 0,
            time_remaining: settings.time_limit_secs,
            targets_destroyed: 0,
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
        };
        layout::populate(&mut state.entities, &state.settings, &state.arena, &mut state.rng);
        Ok(state)
    }

    /// Rebuild the starting board and clear score, lives, clock and outcome
    pub fn reset(&mut self) {
        self.entities = EntityStore::new();
        self.rng = Pcg32::seed_from_u64(self.settings.seed);
        self.score = 0;
        self.lives = self.settings.lives;
        self.outcome = Outcome::InProgress;
        self.paused = false;
        self.time_ticks = 0;
        self.time_remaining = self.settings.time_limit_secs;
        self.targets_destroyed = 0;
        layout::populate(&mut self.entities, &self.settings, &self.arena, &mut self.rng);
        log::info!("Game reset ({})", self.settings.mode.as_str());
    }

    /// Resize the arena. The new size must still fit the configured layout
    /// and every entity still on the board.
    ///
    /// Entities stay where they are except the paddle, which moves to the
    /// new paddle row and is clamped inside the walls. A size that would
    /// leave a block, enemy, ball or bullet outside the interior is refused.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), ConfigError> {
        let mut settings = self.settings.clone();
        settings.arena_width = width;
        settings.arena_height = height;
        settings.validate()?;

        let mut arena = self.arena;
        arena.resize(width, height)?;
        let interior = arena.interior();
        if let Some(stranded) = self
            .entities
            .active()
            .filter(|e| !e.is_paddle())
            .find(|e| !interior.contains(&e.bounding_box()))
        {
            let bb = stranded.bounding_box();
            let field = if bb.max.x > interior.max.x || bb.min.x < interior.min.x {
                "arena_width"
            } else {
                "arena_height"
            };
            return Err(ConfigError::invalid(
                field,
                format!(
                    "{}x{} would leave entity {} at ({}, {}) outside the walls",
                    width, height, stranded.id.0, bb.min.x, bb.min.y
                ),
            ));
        }

        self.arena = arena;
        self.settings = settings;

        if let Some(paddle) = self.entities.paddle_mut() {
            paddle.position.y = layout::paddle_row(&arena);
            paddle.position.x = arena.clamp_span_x(paddle.position.x, paddle.size.x);
        }
        log::info!("Arena resized to {}x{}", width, height);
        Ok(())
    }

    /// Active blocks and enemies left on the board
    pub fn targets_remaining(&self) -> usize {
        self.entities.count_active(|e| e.is_target())
    }

    /// Leave `InProgress`. Terminal outcomes never change until `reset`.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_over() || !outcome.is_over() {
            return;
        }
        self.outcome = outcome;
        log::info!(
            "Round over: {:?} (score {}, tick {})",
            outcome,
            self.score,
            self.time_ticks
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameMode;

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = Settings {
            arena_width: -5,
            ..Settings::default()
        };
        assert!(GameState::new(settings).is_err());
    }

    #[test]
    fn test_finish_is_one_way() {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.finish(Outcome::Won);
        state.finish(Outcome::Lost);
        assert_eq!(state.outcome, Outcome::Won);
        state.reset();
        assert_eq!(state.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_resize_moves_paddle() {
        let mut state = GameState::new(Settings::from_preset(GameMode::Invaders)).unwrap();
        state.resize(36, 20).unwrap();
        let paddle = state.entities.paddle().unwrap();
        assert_eq!(paddle.position.y, 18.0);
        assert!(paddle.position.x + paddle.size.x <= 35.0);

        // Enemy grid no longer fits
        assert!(state.resize(12, 20).is_err());
        assert_eq!(state.arena.width(), 36);
    }

    #[test]
    fn test_resize_refuses_to_strand_blocks() {
        let mut state = GameState::new(Settings::from_preset(GameMode::Breakout)).unwrap();
        // A fresh 30x30 board would fit, but the existing right-hand columns would not
        let err = state.resize(30, 30).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "arena_width",
                ..
            }
        ));
        assert_eq!(state.arena.width(), 60);
        assert_eq!(state.settings.arena_width, 60);

        // Growing keeps every target reachable
        state.resize(70, 34).unwrap();
        let interior = state.arena.interior();
        assert_eq!(state.targets_remaining(), 45);
        assert!(
            state
                .entities
                .active()
                .all(|e| interior.contains(&e.bounding_box()))
        );
    }
}
