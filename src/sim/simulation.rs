//! Public facade over the game state
//!
//! Front ends construct a `Simulation`, feed it intents once per fixed tick
//! and read snapshots back. Nothing outside `tick` and `reset` mutates the
//! state.

use super::state::{GameState, Outcome};
use super::tick::tick;
use crate::error::ConfigError;
use crate::input::Intent;
use crate::renderer::{Snapshot, build_snapshot};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
}

impl Simulation {
    /// Validate the settings and lay out the starting board
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let state = GameState::new(settings)?;
        log::info!(
            "Simulation ready: {} on {}x{} at {} Hz",
            state.settings.mode.as_str(),
            state.arena.width(),
            state.arena.height(),
            state.settings.tick_hz
        );
        Ok(Self { state })
    }

    /// Advance one fixed tick with this tick's intents
    pub fn step(&mut self, dt: f32, intents: &[Intent]) {
        tick(&mut self.state, intents, dt);
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), ConfigError> {
        self.state.resize(width, height)
    }

    pub fn snapshot(&self) -> Snapshot {
        build_snapshot(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameMode;

    #[test]
    fn test_new_rejects_bad_arena() {
        let settings = Settings {
            arena_width: 2,
            ..Settings::default()
        };
        assert!(matches!(
            Simulation::new(settings),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_reset_matches_fresh_build() {
        let settings = Settings::from_preset(GameMode::Breakout);
        let fresh = Simulation::new(settings.clone()).unwrap();
        let mut sim = Simulation::new(settings).unwrap();
        let dt = sim.settings().tick_dt();

        for i in 0..120 {
            let intent = if i % 3 == 0 { Intent::MoveLeft } else { Intent::MoveRight };
            sim.step(dt, &[intent]);
        }
        sim.reset();

        assert_eq!(sim.snapshot(), fresh.snapshot());
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_quit_is_not_a_sim_concern() {
        let mut sim = Simulation::new(Settings::default()).unwrap();
        let dt = sim.settings().tick_dt();
        sim.step(dt, &[Intent::Quit]);
        assert_eq!(sim.outcome(), Outcome::InProgress);
        assert_eq!(sim.state().time_ticks, 1);
    }

    #[test]
    fn test_resize_keeps_running() {
        let mut sim = Simulation::new(Settings::from_preset(GameMode::Invaders)).unwrap();
        sim.resize(40, 24).unwrap();
        assert_eq!(sim.snapshot().arena.height(), 24);
        assert!(sim.resize(2, 24).is_err());
    }
}
