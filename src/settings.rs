//! Game settings
//!
//! Every tunable of the simulation lives here. Presets mirror the two game
//! families; a JSON file may override any subset of a preset's fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Arena, layout};

/// Which game family to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Ball, paddle and a grid of multi-hit blocks
    #[default]
    Breakout,
    /// Player ship firing bullets at an enemy grid
    Invaders,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Breakout => "breakout",
            GameMode::Invaders => "invaders",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakout" | "arkanoid" => Some(GameMode::Breakout),
            "invaders" | "shooter" => Some(GameMode::Invaders),
            _ => None,
        }
    }

    /// Whether the Fire intent spawns bullets
    pub fn bullets_enabled(&self) -> bool {
        matches!(self, GameMode::Invaders)
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,
    /// Seed for the launch-angle RNG; `reset` replays it
    pub seed: u64,
    /// Fixed ticks per second driven by the loop
    pub tick_hz: f32,

    // === Arena ===
    pub arena_origin: Vec2,
    pub arena_width: i32,
    pub arena_height: i32,

    // === Rules ===
    pub lives: u8,
    /// Round length; when it runs out the hit threshold decides the outcome
    pub time_limit_secs: Option<f32>,
    /// Destroyed targets needed to win early
    pub win_hit_threshold: Option<u32>,

    // === Paddle / player ===
    pub paddle_width: f32,
    /// Cells per second while a move intent is held
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_speed: f32,
    /// Outgoing horizontal velocity (fraction of speed) at the paddle's
    /// left and right edges
    pub deflection_range: (f32, f32),

    // === Blocks ===
    pub block_rows: u32,
    pub block_width: f32,
    pub block_height: f32,
    pub block_spacing: f32,
    pub max_block_hp: u32,
    pub score_per_hp: u32,

    // === Enemies ===
    pub enemy_rows: u32,
    pub enemy_cols: u32,
    /// Horizontal distance between enemy columns
    pub enemy_spacing: f32,
    pub enemy_score: u32,
    /// Move the formation down one row every N ticks
    pub enemy_descent_interval: Option<u32>,

    // === Bullets ===
    pub bullet_speed: f32,
    pub max_bullets: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(GameMode::Breakout)
    }
}

impl Settings {
    /// Create settings from a game-mode preset
    pub fn from_preset(mode: GameMode) -> Self {
        match mode {
            GameMode::Breakout => Self {
                mode,
                seed: 0,
                tick_hz: BREAKOUT_TICK_HZ,

                arena_origin: Vec2::ZERO,
                arena_width: 60,
                arena_height: 30,

                lives: 1,
                time_limit_secs: Some(60.0),
                win_hit_threshold: Some(10),

                paddle_width: 10.0,
                paddle_speed: 30.0,

                ball_speed: 20.0,
                deflection_range: (DEFLECTION_MIN, DEFLECTION_MAX),

                block_rows: 5,
                block_width: 5.0,
                block_height: 2.0,
                block_spacing: 1.0,
                max_block_hp: 3,
                score_per_hp: 50,

                enemy_rows: 0,
                enemy_cols: 0,
                enemy_spacing: 3.0,
                enemy_score: 1,
                enemy_descent_interval: None,

                bullet_speed: 10.0,
                max_bullets: 20,
            },
            GameMode::Invaders => Self {
                mode,
                seed: 0,
                tick_hz: INVADERS_TICK_HZ,

                arena_origin: Vec2::ZERO,
                arena_width: 40,
                arena_height: 16,

                lives: 1,
                time_limit_secs: None,
                win_hit_threshold: None,

                paddle_width: 1.0,
                paddle_speed: 10.0,

                ball_speed: 0.0,
                deflection_range: (DEFLECTION_MIN, DEFLECTION_MAX),

                block_rows: 0,
                block_width: 5.0,
                block_height: 2.0,
                block_spacing: 1.0,
                max_block_hp: 1,
                score_per_hp: 0,

                enemy_rows: 5,
                enemy_cols: 10,
                enemy_spacing: 3.0,
                enemy_score: 1,
                enemy_descent_interval: None,

                bullet_speed: 10.0,
                max_bullets: 20,
            },
        }
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_hz
    }

    /// Build the arena these settings describe
    pub fn arena(&self) -> Result<Arena, ConfigError> {
        Arena::new(self.arena_origin, self.arena_width, self.arena_height)
    }

    /// Check every setting and the fit of the layout inside the arena
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tick_hz", self.tick_hz)?;
        if !self.arena_origin.is_finite() {
            return Err(ConfigError::invalid("arena_origin", "must be finite"));
        }
        let arena = self.arena()?;

        if self.lives == 0 {
            return Err(ConfigError::invalid("lives", "must be at least 1"));
        }
        if let Some(limit) = self.time_limit_secs {
            positive("time_limit_secs", limit)?;
        }
        if self.win_hit_threshold == Some(0) {
            return Err(ConfigError::invalid("win_hit_threshold", "must be at least 1"));
        }

        positive("paddle_width", self.paddle_width)?;
        positive("paddle_speed", self.paddle_speed)?;
        if self.paddle_width > arena.interior().width() {
            return Err(ConfigError::invalid(
                "paddle_width",
                format!(
                    "{} does not fit the arena interior ({})",
                    self.paddle_width,
                    arena.interior().width()
                ),
            ));
        }

        let (lo, hi) = self.deflection_range;
        if !(lo.is_finite() && hi.is_finite() && -1.0 < lo && lo < hi && hi < 1.0) {
            return Err(ConfigError::invalid(
                "deflection_range",
                format!("expected -1 < min < max < 1, got ({lo}, {hi})"),
            ));
        }

        match self.mode {
            GameMode::Breakout => {
                positive("ball_speed", self.ball_speed)?;
                positive("block_width", self.block_width)?;
                positive("block_height", self.block_height)?;
                if !(self.block_spacing.is_finite() && self.block_spacing >= 0.0) {
                    return Err(ConfigError::invalid("block_spacing", "must be >= 0"));
                }
                if self.block_rows == 0 {
                    return Err(ConfigError::invalid("block_rows", "must be at least 1"));
                }
                if self.max_block_hp == 0 {
                    return Err(ConfigError::invalid("max_block_hp", "must be at least 1"));
                }
                if self.max_block_hp.checked_mul(self.score_per_hp).is_none() {
                    return Err(ConfigError::invalid(
                        "score_per_hp",
                        format!(
                            "{} points per hit point overflows a {}-hit block",
                            self.score_per_hp, self.max_block_hp
                        ),
                    ));
                }
            }
            GameMode::Invaders => {
                positive("bullet_speed", self.bullet_speed)?;
                if self.enemy_rows == 0 || self.enemy_cols == 0 {
                    return Err(ConfigError::invalid("enemy_rows", "grid must not be empty"));
                }
                if !(self.enemy_spacing.is_finite() && self.enemy_spacing >= ENEMY_SIZE) {
                    return Err(ConfigError::invalid(
                        "enemy_spacing",
                        format!("must be at least {ENEMY_SIZE}"),
                    ));
                }
                if self.max_bullets == 0 {
                    return Err(ConfigError::invalid("max_bullets", "must be at least 1"));
                }
                if self.enemy_descent_interval == Some(0) {
                    return Err(ConfigError::invalid(
                        "enemy_descent_interval",
                        "must be at least 1",
                    ));
                }
            }
        }

        layout::check_fits(self, &arena)
    }

    /// Load a JSON settings file layered over `base`.
    ///
    /// Fields missing from the file keep the value from `base`, so a file
    /// can tweak a preset without restating it.
    pub fn load(path: &Path, base: &Settings) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_err = |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let overrides: serde_json::Value = serde_json::from_str(&text).map_err(parse_err)?;
        let mut merged = serde_json::to_value(base).map_err(parse_err)?;
        if let (Some(target), serde_json::Value::Object(fields)) =
            (merged.as_object_mut(), overrides)
        {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        let settings: Settings = serde_json::from_value(merged).map_err(parse_err)?;

        log::info!(
            "Loaded {} settings from {}",
            settings.mode.as_str(),
            path.display()
        );
        Ok(settings)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}
