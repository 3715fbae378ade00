//! Cell Arcade - Breakout and Invaders on a character-cell playfield
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `input`: Key code to intent mapping
//! - `renderer`: Snapshot boundary and character-grid rasterizer
//! - `platform`: Fixed-tick loop driver and the terminal backend
//! - `settings`: Data-driven game configuration

pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use glam::Vec2;
pub use input::{Intent, KeyCode, map_key, map_keys};
pub use renderer::{RenderAdapter, Snapshot, TextFrame};
pub use settings::{GameMode, Settings};
pub use sim::{Outcome, Simulation};

/// Game configuration constants
pub mod consts {
    /// Breakout tick rate (the 60 Hz variants)
    pub const BREAKOUT_TICK_HZ: f32 = 60.0;
    /// Invaders tick rate (the 100 ms variants)
    pub const INVADERS_TICK_HZ: f32 = 10.0;

    /// Border cells on each side of the arena
    pub const ARENA_BORDER: f32 = 1.0;
    /// Smallest arena edge that still leaves an interior
    pub const MIN_ARENA_EDGE: i32 = 3;

    /// Paddle sits this many rows above the arena bottom
    pub const PADDLE_ROW_OFFSET: f32 = 2.0;
    pub const PADDLE_HEIGHT: f32 = 1.0;

    /// Ball is a single cell
    pub const BALL_SIZE: f32 = 1.0;
    /// Launch angle range (degrees above horizontal, up-right)
    pub const LAUNCH_ANGLE_MIN_DEG: f32 = 30.0;
    pub const LAUNCH_ANGLE_MAX_DEG: f32 = 90.0;

    /// Default paddle deflection range (normalized horizontal velocity)
    pub const DEFLECTION_MIN: f32 = -0.8;
    pub const DEFLECTION_MAX: f32 = 0.8;

    /// Bullets and enemies are single cells
    pub const BULLET_SIZE: f32 = 1.0;
    pub const ENEMY_SIZE: f32 = 1.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Unit direction for an angle measured upward from +x (screen y grows down)
#[inline]
pub fn screen_direction(angle_rad: f32) -> Vec2 {
    Vec2::new(angle_rad.cos(), -angle_rad.sin())
}
