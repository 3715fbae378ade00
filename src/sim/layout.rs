//! Initial entity layout
//!
//! Placement is a pure function of the settings and the RNG seed, which is
//! what lets `reset` rebuild an identical board.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::entity::{EntityId, EntityKind, Movement};
use super::store::EntityStore;
use crate::consts::*;
use crate::error::ConfigError;
use crate::screen_direction;
use crate::settings::{GameMode, Settings};

/// Block grid starts this far in from the arena's left edge
const BLOCK_INSET_X: f32 = 2.0;
/// and this far down from its top edge
const BLOCK_INSET_Y: f32 = 3.0;
/// Enemy grid offset from the arena's top-left corner
const ENEMY_INSET_X: f32 = 5.0;
const ENEMY_INSET_Y: f32 = 1.0;

/// Row the paddle (or player ship) occupies
pub fn paddle_row(arena: &Arena) -> f32 {
    arena.bottom() - PADDLE_ROW_OFFSET
}

/// Number of block columns that fit across the arena
pub fn block_columns(settings: &Settings, arena: &Arena) -> u32 {
    let usable = arena.width() as f32 - 2.0 * BLOCK_INSET_X + settings.block_spacing;
    let pitch = settings.block_width + settings.block_spacing;
    (usable / pitch).floor().max(0.0) as u32
}

/// Lower edge of the last block row
pub fn block_grid_bottom(settings: &Settings, arena: &Arena) -> f32 {
    let pitch = settings.block_height + settings.block_spacing;
    arena.top() + BLOCK_INSET_Y + settings.block_rows as f32 * pitch - settings.block_spacing
}

/// Where a fresh ball appears: centred, midway between blocks and paddle
pub fn ball_spawn(settings: &Settings, arena: &Arena) -> Vec2 {
    let grid_bottom = block_grid_bottom(settings, arena);
    let y = ((grid_bottom + paddle_row(arena)) / 2.0).floor();
    Vec2::new(arena.center().x.floor(), y)
}

/// Make sure the configured grid fits between the border and the paddle
pub fn check_fits(settings: &Settings, arena: &Arena) -> Result<(), ConfigError> {
    let interior = arena.interior();
    let paddle_y = paddle_row(arena);

    match settings.mode {
        GameMode::Breakout => {
            if block_columns(settings, arena) == 0 {
                return Err(ConfigError::invalid(
                    "block_width",
                    "no block column fits in the arena",
                ));
            }
            let grid_bottom = block_grid_bottom(settings, arena);
            if paddle_y - grid_bottom < 2.0 {
                return Err(ConfigError::invalid(
                    "block_rows",
                    format!(
                        "{} rows reach y={grid_bottom}, leaving no room above the paddle at y={paddle_y}",
                        settings.block_rows
                    ),
                ));
            }
        }
        GameMode::Invaders => {
            let grid_right = arena.left()
                + ENEMY_INSET_X
                + (settings.enemy_cols - 1) as f32 * settings.enemy_spacing
                + ENEMY_SIZE;
            if grid_right > interior.max.x {
                return Err(ConfigError::invalid(
                    "enemy_cols",
                    format!("grid reaches x={grid_right}, past the arena interior"),
                ));
            }
            let grid_bottom = arena.top() + ENEMY_INSET_Y + settings.enemy_rows as f32 * ENEMY_SIZE;
            if grid_bottom > paddle_y - BULLET_SIZE {
                return Err(ConfigError::invalid(
                    "enemy_rows",
                    format!("grid reaches y={grid_bottom}, leaving no room above the player"),
                ));
            }
        }
    }
    Ok(())
}

/// Populate an empty store with the starting board
pub fn populate(store: &mut EntityStore, settings: &Settings, arena: &Arena, rng: &mut Pcg32) {
    spawn_paddle(store, settings, arena);

    match settings.mode {
        GameMode::Breakout => {
            let blocks = spawn_blocks(store, settings, arena);
            spawn_ball(store, settings, arena, rng);
            log::info!("Breakout layout: {} blocks", blocks);
        }
        GameMode::Invaders => {
            let enemies = spawn_enemies(store, settings, arena);
            log::info!("Invaders layout: {} enemies", enemies);
        }
    }
}

fn spawn_paddle(store: &mut EntityStore, settings: &Settings, arena: &Arena) -> EntityId {
    let x = arena.left() + ((arena.width() as f32 - settings.paddle_width) / 2.0).floor();
    let x = arena.clamp_span_x(x, settings.paddle_width);
    store.spawn(
        Vec2::new(x, paddle_row(arena)),
        Vec2::new(settings.paddle_width, PADDLE_HEIGHT),
        EntityKind::Paddle {
            speed: settings.paddle_speed,
            movement: Movement::Stop,
        },
    )
}

/// Rows nearer the top take more hits and score more
fn spawn_blocks(store: &mut EntityStore, settings: &Settings, arena: &Arena) -> usize {
    let cols = block_columns(settings, arena);
    let rows = settings.block_rows;
    let size = Vec2::new(settings.block_width, settings.block_height);
    let pitch = size + Vec2::splat(settings.block_spacing);
    let start = arena.origin() + Vec2::new(BLOCK_INSET_X, BLOCK_INSET_Y);

    for row in 0..rows {
        let hit_points = settings.max_block_hp.min(rows - row);
        for col in 0..cols {
            let position = start + Vec2::new(col as f32, row as f32) * pitch;
            store.spawn(
                position,
                size,
                EntityKind::Block {
                    hit_points,
                    score_value: hit_points * settings.score_per_hp,
                },
            );
        }
    }
    (rows * cols) as usize
}

fn spawn_enemies(store: &mut EntityStore, settings: &Settings, arena: &Arena) -> usize {
    let start = arena.origin() + Vec2::new(ENEMY_INSET_X, ENEMY_INSET_Y);
    for row in 0..settings.enemy_rows {
        for col in 0..settings.enemy_cols {
            let position = start + Vec2::new(col as f32 * settings.enemy_spacing, row as f32);
            store.spawn(
                position,
                Vec2::splat(ENEMY_SIZE),
                EntityKind::Enemy {
                    score_value: settings.enemy_score,
                },
            );
        }
    }
    (settings.enemy_rows * settings.enemy_cols) as usize
}

/// Launch a ball from the spawn point at a random up-right angle
pub fn spawn_ball(
    store: &mut EntityStore,
    settings: &Settings,
    arena: &Arena,
    rng: &mut Pcg32,
) -> EntityId {
    let angle = rng
        .random_range(LAUNCH_ANGLE_MIN_DEG..LAUNCH_ANGLE_MAX_DEG)
        .to_radians();
    store.spawn(
        ball_spawn(settings, arena),
        Vec2::splat(BALL_SIZE),
        EntityKind::Ball {
            velocity: screen_direction(angle) * settings.ball_speed,
        },
    )
}

/// A bullet fired from just above the player's centre column
pub fn spawn_bullet(
    store: &mut EntityStore,
    settings: &Settings,
    player_pos: Vec2,
    player_size: Vec2,
) -> EntityId {
    let x = player_pos.x + ((player_size.x - BULLET_SIZE) / 2.0).floor();
    store.spawn(
        Vec2::new(x, player_pos.y - BULLET_SIZE),
        Vec2::splat(BULLET_SIZE),
        EntityKind::Bullet {
            velocity: Vec2::new(0.0, -settings.bullet_speed),
        },
    )
}
