//! Fixed timestep simulation tick
//!
//! One call advances the game by `dt` seconds: control intents, paddle,
//! balls, bullets, enemy formation, then the win/loss check.

use glam::Vec2;

use super::collision::{
    Collision, Wall, bounce, bounce_axis, first_collision, paddle_deflection, reflect_off_wall,
    wall_contacts,
};
use super::entity::{Entity, EntityId, EntityKind, Movement};
use super::layout;
use super::state::{GameState, Outcome};
use crate::consts::{BULLET_SIZE, ENEMY_SIZE};
use crate::input::Intent;

/// Maximum bullet substeps per tick (keeps fast bullets from tunnelling)
pub const MAX_SUBSTEPS: u32 = 8;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, intents: &[Intent], dt: f32) {
    // Restart works in every state, including after the round is decided
    if intents.contains(&Intent::Restart) {
        state.reset();
        return;
    }

    if state.outcome.is_over() {
        return;
    }

    let toggles = intents.iter().filter(|i| **i == Intent::PauseToggle).count();
    if !toggles.is_multiple_of(2) {
        state.paused = !state.paused;
        log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
    }
    if state.paused {
        return;
    }

    state.time_ticks += 1;

    move_paddle(state, intents, dt);
    let shots = intents.iter().filter(|i| **i == Intent::Fire).count();
    for _ in 0..shots {
        fire(state);
    }

    advance_balls(state, dt);
    if state.outcome.is_over() {
        state.entities.compact();
        return;
    }

    advance_bullets(state, dt);
    advance_formation(state);
    evaluate_outcome(state, dt);

    state.entities.compact();
}

/// Apply this tick's movement intents to the paddle.
///
/// Each move intent shifts the paddle by `speed * dt`; a `Stop` cancels what
/// came before it in the same tick.
fn move_paddle(state: &mut GameState, intents: &[Intent], dt: f32) {
    let arena = state.arena;
    let Some(paddle) = state.entities.paddle_mut() else {
        return;
    };
    let EntityKind::Paddle { speed, movement } = &mut paddle.kind else {
        return;
    };

    let stride = *speed * dt;
    let mut dx = 0.0;
    let mut last = Movement::Stop;
    for intent in intents {
        match intent {
            Intent::MoveLeft => {
                dx -= stride;
                last = Movement::Left;
            }
            Intent::MoveRight => {
                dx += stride;
                last = Movement::Right;
            }
            Intent::Stop => {
                dx = 0.0;
                last = Movement::Stop;
            }
            _ => {}
        }
    }
    *movement = last;
    paddle.position.x = arena.clamp_span_x(paddle.position.x + dx, paddle.size.x);
}

fn fire(state: &mut GameState) {
    if !state.settings.mode.bullets_enabled() {
        return;
    }
    let in_flight = state.entities.count_active(Entity::is_bullet);
    if in_flight >= state.settings.max_bullets {
        log::debug!("Fire ignored: {} bullets in flight", in_flight);
        return;
    }
    let Some(player) = state.entities.paddle() else {
        return;
    };
    let (position, size) = (player.position, player.size);
    layout::spawn_bullet(&mut state.entities, &state.settings, position, size);
}

fn advance_balls(state: &mut GameState, dt: f32) {
    let range = state.settings.deflection_range;

    for id in state.entities.ids_where(Entity::is_ball) {
        let Some(ball) = state.entities.get_mut(id) else {
            continue;
        };
        ball.update(dt);

        // --- WALLS ---
        let walls = wall_contacts(ball, &state.arena);
        if walls.contains(&Wall::Bottom) {
            ball.active = false;
            lose_ball(state);
            if state.outcome.is_over() {
                return;
            }
            continue;
        }
        let mut velocity = ball.velocity().unwrap_or(Vec2::ZERO);
        for wall in walls {
            velocity = reflect_off_wall(velocity, wall);
        }
        ball.set_velocity(velocity);
        let ball = *ball;

        // --- PADDLE / TARGETS (one per ball per tick) ---
        match first_collision(&ball, state.entities.iter()) {
            Some(Collision::Paddle(paddle_id)) => {
                deflect_off_paddle(state, id, paddle_id, range);
            }
            Some(Collision::Target(target_id)) => {
                hit_target(state, target_id);
                if let Some(ball) = state.entities.get_mut(id) {
                    let v = ball.velocity().unwrap_or(Vec2::ZERO);
                    ball.set_velocity(bounce(v, bounce_axis(v)));
                }
            }
            Some(Collision::Wall(_)) | None => {}
        }
    }
}

fn deflect_off_paddle(
    state: &mut GameState,
    ball_id: EntityId,
    paddle_id: EntityId,
    range: (f32, f32),
) {
    let Some(paddle) = state.entities.get(paddle_id).copied() else {
        return;
    };
    let Some(ball) = state.entities.get_mut(ball_id) else {
        return;
    };
    // A ball already heading up passes through
    if ball.velocity().is_some_and(|v| v.y > 0.0) {
        let velocity = paddle_deflection(ball, &paddle, range);
        ball.set_velocity(velocity);
        ball.position.y = paddle.position.y - ball.size.y;
    }
}

/// Damage a block or enemy and bank its score if it was destroyed
fn hit_target(state: &mut GameState, target_id: EntityId) {
    let Some(target) = state.entities.get_mut(target_id) else {
        return;
    };
    if let Some(points) = target.take_hit() {
        state.score += u64::from(points);
        state.targets_destroyed += 1;
        log::debug!("Target {} destroyed (+{})", target_id.0, points);
    }
}

fn lose_ball(state: &mut GameState) {
    // Other balls still in play keep the life
    if state.entities.count_active(Entity::is_ball) > 0 {
        return;
    }
    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        state.finish(Outcome::Lost);
    } else {
        log::info!("Ball lost, {} lives left", state.lives);
        layout::spawn_ball(
            &mut state.entities,
            &state.settings,
            &state.arena,
            &mut state.rng,
        );
    }
}

/// Move bullets in straight lines, substepping so they never skip a cell
fn advance_bullets(state: &mut GameState, dt: f32) {
    let interior = state.arena.interior();

    for id in state.entities.ids_where(Entity::is_bullet) {
        let Some(mut bullet) = state.entities.get(id).copied() else {
            continue;
        };
        let travel = bullet.velocity().unwrap_or(Vec2::ZERO).length() * dt;
        let substeps = ((travel / BULLET_SIZE).ceil() as u32).clamp(1, MAX_SUBSTEPS);
        let sub_dt = dt / substeps as f32;

        let mut hit = None;
        for _ in 0..substeps {
            bullet.update(sub_dt);
            if !bullet.bounding_box().overlaps(&interior) {
                bullet.active = false;
                break;
            }
            if let Some(Collision::Target(target_id)) =
                first_collision(&bullet, state.entities.iter())
            {
                hit = Some(target_id);
                bullet.active = false;
                break;
            }
        }

        if let Some(slot) = state.entities.get_mut(id) {
            *slot = bullet;
        }
        if let Some(target_id) = hit {
            hit_target(state, target_id);
        }
    }
}

/// Step a descending enemy formation down one row when its interval is due
fn advance_formation(state: &mut GameState) {
    let Some(interval) = state.settings.enemy_descent_interval else {
        return;
    };
    if !state.time_ticks.is_multiple_of(u64::from(interval)) {
        return;
    }

    let is_enemy = |e: &Entity| matches!(e.kind, EntityKind::Enemy { .. });
    for enemy in state.entities.iter_mut().filter(|e| e.active && is_enemy(e)) {
        enemy.position.y += ENEMY_SIZE;
    }

    let player_row = state
        .entities
        .paddle()
        .map(|p| p.position.y)
        .unwrap_or(state.arena.bottom());
    let landed = state
        .entities
        .active()
        .any(|e| is_enemy(e) && e.bounding_box().max.y > player_row);
    if landed {
        log::info!("Enemy formation reached the player row");
        state.finish(Outcome::Lost);
    }
}

fn evaluate_outcome(state: &mut GameState, dt: f32) {
    if state.outcome.is_over() {
        return;
    }

    let cleared = state.targets_remaining() == 0;
    let threshold_met = state
        .settings
        .win_hit_threshold
        .is_some_and(|n| state.targets_destroyed >= n);
    if cleared || threshold_met {
        state.finish(Outcome::Won);
        return;
    }

    if let Some(remaining) = state.time_remaining.as_mut() {
        *remaining = (*remaining - dt).max(0.0);
        if *remaining <= 0.0 {
            log::info!("Time up after {} destroyed", state.targets_destroyed);
            state.finish(Outcome::Lost);
        }
    }
}
