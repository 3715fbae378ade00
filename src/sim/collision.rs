//! Collision detection and response for axis-aligned boxes
//!
//! Detection is a plain AABB overlap scan. Response is deliberately simple:
//! one entity collision per mover per tick, and blocks bounce the mover
//! along whichever axis dominates its velocity.

use glam::Vec2;

use super::arena::Arena;
use super::entity::{Entity, EntityId, EntityKind};
use crate::lerp;

/// Arena side a mover touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    /// Open edge: crossing it loses the ball instead of reflecting
    Bottom,
}

/// What a mover ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall(Wall),
    Paddle(EntityId),
    /// A block or enemy
    Target(EntityId),
}

/// Coarse classification of a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionClass {
    Wall,
    Paddle,
    Target,
}

impl Collision {
    pub fn class(&self) -> CollisionClass {
        match self {
            Collision::Wall(_) => CollisionClass::Wall,
            Collision::Paddle(_) => CollisionClass::Paddle,
            Collision::Target(_) => CollisionClass::Target,
        }
    }
}

/// Velocity component to reflect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Negate x
    Horizontal,
    /// Negate y
    Vertical,
}

/// First entity the mover overlaps, in candidate iteration order.
///
/// Skips inactive entities, the mover itself and other movers. The result is
/// the first hit found, not necessarily the nearest.
pub fn first_collision<'a>(
    mover: &Entity,
    candidates: impl IntoIterator<Item = &'a Entity>,
) -> Option<Collision> {
    candidates
        .into_iter()
        .filter(|c| c.active && c.id != mover.id && !c.is_mover())
        .find(|c| mover.collides_with(c))
        .and_then(|c| match c.kind {
            EntityKind::Paddle { .. } => Some(Collision::Paddle(c.id)),
            EntityKind::Block { .. } | EntityKind::Enemy { .. } => Some(Collision::Target(c.id)),
            EntityKind::Ball { .. } | EntityKind::Bullet { .. } => None,
        })
}

/// Walls the mover is touching while heading into them.
///
/// A mover sitting on a wall but travelling away from it reports nothing,
/// so a reflected ball never bounces twice off the same side.
pub fn wall_contacts(mover: &Entity, arena: &Arena) -> Vec<Wall> {
    let Some(velocity) = mover.velocity() else {
        return Vec::new();
    };
    let interior = arena.interior();
    let bb = mover.bounding_box();
    let mut walls = Vec::with_capacity(2);

    if bb.min.x <= interior.min.x && velocity.x < 0.0 {
        walls.push(Wall::Left);
    } else if bb.max.x >= interior.max.x && velocity.x > 0.0 {
        walls.push(Wall::Right);
    }

    if bb.min.y >= arena.bottom() {
        walls.push(Wall::Bottom);
    } else if bb.min.y <= interior.min.y && velocity.y < 0.0 {
        walls.push(Wall::Top);
    }

    walls
}

/// Reflect a velocity off a wall. The bottom wall does not reflect.
pub fn reflect_off_wall(velocity: Vec2, wall: Wall) -> Vec2 {
    match wall {
        Wall::Left => Vec2::new(velocity.x.abs(), velocity.y),
        Wall::Right => Vec2::new(-velocity.x.abs(), velocity.y),
        Wall::Top => Vec2::new(velocity.x, velocity.y.abs()),
        Wall::Bottom => velocity,
    }
}

/// Pick the bounce axis for a block hit.
///
/// The dominant velocity axis is taken as the direction of travel and that
/// component is reversed. Ties bounce vertically.
pub fn bounce_axis(velocity: Vec2) -> Axis {
    if velocity.x.abs() > velocity.y.abs() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

pub fn bounce(velocity: Vec2, axis: Axis) -> Vec2 {
    match axis {
        Axis::Horizontal => Vec2::new(-velocity.x, velocity.y),
        Axis::Vertical => Vec2::new(velocity.x, -velocity.y),
    }
}

/// Outgoing velocity after a ball strikes the paddle.
///
/// The ball's centre along the paddle maps linearly onto `range`
/// (normalized horizontal velocity): left edge gives `range.0`, right edge
/// `range.1`. The result always points up and keeps the incoming speed.
pub fn paddle_deflection(ball: &Entity, paddle: &Entity, range: (f32, f32)) -> Vec2 {
    let velocity = ball.velocity().unwrap_or(Vec2::ZERO);
    let speed = velocity.length();
    let t = if paddle.size.x > 0.0 {
        ((ball.center().x - paddle.position.x) / paddle.size.x).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let vx = speed * lerp(range.0, range.1, t);
    let vy = -(speed * speed - vx * vx).max(0.0).sqrt();
    Vec2::new(vx, vy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball(pos: Vec2, vel: Vec2) -> Entity {
        Entity::new(EntityId(1), pos, Vec2::ONE, EntityKind::Ball { velocity: vel })
    }

    fn block(id: u32, x: f32, y: f32) -> Entity {
        Entity::new(
            EntityId(id),
            Vec2::new(x, y),
            Vec2::new(4.0, 1.0),
            EntityKind::Block {
                hit_points: 1,
                score_value: 10,
            },
        )
    }

    fn paddle(x: f32, y: f32, w: f32) -> Entity {
        Entity::new(
            EntityId(99),
            Vec2::new(x, y),
            Vec2::new(w, 1.0),
            EntityKind::Paddle {
                speed: 30.0,
                movement: Default::default(),
            },
        )
    }

    fn arena() -> Arena {
        Arena::new(Vec2::ZERO, 40, 16).unwrap()
    }

    #[test]
    fn test_first_collision_iteration_order() {
        let b = ball(Vec2::new(11.0, 5.5), Vec2::new(0.0, -1.0));
        let first = block(2, 10.0, 5.0);
        let second = block(3, 11.0, 5.0);
        let hit = first_collision(&b, [&first, &second]);
        assert_eq!(hit, Some(Collision::Target(EntityId(2))));

        let hit = first_collision(&b, [&second, &first]);
        assert_eq!(hit, Some(Collision::Target(EntityId(3))));
    }

    #[test]
    fn test_first_collision_skips_inactive_and_movers() {
        let b = ball(Vec2::new(11.0, 5.5), Vec2::new(0.0, -1.0));
        let mut dead = block(2, 10.0, 5.0);
        dead.active = false;
        let other_ball = Entity::new(
            EntityId(5),
            Vec2::new(11.0, 5.5),
            Vec2::ONE,
            EntityKind::Ball { velocity: Vec2::ZERO },
        );
        assert_eq!(first_collision(&b, [&dead, &other_ball, &b]), None);
    }

    #[test]
    fn test_classify() {
        let b = ball(Vec2::new(12.0, 13.5), Vec2::new(0.0, 1.0));
        let p = paddle(10.0, 14.0, 10.0);
        let hit = first_collision(&b, [&p]).unwrap();
        assert_eq!(hit, Collision::Paddle(EntityId(99)));
        assert_eq!(hit.class(), CollisionClass::Paddle);
        assert_eq!(Collision::Wall(Wall::Top).class(), CollisionClass::Wall);
    }

    #[test]
    fn test_wall_contacts_only_when_heading_in() {
        let a = arena();
        let into_left = ball(Vec2::new(1.0, 8.0), Vec2::new(-1.0, 0.5));
        assert_eq!(wall_contacts(&into_left, &a), vec![Wall::Left]);

        let leaving_left = ball(Vec2::new(1.0, 8.0), Vec2::new(1.0, 0.5));
        assert!(wall_contacts(&leaving_left, &a).is_empty());

        let corner = ball(Vec2::new(38.5, 0.5), Vec2::new(1.0, -1.0));
        assert_eq!(wall_contacts(&corner, &a), vec![Wall::Right, Wall::Top]);

        let lost = ball(Vec2::new(20.0, 16.0), Vec2::new(0.0, 1.0));
        assert_eq!(wall_contacts(&lost, &a), vec![Wall::Bottom]);
    }

    #[test]
    fn test_reflect_off_wall() {
        let v = Vec2::new(-3.0, -2.0);
        assert_eq!(reflect_off_wall(v, Wall::Left), Vec2::new(3.0, -2.0));
        assert_eq!(reflect_off_wall(v, Wall::Top), Vec2::new(-3.0, 2.0));
        assert_eq!(reflect_off_wall(v, Wall::Bottom), v);
    }

    #[test]
    fn test_bounce_axis() {
        assert_eq!(bounce_axis(Vec2::new(5.0, 1.0)), Axis::Horizontal);
        assert_eq!(bounce_axis(Vec2::new(-1.0, -5.0)), Axis::Vertical);
        assert_eq!(bounce_axis(Vec2::new(2.0, -2.0)), Axis::Vertical);
        assert_eq!(
            bounce(Vec2::new(5.0, 1.0), Axis::Horizontal),
            Vec2::new(-5.0, 1.0)
        );
    }

    #[test]
    fn test_paddle_deflection_edges() {
        let p = paddle(10.0, 14.0, 10.0);
        let range = (-0.8, 0.8);

        // Ball centre exactly on the paddle's left edge
        let left = ball(Vec2::new(9.5, 13.5), Vec2::new(0.0, 10.0));
        let v = paddle_deflection(&left, &p, range);
        assert!((v.x - (-8.0)).abs() < 1e-4);
        assert!(v.y < 0.0);
        assert!((v.length() - 10.0).abs() < 1e-4);

        let right = ball(Vec2::new(19.5, 13.5), Vec2::new(0.0, 10.0));
        let v = paddle_deflection(&right, &p, range);
        assert!((v.x - 8.0).abs() < 1e-4);

        let centre = ball(Vec2::new(14.5, 13.5), Vec2::new(3.0, 4.0));
        let v = paddle_deflection(&centre, &p, range);
        assert!(v.x.abs() < 1e-4);
        assert!((v.y + 5.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_deflection_preserves_speed(
            offset in -2.0f32..12.0,
            vx in -20.0f32..20.0,
            vy in 0.1f32..20.0,
        ) {
            let p = paddle(10.0, 14.0, 10.0);
            let b = ball(Vec2::new(10.0 + offset, 13.5), Vec2::new(vx, vy));
            let out = paddle_deflection(&b, &p, (-0.8, 0.8));
            let speed = Vec2::new(vx, vy).length();
            prop_assert!((out.length() - speed).abs() < 1e-3 * speed.max(1.0));
            prop_assert!(out.y < 0.0);
            prop_assert!(out.x.abs() <= 0.8 * speed + 1e-3);
        }
    }
}
