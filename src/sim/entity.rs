//! Entity types
//!
//! Every game object is an `Entity` whose `kind` carries the per-kind
//! payload. Behavior dispatches on the kind with a `match`; there is no
//! object hierarchy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle into the entity store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Axis-aligned bounding box, `min` inclusive and `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Zero or negative extent on either axis
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Half-open overlap test on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Whether `inner` lies entirely inside this box
    pub fn contains(&self, inner: &Aabb) -> bool {
        inner.min.x >= self.min.x
            && inner.min.y >= self.min.y
            && inner.max.x <= self.max.x
            && inner.max.y <= self.max.y
    }
}

/// Paddle movement for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
    #[default]
    Stop,
}

/// Kind-specific payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Ball { velocity: Vec2 },
    /// Breakout paddle or Invaders player ship
    Paddle { speed: f32, movement: Movement },
    Block { hit_points: u32, score_value: u32 },
    Bullet { velocity: Vec2 },
    Enemy { score_value: u32 },
}

/// A positioned, sized game object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Top-left corner (screen coordinates, y grows downward)
    pub position: Vec2,
    pub size: Vec2,
    /// `false` marks logical deletion; the store compacts it away
    pub active: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, position: Vec2, size: Vec2, kind: EntityKind) -> Self {
        Self {
            id,
            position,
            size,
            active: true,
            kind,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::new(self.position, self.position + self.size)
    }

    /// Overlap test between two entities. Symmetric, no side effects.
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.bounding_box().overlaps(&other.bounding_box())
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn velocity(&self) -> Option<Vec2> {
        match self.kind {
            EntityKind::Ball { velocity } | EntityKind::Bullet { velocity } => Some(velocity),
            _ => None,
        }
    }

    pub fn set_velocity(&mut self, new_velocity: Vec2) {
        if let EntityKind::Ball { velocity } | EntityKind::Bullet { velocity } = &mut self.kind {
            *velocity = new_velocity;
        }
    }

    /// Balls and bullets move on their own; everything else is moved by rules
    pub fn is_mover(&self) -> bool {
        matches!(self.kind, EntityKind::Ball { .. } | EntityKind::Bullet { .. })
    }

    /// Blocks and enemies are what the player destroys
    pub fn is_target(&self) -> bool {
        matches!(self.kind, EntityKind::Block { .. } | EntityKind::Enemy { .. })
    }

    pub fn is_ball(&self) -> bool {
        matches!(self.kind, EntityKind::Ball { .. })
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self.kind, EntityKind::Bullet { .. })
    }

    pub fn is_paddle(&self) -> bool {
        matches!(self.kind, EntityKind::Paddle { .. })
    }

    /// Advance by one tick of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        match self.kind {
            EntityKind::Ball { velocity } | EntityKind::Bullet { velocity } => {
                self.position += velocity * dt;
            }
            // Paddles are moved by intents, blocks and enemies by rules
            EntityKind::Paddle { .. } | EntityKind::Block { .. } | EntityKind::Enemy { .. } => {}
        }
    }

    /// Apply one point of damage.
    ///
    /// Returns the score awarded if this destroyed the entity. Enemies die
    /// on the first hit; blocks when their hit points reach zero.
    pub fn take_hit(&mut self) -> Option<u32> {
        match &mut self.kind {
            EntityKind::Block {
                hit_points,
                score_value,
            } => {
                *hit_points = hit_points.saturating_sub(1);
                if *hit_points == 0 {
                    self.active = false;
                    Some(*score_value)
                } else {
                    None
                }
            }
            EntityKind::Enemy { score_value } => {
                self.active = false;
                Some(*score_value)
            }
            _ => None,
        }
    }

    /// Render hook: one character per cell
    pub fn glyph(&self) -> char {
        match self.kind {
            EntityKind::Ball { .. } => 'o',
            EntityKind::Paddle { .. } => '=',
            EntityKind::Block { hit_points, .. } => match hit_points {
                0 | 1 => ':',
                2 => '+',
                _ => '#',
            },
            EntityKind::Bullet { .. } => '|',
            EntityKind::Enemy { .. } => 'W',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity::new(
            EntityId(1),
            Vec2::new(x, y),
            Vec2::new(w, h),
            EntityKind::Block {
                hit_points: 1,
                score_value: 10,
            },
        )
    }

    #[test]
    fn test_bounding_box() {
        let e = block(2.0, 3.0, 4.0, 1.0);
        let bb = e.bounding_box();
        assert_eq!(bb.min, Vec2::new(2.0, 3.0));
        assert_eq!(bb.max, Vec2::new(6.0, 4.0));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = block(0.0, 0.0, 2.0, 2.0);
        let b = block(2.0, 0.0, 2.0, 2.0);
        assert!(!a.collides_with(&b));
        let c = block(1.9, 1.9, 2.0, 2.0);
        assert!(a.collides_with(&c));
    }

    #[test]
    fn test_zero_size_never_collides() {
        let a = block(0.0, 0.0, 4.0, 4.0);
        let point = block(1.0, 1.0, 0.0, 0.0);
        let line = block(1.0, 1.0, 2.0, 0.0);
        assert!(!a.collides_with(&point));
        assert!(!a.collides_with(&line));
        assert!(!point.collides_with(&point));
    }

    #[test]
    fn test_update_moves_only_movers() {
        let mut ball = Entity::new(
            EntityId(1),
            Vec2::new(5.0, 5.0),
            Vec2::ONE,
            EntityKind::Ball {
                velocity: Vec2::new(2.0, -4.0),
            },
        );
        ball.update(0.5);
        assert_eq!(ball.position, Vec2::new(6.0, 3.0));

        let mut b = block(1.0, 1.0, 1.0, 1.0);
        b.update(10.0);
        assert_eq!(b.position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_block_take_hit() {
        let mut b = Entity::new(
            EntityId(3),
            Vec2::ZERO,
            Vec2::ONE,
            EntityKind::Block {
                hit_points: 2,
                score_value: 100,
            },
        );
        assert_eq!(b.glyph(), '+');
        assert_eq!(b.take_hit(), None);
        assert!(b.active);
        assert_eq!(b.glyph(), ':');
        assert_eq!(b.take_hit(), Some(100));
        assert!(!b.active);
    }

    #[test]
    fn test_enemy_dies_on_first_hit() {
        let mut e = Entity::new(
            EntityId(4),
            Vec2::ZERO,
            Vec2::ONE,
            EntityKind::Enemy { score_value: 1 },
        );
        assert_eq!(e.take_hit(), Some(1));
        assert!(!e.active);
    }

    proptest! {
        #[test]
        fn prop_collides_with_is_symmetric(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            aw in 0.0f32..10.0, ah in 0.0f32..10.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0,
            bw in 0.0f32..10.0, bh in 0.0f32..10.0,
        ) {
            let a = block(ax, ay, aw, ah);
            let b = block(bx, by, bw, bh);
            prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));
        }
    }
}
