//! Playfield boundary
//!
//! The arena is a rectangle of cells whose outermost ring is the border.
//! Movers bounce off the interior's edges; the bottom edge is open.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Aabb;
use crate::consts::{ARENA_BORDER, MIN_ARENA_EDGE};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    origin: Vec2,
    width: i32,
    height: i32,
}

impl Arena {
    pub fn new(origin: Vec2, width: i32, height: i32) -> Result<Self, ConfigError> {
        check_edge("arena_width", width)?;
        check_edge("arena_height", height)?;
        Ok(Self {
            origin,
            width,
            height,
        })
    }

    /// Change the arena dimensions, keeping the origin
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), ConfigError> {
        check_edge("arena_width", width)?;
        check_edge("arena_height", height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.width as f32
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.height as f32
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.origin,
            self.origin + Vec2::new(self.width as f32, self.height as f32),
        )
    }

    /// The playable region inside the border
    pub fn interior(&self) -> Aabb {
        let border = Vec2::splat(ARENA_BORDER);
        let bounds = self.bounds();
        Aabb::new(bounds.min + border, bounds.max - border)
    }

    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::new(self.width as f32, self.height as f32) * 0.5
    }

    /// Clamp a left edge so a span of `width` stays inside the interior
    pub fn clamp_span_x(&self, x: f32, width: f32) -> f32 {
        let interior = self.interior();
        x.clamp(interior.min.x, (interior.max.x - width).max(interior.min.x))
    }
}

fn check_edge(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value < MIN_ARENA_EDGE {
        return Err(ConfigError::invalid(
            field,
            format!("must be at least {MIN_ARENA_EDGE}, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let arena = Arena::new(Vec2::new(5.0, 2.0), 40, 16).unwrap();
        assert_eq!(arena.left(), 5.0);
        assert_eq!(arena.right(), 45.0);
        assert_eq!(arena.top(), 2.0);
        assert_eq!(arena.bottom(), 18.0);

        let interior = arena.interior();
        assert_eq!(interior.min, Vec2::new(6.0, 3.0));
        assert_eq!(interior.max, Vec2::new(44.0, 17.0));
    }

    #[test]
    fn test_rejects_negative_size() {
        assert!(Arena::new(Vec2::ZERO, -40, 16).is_err());
        assert!(Arena::new(Vec2::ZERO, 40, 0).is_err());
    }

    #[test]
    fn test_resize() {
        let mut arena = Arena::new(Vec2::ZERO, 40, 16).unwrap();
        arena.resize(60, 30).unwrap();
        assert_eq!(arena.right(), 60.0);
        assert!(arena.resize(1, 30).is_err());
        // Failed resize leaves the arena unchanged
        assert_eq!(arena.width(), 60);
    }

    #[test]
    fn test_clamp_span() {
        let arena = Arena::new(Vec2::ZERO, 40, 16).unwrap();
        assert_eq!(arena.clamp_span_x(-10.0, 10.0), 1.0);
        assert_eq!(arena.clamp_span_x(35.0, 10.0), 29.0);
        assert_eq!(arena.clamp_span_x(12.0, 10.0), 12.0);
    }
}
