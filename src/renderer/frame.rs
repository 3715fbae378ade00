//! Character-grid rasterizer
//!
//! One arena cell maps to one character. The border is drawn first, then
//! blocks, enemies and the paddle, then balls and bullets on top.

use std::fmt;

use glam::Vec2;

use super::Snapshot;
use crate::sim::{Entity, Outcome};

const CORNER: char = '+';
const HORIZONTAL: char = '-';
const VERTICAL: char = '|';

/// A rasterized snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    width: usize,
    height: usize,
    cells: Vec<char>,
    status: String,
    banner: Option<&'static str>,
}

impl TextFrame {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let width = snapshot.arena.width().max(0) as usize;
        let height = snapshot.arena.height().max(0) as usize;
        let mut frame = Self {
            width,
            height,
            cells: vec![' '; width * height],
            status: status_line(snapshot),
            banner: banner(snapshot),
        };
        frame.draw_border();

        let (movers, fixed): (Vec<&Entity>, Vec<&Entity>) =
            snapshot.entities.iter().partition(|e| e.is_mover());
        let origin = snapshot.arena.origin();
        for entity in fixed.into_iter().chain(movers) {
            frame.draw_entity(entity, origin);
        }
        frame
    }

    fn draw_border(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (right, bottom) = (self.width - 1, self.height - 1);
        for x in 0..self.width {
            self.set(x, 0, HORIZONTAL);
            self.set(x, bottom, HORIZONTAL);
        }
        for y in 0..self.height {
            self.set(0, y, VERTICAL);
            self.set(right, y, VERTICAL);
        }
        for (x, y) in [(0, 0), (right, 0), (0, bottom), (right, bottom)] {
            self.set(x, y, CORNER);
        }
    }

    fn draw_entity(&mut self, entity: &Entity, origin: Vec2) {
        let local = entity.position - origin;
        let x0 = local.x.floor() as i64;
        let y0 = local.y.floor() as i64;
        let w = (entity.size.x.round() as i64).max(1);
        let h = (entity.size.y.round() as i64).max(1);
        let glyph = entity.glyph();

        for y in (y0..y0 + h).filter(|y| *y >= 0) {
            for x in (x0..x0 + w).filter(|x| *x >= 0) {
                self.set(x as usize, y as usize, glyph);
            }
        }
    }

    /// Out-of-range writes are dropped
    fn set(&mut self, x: usize, y: usize, c: char) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = c;
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Character at an arena-local cell
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Playfield rows, top to bottom
    pub fn rows(&self) -> Vec<String> {
        if self.width == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().collect())
            .collect()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// End-of-round or pause message, if any
    pub fn banner(&self) -> Option<&str> {
        self.banner
    }

    /// Playfield rows followed by the status line and banner
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.rows();
        lines.push(self.status.clone());
        if let Some(banner) = self.banner {
            lines.push(banner.to_string());
        }
        lines
    }
}

impl fmt::Display for TextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

fn status_line(snapshot: &Snapshot) -> String {
    match snapshot.time_remaining {
        Some(secs) => format!(
            "Score: {} | Lives: {} | Time: {}s",
            snapshot.score,
            snapshot.lives,
            secs.ceil() as u32
        ),
        None => format!("Score: {} | Lives: {}", snapshot.score, snapshot.lives),
    }
}

fn banner(snapshot: &Snapshot) -> Option<&'static str> {
    match snapshot.outcome {
        Outcome::Won => Some("YOU WIN! (r: restart, q: quit)"),
        Outcome::Lost => Some("GAME OVER! (r: restart, q: quit)"),
        Outcome::InProgress if snapshot.paused => Some("PAUSED (p: resume)"),
        Outcome::InProgress => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::build_snapshot;
    use crate::settings::{GameMode, Settings};
    use crate::sim::{EntityId, EntityKind, GameState};

    fn invaders_frame() -> (GameState, TextFrame) {
        let state = GameState::new(Settings::from_preset(GameMode::Invaders)).unwrap();
        let frame = TextFrame::from_snapshot(&build_snapshot(&state));
        (state, frame)
    }

    #[test]
    fn test_border_and_size() {
        let (_, frame) = invaders_frame();
        assert_eq!(frame.rows().len(), 16);
        assert!(frame.rows().iter().all(|r| r.chars().count() == 40));
        assert_eq!(frame.cell(0, 0), Some('+'));
        assert_eq!(frame.cell(39, 15), Some('+'));
        assert_eq!(frame.cell(10, 0), Some('-'));
        assert_eq!(frame.cell(0, 7), Some('|'));
        assert_eq!(frame.cell(40, 0), None);
    }

    #[test]
    fn test_entities_drawn() {
        let (_, frame) = invaders_frame();
        assert_eq!(frame.cell(19, 14), Some('='));
        assert_eq!(frame.cell(5, 1), Some('W'));
        assert_eq!(frame.cell(8, 5), Some('W'));
        assert_eq!(frame.cell(6, 1), Some(' '));
    }

    #[test]
    fn test_ball_drawn_over_block() {
        let (state, _) = invaders_frame();
        let mut snapshot = build_snapshot(&state);
        let ball = Entity::new(
            EntityId(900),
            Vec2::new(20.4, 8.7),
            Vec2::ONE,
            EntityKind::Ball {
                velocity: Vec2::ZERO,
            },
        );
        let block = Entity::new(
            EntityId(901),
            Vec2::new(18.0, 8.0),
            Vec2::new(5.0, 2.0),
            EntityKind::Block {
                hit_points: 3,
                score_value: 150,
            },
        );
        snapshot.entities.insert(0, ball);
        snapshot.entities.push(block);

        let frame = TextFrame::from_snapshot(&snapshot);
        assert_eq!(frame.cell(20, 8), Some('o'));
        assert_eq!(frame.cell(18, 9), Some('#'));
        assert_eq!(frame.cell(22, 8), Some('#'));
    }

    #[test]
    fn test_status_line() {
        let state = GameState::new(Settings::default()).unwrap();
        let frame = TextFrame::from_snapshot(&build_snapshot(&state));
        assert_eq!(frame.status(), "Score: 0 | Lives: 1 | Time: 60s");
        assert_eq!(frame.banner(), None);

        let (_, frame) = invaders_frame();
        assert_eq!(frame.status(), "Score: 0 | Lives: 1");
    }

    #[test]
    fn test_banners() {
        let (state, _) = invaders_frame();
        let mut snapshot = build_snapshot(&state);

        snapshot.paused = true;
        let frame = TextFrame::from_snapshot(&snapshot);
        assert!(frame.banner().unwrap().starts_with("PAUSED"));

        snapshot.outcome = Outcome::Lost;
        let frame = TextFrame::from_snapshot(&snapshot);
        assert!(frame.banner().unwrap().starts_with("GAME OVER!"));
        assert_eq!(frame.lines().len(), 18);

        snapshot.outcome = Outcome::Won;
        let frame = TextFrame::from_snapshot(&snapshot);
        assert!(frame.to_string().ends_with("YOU WIN! (r: restart, q: quit)"));
    }
}
