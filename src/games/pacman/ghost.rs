use ratatui::style::Color;

use crate::input::Direction;

use super::maze::{cell_of, Maze};
use super::player::{near_center, probe_cell};

pub const GHOST_SPEED: f32 = 0.1;
pub const GHOST_SPAWNS: [(f32, f32); 4] = [(13.0, 11.0), (14.0, 11.0), (13.0, 13.0), (14.0, 13.0)];
pub const GHOST_COLORS: [Color; 4] = [
    Color::Rgb(255, 0, 0),
    Color::Rgb(255, 184, 255),
    Color::Rgb(0, 255, 255),
    Color::Rgb(255, 184, 82),
];

#[derive(Debug, Clone)]
pub struct Ghost {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    pub color: Color,
    speed: f32,
}

impl Ghost {
    pub fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            x,
            y,
            direction: Direction::Left,
            color,
            speed: GHOST_SPEED,
        }
    }

    pub fn spawn_all() -> Vec<Ghost> {
        GHOST_SPAWNS
            .iter()
            .zip(GHOST_COLORS)
            .map(|(&(x, y), color)| Ghost::new(x, y, color))
            .collect()
    }

    pub fn cell(&self) -> (i32, i32) {
        (cell_of(self.x), cell_of(self.y))
    }

    /// Greedy pick: the legal neighbor closest to `target`, never reversing
    /// while anything else is open.
    pub fn choose_direction(&self, maze: &Maze, target: (f32, f32)) -> Direction {
        let (cx, cy) = self.cell();
        let opposite = self.direction.opposite();
        let mut best = Direction::None;
        let mut best_dist = f32::INFINITY;

        for dir in Direction::ALL {
            if dir == opposite && self.direction != Direction::None {
                continue;
            }
            let (nx, ny) = (cx + dir.dx(), cy + dir.dy());
            if maze.is_wall(nx, ny) {
                continue;
            }
            let dist = (nx as f32 - target.0).powi(2) + (ny as f32 - target.1).powi(2);
            if dist < best_dist {
                best_dist = dist;
                best = dir;
            }
        }

        if best == Direction::None {
            opposite
        } else {
            best
        }
    }

    pub fn update(&mut self, maze: &Maze, target: (f32, f32)) {
        if near_center(self.x, self.y) {
            let (cx, cy) = self.cell();
            self.x = cx as f32;
            self.y = cy as f32;
            self.direction = self.choose_direction(maze, target);
        }

        let (px, py) = probe_cell(self.x, self.y, self.direction);
        if self.direction != Direction::None && !maze.is_wall(px, py) {
            self.x += self.direction.dx() as f32 * self.speed;
            self.y += self.direction.dy() as f32 * self.speed;
            self.x = maze.wrap_x(self.x);
        }
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}
