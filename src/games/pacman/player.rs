use crate::input::Direction;

use super::maze::{cell_of, Maze};

pub const SPAWN: (f32, f32) = (14.0, 17.0);
pub const PLAYER_SPEED: f32 = 0.15;
/// How close to a cell center counts as "at" it
pub const CENTER_TOLERANCE: f32 = 0.1;
pub const PROBE: f32 = 0.51;
const STOP_DISTANCE: f32 = 0.6;

pub fn near_center(x: f32, y: f32) -> bool {
    (x - cell_of(x) as f32).abs() < CENTER_TOLERANCE && (y - cell_of(y) as f32).abs() < CENTER_TOLERANCE
}

/// Cell just ahead of (x, y) when moving in `dir`.
pub fn probe_cell(x: f32, y: f32, dir: Direction) -> (i32, i32) {
    (
        cell_of(x + dir.dx() as f32 * PROBE),
        cell_of(y + dir.dy() as f32 * PROBE),
    )
}

#[derive(Debug, Clone)]
pub struct PacMan {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    next_direction: Direction,
    speed: f32,
}

impl Default for PacMan {
    fn default() -> Self {
        Self::new()
    }
}

impl PacMan {
    pub fn new() -> Self {
        Self {
            x: SPAWN.0,
            y: SPAWN.1,
            direction: Direction::None,
            next_direction: Direction::None,
            speed: PLAYER_SPEED,
        }
    }

    pub fn cell(&self) -> (i32, i32) {
        (cell_of(self.x), cell_of(self.y))
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Remember a turn to take at the next cell center that allows it.
    pub fn queue_turn(&mut self, dir: Direction) {
        if dir != Direction::None {
            self.next_direction = dir;
        }
    }

    /// Advance one tick and eat whatever lies under the new position.
    pub fn update(&mut self, maze: &mut Maze) -> u32 {
        if self.next_direction != Direction::None && near_center(self.x, self.y) {
            let (cx, cy) = self.cell();
            let d = self.next_direction;
            if !maze.is_wall(cx + d.dx(), cy + d.dy()) {
                self.direction = d;
                self.next_direction = Direction::None;
                self.x = cx as f32;
                self.y = cy as f32;
            }
        }

        if self.direction != Direction::None {
            let (cx, cy) = self.cell();
            let d = self.direction;
            if near_center(self.x, self.y) && maze.is_wall(cx + d.dx(), cy + d.dy()) {
                self.x = cx as f32;
                self.y = cy as f32;
                return maze.eat_pellet(cx, cy);
            }

            let (px, py) = probe_cell(self.x, self.y, self.direction);
            let blocked = maze.is_wall(px, py)
                && ((px as f32 - self.x).powi(2) + (py as f32 - self.y).powi(2)).sqrt() < STOP_DISTANCE;
            if blocked {
                // Halt on the last open cell before the wall
                self.x = (px - self.direction.dx()) as f32;
                self.y = (py - self.direction.dy()) as f32;
            } else {
                self.x += self.direction.dx() as f32 * self.speed;
                self.y += self.direction.dy() as f32 * self.speed;
                self.x = maze.wrap_x(self.x);
            }
        }

        let (cx, cy) = self.cell();
        maze.eat_pellet(cx, cy)
    }
}
