use rand::Rng;

use super::generator;

pub const MAZE_ROWS: usize = 31;
pub const MAZE_COLS: usize = 28;
/// Row whose left/right edges wrap around
pub const WRAP_ROW: usize = 14;

pub const PELLET_POINTS: u32 = 10;
pub const POWER_PELLET_POINTS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
    Pellet,
    PowerPellet,
    Den,
}

/// Round a continuous coordinate to its cell, halves going up.
pub fn cell_of(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

#[derive(Debug, Clone)]
pub struct Maze {
    grid: Vec<Vec<Cell>>,
}

impl Maze {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self {
            grid: generator::generate(rng),
        }
    }

    pub fn from_grid(grid: Vec<Vec<Cell>>) -> Self {
        Self { grid }
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    /// Cell at column `x`, row `y`, or `None` off the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    /// Off-grid counts as wall, except along the wrap row.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        match self.cell(x, y) {
            Some(cell) => cell == Cell::Wall,
            None => y != WRAP_ROW as i32,
        }
    }

    /// Teleport across the horizontal edges.
    pub fn wrap_x(&self, x: f32) -> f32 {
        let edge = self.cols() as f32 - 0.5;
        if x < -0.5 {
            edge
        } else if x > edge {
            -0.5
        } else {
            x
        }
    }

    /// Consume the pellet at (x, y), returning its points.
    pub fn eat_pellet(&mut self, x: i32, y: i32) -> u32 {
        let points = match self.cell(x, y) {
            Some(Cell::Pellet) => PELLET_POINTS,
            Some(Cell::PowerPellet) => POWER_PELLET_POINTS,
            _ => return 0,
        };
        self.grid[y as usize][x as usize] = Cell::Open;
        points
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.grid.iter().flatten().filter(|&&c| c == kind).count()
    }

    pub fn pellets_remaining(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&c| matches!(c, Cell::Pellet | Cell::PowerPellet))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_cell_of_rounds_half_up() {
        assert_eq!(cell_of(2.49), 2);
        assert_eq!(cell_of(2.5), 3);
        assert_eq!(cell_of(-0.5), 0);
        assert_eq!(cell_of(-0.51), -1);
    }

    #[test]
    fn test_off_grid_is_wall_except_wrap_row() {
        let maze = Maze::generate(&mut Pcg32::seed_from_u64(3));
        assert!(maze.is_wall(-1, 5));
        assert!(maze.is_wall(MAZE_COLS as i32, 5));
        assert!(maze.is_wall(3, -1));
        assert!(!maze.is_wall(-1, WRAP_ROW as i32));
        assert!(!maze.is_wall(MAZE_COLS as i32, WRAP_ROW as i32));
    }

    #[test]
    fn test_eat_all_pellets_scores_total() {
        let mut maze = Maze::generate(&mut Pcg32::seed_from_u64(21));
        let pellets = maze.count(Cell::Pellet) as u32;
        let power = maze.count(Cell::PowerPellet) as u32;
        assert!(pellets > 0);
        assert_eq!(power, 4);

        let mut score = 0;
        for y in 0..maze.rows() as i32 {
            for x in 0..maze.cols() as i32 {
                score += maze.eat_pellet(x, y);
            }
        }
        assert_eq!(maze.pellets_remaining(), 0);
        assert_eq!(score, 10 * pellets + 50 * power);
        // second pass finds nothing
        assert_eq!(maze.eat_pellet(3, 3), 0);
    }

    #[test]
    fn test_eat_off_grid_is_zero() {
        let mut maze = Maze::generate(&mut Pcg32::seed_from_u64(8));
        assert_eq!(maze.eat_pellet(-1, WRAP_ROW as i32), 0);
        assert_eq!(maze.eat_pellet(MAZE_COLS as i32, WRAP_ROW as i32), 0);
    }
}
