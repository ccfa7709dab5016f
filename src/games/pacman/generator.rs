//! Randomized maze carving. Only the left half is carved; every change is
//! applied to the mirrored column as well, so the result is symmetric.

use rand::seq::SliceRandom;
use rand::Rng;

use super::maze::{Cell, MAZE_COLS, MAZE_ROWS, WRAP_ROW};

const DEN_ROWS: std::ops::RangeInclusive<usize> = 13..=15;
const DEN_COLS: std::ops::RangeInclusive<usize> = 10..=17;
pub const GATE_ROW: usize = 12;
pub const GATE_COLS: [usize; 2] = [13, 14];

// Kept free of corridors so the den stays enclosed
const RESERVED_ROWS: std::ops::RangeInclusive<usize> = 12..=16;
const RESERVED_COLS: std::ops::RangeInclusive<usize> = 9..=18;

const WRAP_LEN: usize = 6;
const LOOP_ATTEMPTS: usize = 40;
/// (row, col)
pub const POWER_PELLETS: [(usize, usize); 4] = [(3, 3), (3, 24), (27, 3), (27, 24)];

struct Carver {
    grid: Vec<Vec<Cell>>,
}

fn reserved(r: usize, c: usize) -> bool {
    RESERVED_ROWS.contains(&r) && RESERVED_COLS.contains(&c)
}

fn mirror(c: usize) -> usize {
    MAZE_COLS - 1 - c
}

impl Carver {
    fn new() -> Self {
        Self {
            grid: vec![vec![Cell::Wall; MAZE_COLS]; MAZE_ROWS],
        }
    }

    fn carve(&mut self, r: usize, c: usize) {
        self.grid[r][c] = Cell::Open;
        self.grid[r][mirror(c)] = Cell::Open;
    }

    fn build_den(&mut self) {
        for r in DEN_ROWS {
            for c in DEN_COLS {
                self.grid[r][c] = Cell::Den;
            }
        }
        for c in GATE_COLS {
            self.grid[GATE_ROW][c] = Cell::Open;
        }
    }

    /// Stride-2 wall neighbors still to be carved, left half only.
    fn uncarved_neighbors(&self, r: usize, c: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        for (dr, dc) in [(-2i32, 0i32), (2, 0), (0, -2), (0, 2)] {
            let nr = r as i32 + dr;
            let nc = c as i32 + dc;
            if nr <= 0 || nr >= MAZE_ROWS as i32 - 1 || nc <= 0 || nc >= (MAZE_COLS / 2) as i32 {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if reserved(nr, nc) {
                continue;
            }
            if self.grid[nr][nc] == Cell::Wall {
                out.push((nr, nc));
            }
        }
        out
    }

    fn carve_corridors<R: Rng>(&mut self, rng: &mut R) {
        self.carve(1, 1);
        let mut stack = vec![(1usize, 1usize)];
        while let Some(&(r, c)) = stack.last() {
            let neighbors = self.uncarved_neighbors(r, c);
            match neighbors.choose(rng) {
                Some(&(nr, nc)) => {
                    self.carve((r + nr) / 2, (c + nc) / 2);
                    self.carve(nr, nc);
                    stack.push((nr, nc));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    fn open_wrap_tunnel(&mut self) {
        for c in 0..WRAP_LEN {
            self.carve(WRAP_ROW, c);
        }
    }

    fn is_path(&self, r: usize, c: usize) -> bool {
        self.grid[r][c] != Cell::Wall
    }

    /// Knock out walls separating two parallel corridors.
    fn remove_dead_ends<R: Rng>(&mut self, rng: &mut R) {
        for _ in 0..LOOP_ATTEMPTS {
            let r = rng.gen_range(1..MAZE_ROWS - 1);
            let c = rng.gen_range(1..MAZE_COLS / 2 - 1);
            if self.grid[r][c] != Cell::Wall || reserved(r, c) {
                continue;
            }
            let vertical = self.is_path(r - 1, c) && self.is_path(r + 1, c);
            let horizontal = self.is_path(r, c - 1) && self.is_path(r, c + 1);
            if vertical != horizontal {
                self.carve(r, c);
            }
        }
    }

    fn place_pellets(&mut self) {
        for r in 1..MAZE_ROWS - 1 {
            for c in 1..MAZE_COLS - 1 {
                if self.grid[r][c] != Cell::Open {
                    continue;
                }
                let tunnel = r == WRAP_ROW && (c < WRAP_LEN || c >= MAZE_COLS - WRAP_LEN);
                let gate = r == GATE_ROW && GATE_COLS.contains(&c);
                if !tunnel && !gate {
                    self.grid[r][c] = Cell::Pellet;
                }
            }
        }
        for (r, c) in POWER_PELLETS {
            if self.grid[r][c] != Cell::Wall {
                self.grid[r][c] = Cell::PowerPellet;
            }
        }
    }
}

pub fn generate<R: Rng>(rng: &mut R) -> Vec<Vec<Cell>> {
    let mut carver = Carver::new();
    carver.build_den();
    carver.carve_corridors(rng);
    carver.open_wrap_tunnel();
    carver.remove_dead_ends(rng);
    carver.place_pellets();
    log::debug!(
        "generated maze: {} pellets",
        carver.grid.iter().flatten().filter(|&&c| c == Cell::Pellet).count()
    );
    carver.grid
}
