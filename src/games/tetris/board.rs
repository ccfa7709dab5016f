use super::piece::{PieceKind, Shape, Tetromino};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

pub type Cell = Option<PieceKind>;

#[derive(Debug, Clone)]
pub struct Board {
    grid: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: vec![vec![None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.grid.get(y).and_then(|row| row.get(x).copied()).flatten()
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if y < BOARD_HEIGHT && x < BOARD_WIDTH {
            self.grid[y][x] = cell;
        }
    }

    /// Whether `piece` (or `shape` in its place) fits after shifting by
    /// (dx, dy). Cells above the board never collide.
    pub fn is_valid_position(&self, piece: &Tetromino, dx: i32, dy: i32, shape: Option<&Shape>) -> bool {
        let shape = shape.unwrap_or(piece.shape());
        let (ox, oy) = (piece.x + dx, piece.y + dy);
        shape.filled().all(|(cx, cy)| {
            let (bx, by) = (ox + cx, oy + cy);
            if bx < 0 || bx >= BOARD_WIDTH as i32 || by >= BOARD_HEIGHT as i32 {
                return false;
            }
            by < 0 || self.grid[by as usize][bx as usize].is_none()
        })
    }

    /// Write the piece into the grid. Returns false if any cell was above
    /// the visible board (those cells are dropped).
    pub fn lock_piece(&mut self, piece: &Tetromino) -> bool {
        let mut fully_visible = true;
        for (x, y) in piece.cells() {
            if y < 0 {
                fully_visible = false;
                continue;
            }
            if x >= 0 && (x as usize) < BOARD_WIDTH && (y as usize) < BOARD_HEIGHT {
                self.grid[y as usize][x as usize] = Some(piece.kind);
            }
        }
        fully_visible
    }

    /// Remove full rows, inserting empty rows at the top. Returns the count.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.grid[row].iter().all(Option::is_some) {
                self.grid.remove(row);
                self.grid.insert(0, vec![None; BOARD_WIDTH]);
                cleared += 1;
                // same index again: rows above shifted down into it
                continue;
            }
            y -= 1;
        }
        cleared
    }

    /// Rows the piece can fall before resting (ghost projection).
    pub fn drop_distance(&self, piece: &Tetromino) -> i32 {
        let mut dy = 0;
        while self.is_valid_position(piece, 0, dy + 1, None) {
            dy += 1;
        }
        dy
    }

    pub fn highest_filled_row(&self) -> Option<usize> {
        self.grid.iter().position(|row| row.iter().any(Option::is_some))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tetris::piece::PieceKind;
    use proptest::prelude::*;

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set(x, y, Some(PieceKind::Z));
        }
    }

    proptest! {
        #[test]
        fn out_of_bounds_is_invalid(x in -20i32..30, y in -10i32..40) {
            let board = Board::new();
            let mut piece = Tetromino::new(PieceKind::O);
            piece.x = x;
            piece.y = y;
            // O occupies (x..=x+1, y..=y+1)
            let in_bounds = x >= 0 && x + 1 < BOARD_WIDTH as i32 && y + 1 < BOARD_HEIGHT as i32;
            prop_assert_eq!(board.is_valid_position(&piece, 0, 0, None), in_bounds);
        }

        #[test]
        fn above_board_is_always_valid(x in 0i32..8, y in -10i32..-1) {
            let mut board = Board::new();
            for row in 0..BOARD_HEIGHT {
                fill_row(&mut board, row);
            }
            let mut piece = Tetromino::new(PieceKind::O);
            piece.x = x;
            piece.y = y;
            prop_assert!(board.is_valid_position(&piece, 0, 0, None));
        }
    }

    #[test]
    fn test_collides_with_locked_cells() {
        let mut board = Board::new();
        board.set(4, 19, Some(PieceKind::I));
        let mut piece = Tetromino::new(PieceKind::O);
        piece.x = 3;
        piece.y = 18;
        assert!(!board.is_valid_position(&piece, 0, 0, None));
        assert!(board.is_valid_position(&piece, 0, -1, None));
        assert!(board.is_valid_position(&piece, -2, 0, None));
    }

    #[test]
    fn test_shape_override() {
        let board = Board::new();
        let mut piece = Tetromino::new(PieceKind::I);
        piece.x = -1;
        piece.y = 5;
        // horizontal I at x=-1 pokes out the left wall, vertical I does not
        assert!(!board.is_valid_position(&piece, 0, 0, None));
        let vertical = piece.shape().rotated_cw();
        assert!(board.is_valid_position(&piece, 0, 0, Some(&vertical)));
    }

    #[test]
    fn test_clear_full_empty_full() {
        let mut board = Board::new();
        fill_row(&mut board, BOARD_HEIGHT - 3);
        fill_row(&mut board, BOARD_HEIGHT - 1);

        assert_eq!(board.clear_lines(), 2);
        assert!(board.rows().iter().all(|row| row.iter().all(Option::is_none)));
        assert_eq!(board.rows().len(), BOARD_HEIGHT);
    }

    #[test]
    fn test_clear_keeps_partial_rows_in_order() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        fill_row(&mut board, 18);
        board.set(0, 17, Some(PieceKind::T));
        board.set(5, 16, Some(PieceKind::L));

        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.cell(0, 19), Some(PieceKind::T));
        assert_eq!(board.cell(5, 18), Some(PieceKind::L));
        assert_eq!(board.highest_filled_row(), Some(18));
    }

    #[test]
    fn test_lock_ignores_hidden_cells() {
        let mut board = Board::new();
        let mut piece = Tetromino::new(PieceKind::T);
        piece.y = -1;
        // T rows: -1 (one cell) and 0 (three cells)
        assert!(!board.lock_piece(&piece));
        assert_eq!((0..BOARD_WIDTH).filter(|&x| board.cell(x, 0).is_some()).count(), 3);
        assert_eq!(board.rows().len(), BOARD_HEIGHT);
    }

    #[test]
    fn test_drop_distance() {
        let board = Board::new();
        let piece = Tetromino::new(PieceKind::O);
        // O at y=-2 covers rows -2 and -1, rests on rows 18-19
        assert_eq!(board.drop_distance(&piece), 20);
    }
}
