use ratatui::style::Color;

pub const SPAWN_X: i32 = 3;
pub const SPAWN_Y: i32 = -2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Rgb(0, 230, 240),
            PieceKind::J => Color::Rgb(40, 90, 240),
            PieceKind::L => Color::Rgb(240, 150, 20),
            PieceKind::O => Color::Rgb(240, 220, 30),
            PieceKind::S => Color::Rgb(40, 220, 80),
            PieceKind::T => Color::Rgb(170, 60, 230),
            PieceKind::Z => Color::Rgb(230, 40, 50),
        }
    }

    pub fn spawn_shape(self) -> Shape {
        match self {
            PieceKind::I => Shape::from_rows(&["....", "####", "....", "...."]),
            PieceKind::J => Shape::from_rows(&["#..", "###", "..."]),
            PieceKind::L => Shape::from_rows(&["..#", "###", "..."]),
            PieceKind::O => Shape::from_rows(&["##", "##"]),
            PieceKind::S => Shape::from_rows(&[".##", "##.", "..."]),
            PieceKind::T => Shape::from_rows(&[".#.", "###", "..."]),
            PieceKind::Z => Shape::from_rows(&["##.", ".##", "..."]),
        }
    }
}

/// Square occupancy mask, `size` x `size` (at most 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    cells: [[bool; 4]; 4],
}

impl Shape {
    fn from_rows(rows: &[&str]) -> Self {
        let mut cells = [[false; 4]; 4];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                cells[y][x] = ch == '#';
            }
        }
        Self { size: rows.len(), cells }
    }

    /// Occupied cells as (x, y) offsets within the mask.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| self.cells[y][x].then_some((x as i32, y as i32)))
        })
    }

    pub fn rotated_cw(&self) -> Shape {
        let n = self.size;
        let mut cells = [[false; 4]; 4];
        for y in 0..n {
            for x in 0..n {
                cells[x][n - 1 - y] = self.cells[y][x];
            }
        }
        Shape { size: n, cells }
    }

    pub fn rotated_ccw(&self) -> Shape {
        let n = self.size;
        let mut cells = [[false; 4]; 4];
        for y in 0..n {
            for x in 0..n {
                cells[n - 1 - x][y] = self.cells[y][x];
            }
        }
        Shape { size: n, cells }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Cw,
    Ccw,
}

impl Spin {
    fn step(self) -> u8 {
        match self {
            Spin::Cw => 1,
            Spin::Ccw => 3,
        }
    }
}

// SRS offsets, y up-positive. Row order: 0->1, 1->0, 1->2, 2->1, 2->3, 3->2, 3->0, 0->3
type Kick = (i32, i32);

static JLSTZ_KICKS: [[Kick; 5]; 8] = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

static I_KICKS: [[Kick; 5]; 8] = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

static O_KICKS: [Kick; 1] = [(0, 0)];

fn transition_row(from: u8, to: u8) -> usize {
    match (from, to) {
        (0, 1) => 0,
        (1, 0) => 1,
        (1, 2) => 2,
        (2, 1) => 3,
        (2, 3) => 4,
        (3, 2) => 5,
        (3, 0) => 6,
        _ => 7, // 0 -> 3
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    rotation: u8,
    shape: Shape,
}

impl Tetromino {
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            x: SPAWN_X,
            y: SPAWN_Y,
            rotation: 0,
            shape: kind.spawn_shape(),
        }
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn next_rotation(&self, spin: Spin) -> u8 {
        (self.rotation + spin.step()) % 4
    }

    /// Candidate mask for `spin`. The O piece keeps its mask.
    pub fn rotated_shape(&self, spin: Spin) -> Shape {
        match (self.kind, spin) {
            (PieceKind::O, _) => self.shape,
            (_, Spin::Cw) => self.shape.rotated_cw(),
            (_, Spin::Ccw) => self.shape.rotated_ccw(),
        }
    }

    /// Kick offsets for `spin` in board coordinates (y down-positive).
    pub fn kicks(&self, spin: Spin) -> impl Iterator<Item = (i32, i32)> {
        let table: &'static [Kick] = match self.kind {
            PieceKind::O => &O_KICKS,
            PieceKind::I => &I_KICKS[transition_row(self.rotation, self.next_rotation(spin))],
            _ => &JLSTZ_KICKS[transition_row(self.rotation, self.next_rotation(spin))],
        };
        table.iter().map(|&(dx, dy)| (dx, -dy))
    }

    pub fn apply_rotation(&mut self, shape: Shape, rotation: u8) {
        self.shape = shape;
        self.rotation = rotation % 4;
    }

    /// Absolute board cells covered by the piece.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.filled().map(move |(cx, cy)| (self.x + cx, self.y + cy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_rotations_return_to_spawn() {
        for kind in PieceKind::ALL {
            let spawn = kind.spawn_shape();
            let mut cw = spawn;
            let mut ccw = spawn;
            for _ in 0..4 {
                cw = cw.rotated_cw();
                ccw = ccw.rotated_ccw();
            }
            assert_eq!(cw, spawn, "{:?}", kind);
            assert_eq!(ccw, spawn, "{:?}", kind);
            assert_eq!(spawn.filled().count(), 4);
        }
    }

    #[test]
    fn test_cw_then_ccw_is_identity() {
        let t = PieceKind::T.spawn_shape();
        assert_eq!(t.rotated_cw().rotated_ccw(), t);
    }

    #[test]
    fn test_t_clockwise_mask() {
        let r = PieceKind::T.spawn_shape().rotated_cw();
        let cells: Vec<_> = r.filled().collect();
        assert_eq!(cells, vec![(1, 0), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_kick_y_is_inverted() {
        let t = Tetromino::new(PieceKind::T);
        let kicks: Vec<_> = t.kicks(Spin::Cw).collect();
        assert_eq!(kicks, vec![(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]);
    }

    #[test]
    fn test_o_piece_identity_kick() {
        let o = Tetromino::new(PieceKind::O);
        assert_eq!(o.kicks(Spin::Ccw).collect::<Vec<_>>(), vec![(0, 0)]);
        assert_eq!(o.rotated_shape(Spin::Cw), *o.shape());
    }

    #[test]
    fn test_i_piece_uses_own_table() {
        let i = Tetromino::new(PieceKind::I);
        let second = i.kicks(Spin::Cw).nth(1);
        assert_eq!(second, Some((-2, 0)));
        assert_eq!(i.next_rotation(Spin::Ccw), 3);
    }
}
