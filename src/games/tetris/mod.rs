//! Falling-block puzzle

pub mod bag;
pub mod board;
pub mod piece;

use std::collections::VecDeque;
use std::time::Duration;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::{Session, Simulation};
use crate::input::{Command, Direction};

use bag::Bag;
use board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use piece::{Spin, Tetromino};

pub const DEFAULT_DROP_INTERVAL: Duration = Duration::from_millis(1000);
const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

pub type Tetris = Session<TetrisSim>;

pub fn new_game(seed: u64, drop_interval: Duration) -> Tetris {
    Session::new(move || TetrisSim::new(seed, drop_interval))
}

pub struct TetrisSim {
    board: Board,
    bag: Bag,
    active: Option<Tetromino>,
    drop_timer: Duration,
    drop_interval: Duration,
    pending: VecDeque<Command>,
    score: u32,
    lines: u32,
    pieces: u32,
    game_over: bool,
    paused: bool,
}

impl TetrisSim {
    pub fn new(seed: u64, drop_interval: Duration) -> Self {
        let mut s = Self {
            board: Board::new(),
            bag: Bag::new(seed),
            active: None,
            drop_timer: Duration::ZERO,
            drop_interval,
            pending: VecDeque::new(),
            score: 0,
            lines: 0,
            pieces: 0,
            game_over: false,
            paused: false,
        };
        s.spawn_piece();
        s
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn spawn_piece(&mut self) {
        let piece = self.bag.next();
        if self.board.is_valid_position(&piece, 0, 0, None) {
            self.active = Some(piece);
        } else {
            self.active = None;
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.game_over = true;
        log::info!(
            "Tetris game over: score {}, {} lines, {} pieces",
            self.score,
            self.lines,
            self.pieces
        );
    }

    fn reset(&mut self) {
        self.board = Board::new();
        self.active = None;
        self.drop_timer = Duration::ZERO;
        self.score = 0;
        self.lines = 0;
        self.pieces = 0;
        self.game_over = false;
        self.paused = false;
        self.spawn_piece();
    }

    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
    }

    fn can_act(&self) -> bool {
        !self.game_over && !self.paused && self.active.is_some()
    }

    pub fn shift(&mut self, dx: i32) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else { return false };
        if self.board.is_valid_position(piece, dx, 0, None) {
            piece.x += dx;
            true
        } else {
            false
        }
    }

    /// Rotate with kicks. Rejected rotations leave the piece untouched.
    pub fn rotate(&mut self, spin: Spin) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else { return false };
        let shape = piece.rotated_shape(spin);
        let rotation = piece.next_rotation(spin);
        let kick = piece
            .kicks(spin)
            .find(|&(dx, dy)| self.board.is_valid_position(piece, dx, dy, Some(&shape)));
        match kick {
            Some((dx, dy)) => {
                piece.x += dx;
                piece.y += dy;
                piece.apply_rotation(shape, rotation);
                true
            }
            None => false,
        }
    }

    /// One row down, or lock if blocked.
    pub fn gravity(&mut self) {
        if !self.can_act() {
            return;
        }
        let Some(piece) = self.active.as_mut() else { return };
        if self.board.is_valid_position(piece, 0, 1, None) {
            piece.y += 1;
        } else {
            self.lock_piece();
        }
    }

    pub fn hard_drop(&mut self) {
        if !self.can_act() {
            return;
        }
        if let Some(piece) = self.active.as_mut() {
            let dy = self.board.drop_distance(piece);
            piece.y += dy;
        }
        self.lock_piece();
        self.drop_timer = Duration::ZERO;
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else { return };
        let visible = self.board.lock_piece(&piece);
        self.pieces += 1;

        let cleared = self.board.clear_lines();
        if cleared > 0 {
            self.lines += cleared as u32;
            self.score += LINE_SCORES[cleared.min(4)];
            log::debug!("cleared {} lines (total {})", cleared, self.lines);
        }

        // Locked out above the visible board
        if !visible {
            self.end_game();
            return;
        }
        self.spawn_piece();
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::PauseToggle => self.toggle_pause(),
            Command::Restart => self.reset(),
            Command::Confirm => {
                if self.game_over {
                    self.reset();
                }
            }
            Command::Move(Direction::Left) => {
                self.shift(-1);
            }
            Command::Move(Direction::Right) => {
                self.shift(1);
            }
            Command::Move(Direction::Up) | Command::RotateCw => {
                self.rotate(Spin::Cw);
            }
            Command::RotateCcw => {
                self.rotate(Spin::Ccw);
            }
            Command::Move(Direction::Down) | Command::SoftDrop => self.gravity(),
            Command::HardDrop => self.hard_drop(),
            Command::Move(Direction::None) | Command::Release(_) | Command::PointerX(_) => {}
        }
    }

    fn render_board(&self) -> Vec<Line<'static>> {
        let bg = Style::default().bg(Color::Rgb(10, 10, 20));
        let wall = Style::default().fg(Color::Rgb(60, 60, 80)).bg(Color::Rgb(10, 10, 20));

        let mut grid: Vec<Vec<(&'static str, Style)>> = (0..BOARD_HEIGHT)
            .map(|y| {
                (0..BOARD_WIDTH)
                    .map(|x| match self.board.cell(x, y) {
                        Some(kind) => ("██", Style::default().fg(kind.color()).bg(Color::Rgb(10, 10, 20))),
                        None if (x + y) % 2 == 0 => (" ·", Style::default().fg(Color::Rgb(30, 30, 45)).bg(Color::Rgb(10, 10, 20))),
                        None => ("  ", bg),
                    })
                    .collect()
            })
            .collect();

        if let Some(piece) = self.active.as_ref().filter(|_| !self.paused) {
            // Ghost first so the piece draws over it
            let ghost_dy = self.board.drop_distance(piece);
            for (x, y) in piece.cells() {
                let gy = y + ghost_dy;
                if gy >= 0 && (gy as usize) < BOARD_HEIGHT && x >= 0 && (x as usize) < BOARD_WIDTH {
                    grid[gy as usize][x as usize] = ("░░", Style::default().fg(piece.kind.color()).bg(Color::Rgb(10, 10, 20)));
                }
            }
            for (x, y) in piece.cells() {
                if y >= 0 && (y as usize) < BOARD_HEIGHT && x >= 0 && (x as usize) < BOARD_WIDTH {
                    grid[y as usize][x as usize] = ("██", Style::default()
                        .fg(piece.kind.color())
                        .bg(Color::Rgb(10, 10, 20))
                        .add_modifier(Modifier::BOLD));
                }
            }
        }

        let mut lines: Vec<Line<'static>> = grid
            .into_iter()
            .map(|row| {
                let mut spans = vec![Span::styled("│", wall)];
                spans.extend(row.into_iter().map(|(s, style)| Span::styled(s, style)));
                spans.push(Span::styled("│", wall));
                Line::from(spans)
            })
            .collect();
        lines.push(Line::from(Span::styled(format!("└{}┘", "─".repeat(BOARD_WIDTH * 2)), wall)));
        lines
    }
}

impl Simulation for TetrisSim {
    const TITLE: &'static str = "Tetris";
    const MIN_WIDTH: u16 = (BOARD_WIDTH as u16) * 2 + 2 + 20;
    const MIN_HEIGHT: u16 = BOARD_HEIGHT as u16 + 1;

    fn update(&mut self, dt: Duration) {
        while let Some(command) = self.pending.pop_front() {
            self.apply(command);
        }
        if self.game_over || self.paused {
            return;
        }

        self.drop_timer += dt;
        if self.drop_timer > self.drop_interval {
            self.drop_timer = Duration::ZERO;
            self.gravity();
        }
    }

    fn handle_command(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let board_width = BOARD_WIDTH as u16 * 2 + 2;
        let cols = Layout::default()
            .direction(ratatui::layout::Direction::Horizontal)
            .constraints([Constraint::Length(board_width), Constraint::Min(18)])
            .split(area);

        frame.render_widget(Paragraph::new(self.render_board()), cols[0]);

        let accent = Color::Rgb(80, 200, 255);
        let mut side = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(" Score: {}", self.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!(" Lines: {}", self.lines), Style::default().fg(Color::Green))),
            Line::from(Span::styled(format!(" Pieces: {}", self.pieces), Style::default().fg(Color::Gray))),
            Line::from(""),
        ];
        if let Some(next) = self.bag.peek() {
            side.push(Line::from(vec![
                Span::styled(" Next: ", Style::default().fg(Color::Gray)),
                Span::styled(format!("{:?}", next), Style::default().fg(next.color()).add_modifier(Modifier::BOLD)),
            ]));
            side.push(Line::from(""));
        }
        for (key, what) in [
            ("←→", "Move"),
            ("↑ / X", "Rotate CW"),
            ("Z", "Rotate CCW"),
            ("↓", "Soft drop"),
            ("Space", "Hard drop"),
            ("P", "Pause"),
            ("R", "Restart"),
            ("Esc", "Menu"),
        ] {
            side.push(Line::from(vec![
                Span::styled(format!(" {:<7}", key), Style::default().fg(accent)),
                Span::styled(what, Style::default().fg(Color::DarkGray)),
            ]));
        }

        if self.game_over {
            side.push(Line::from(""));
            side.push(Line::from(Span::styled(
                " GAME OVER!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            side.push(Line::from(Span::styled(" ENTER to restart", Style::default().fg(Color::Gray))));
        } else if self.paused {
            side.push(Line::from(""));
            side.push(Line::from(Span::styled(
                " ⏸ PAUSED",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(170, 60, 230)))
            .title(" ▦ Tetris ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
        frame.render_widget(Paragraph::new(side).block(block), cols[1]);
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}
