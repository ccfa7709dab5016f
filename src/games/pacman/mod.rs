//! Maze-chase

pub mod generator;
pub mod ghost;
pub mod maze;
pub mod player;

use std::collections::VecDeque;
use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::{Session, Simulation};
use crate::input::Command;

use ghost::Ghost;
use maze::{Cell, Maze, MAZE_COLS, MAZE_ROWS};
use player::PacMan;

/// Contact radius between the player and a chaser
pub const CATCH_DISTANCE: f32 = 0.8;

pub type PacManGame = Session<PacManSim>;

pub fn new_game(seed: u64) -> PacManGame {
    Session::new(move || PacManSim::new(seed))
}

pub struct PacManSim {
    rng: Pcg32,
    maze: Maze,
    player: PacMan,
    ghosts: Vec<Ghost>,
    control: VecDeque<Command>,
    score: u32,
    round: u32,
    game_over: bool,
    paused: bool,
}

impl PacManSim {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let maze = Maze::generate(&mut rng);
        Self {
            rng,
            maze,
            player: PacMan::new(),
            ghosts: Ghost::spawn_all(),
            control: VecDeque::new(),
            score: 0,
            round: 1,
            game_over: false,
            paused: false,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &PacMan {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn reset(&mut self) {
        self.maze = Maze::generate(&mut self.rng);
        self.player = PacMan::new();
        self.ghosts = Ghost::spawn_all();
        self.score = 0;
        self.round = 1;
        self.game_over = false;
        self.paused = false;
    }

    fn next_round(&mut self) {
        self.round += 1;
        self.maze = Maze::generate(&mut self.rng);
        self.player = PacMan::new();
        self.ghosts = Ghost::spawn_all();
        log::info!("PacMan maze cleared, starting round {} at score {}", self.round, self.score);
    }

    /// Returns true when the command restarted the game.
    fn apply_control(&mut self, command: Command) -> bool {
        match command {
            Command::PauseToggle if !self.game_over => self.paused = !self.paused,
            Command::Restart => self.reset(),
            Command::Confirm if self.game_over => self.reset(),
            _ => return false,
        }
        matches!(command, Command::Restart | Command::Confirm)
    }

    fn step(&mut self) {
        self.score += self.player.update(&mut self.maze);
        if self.maze.pellets_remaining() == 0 {
            self.next_round();
            return;
        }

        let target = (self.player.x, self.player.y);
        for ghost in &mut self.ghosts {
            ghost.update(&self.maze, target);
            if ghost.distance_to(target.0, target.1) < CATCH_DISTANCE {
                self.game_over = true;
            }
        }
        if self.game_over {
            log::info!("PacMan caught: score {}, round {}", self.score, self.round);
        }
    }

    /// Color of one maze cell with entities drawn over it.
    fn cell_color(&self, x: usize, y: usize) -> Color {
        let here = |(cx, cy): (i32, i32)| cx == x as i32 && cy == y as i32;
        if here(self.player.cell()) {
            return Color::Rgb(255, 230, 0);
        }
        if let Some(g) = self.ghosts.iter().find(|g| here(g.cell())) {
            return g.color;
        }
        match self.maze.cell(x as i32, y as i32) {
            Some(Cell::Wall) => Color::Rgb(33, 33, 222),
            Some(Cell::Pellet) => Color::Rgb(90, 75, 60),
            Some(Cell::PowerPellet) => Color::Rgb(255, 184, 151),
            Some(Cell::Den) => Color::Rgb(25, 15, 35),
            Some(Cell::Open) | None => Color::Rgb(5, 5, 15),
        }
    }

    /// Two maze rows per terminal line using upper half blocks.
    fn render_field(&self) -> Vec<Line<'static>> {
        let background = Color::Rgb(5, 5, 15);
        (0..MAZE_ROWS.div_ceil(2))
            .map(|line| {
                let top = line * 2;
                let bottom = top + 1;
                let spans: Vec<Span> = (0..MAZE_COLS)
                    .map(|x| {
                        let fg = self.cell_color(x, top);
                        let bg = if bottom < MAZE_ROWS { self.cell_color(x, bottom) } else { background };
                        Span::styled("▀", Style::default().fg(fg).bg(bg))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Simulation for PacManSim {
    const TITLE: &'static str = "PacMan";
    const MIN_WIDTH: u16 = MAZE_COLS as u16 + 2;
    const MIN_HEIGHT: u16 = MAZE_ROWS.div_ceil(2) as u16 + 4;

    fn update(&mut self, _dt: Duration) {
        let mut restarted = false;
        while let Some(command) = self.control.pop_front() {
            restarted |= self.apply_control(command);
        }
        // a fresh game waits one tick before moving
        if restarted || self.game_over || self.paused {
            return;
        }
        self.step();
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Move(dir) => {
                if !self.paused && !self.game_over {
                    self.player.queue_turn(dir);
                }
            }
            Command::PauseToggle | Command::Restart | Command::Confirm => self.control.push_back(command),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(33, 33, 222)))
            .title(" ᗧ PacMan ")
            .title_style(Style::default().fg(Color::Rgb(255, 230, 0)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let status = Line::from(vec![
            Span::styled(
                format!(" Score: {} ", self.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("│", Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" Round: {} ", self.round), Style::default().fg(Color::Cyan)),
            Span::styled("│", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!(" Pellets: {} ", self.maze.pellets_remaining()),
                Style::default().fg(Color::Rgb(255, 184, 151)),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let field = Paragraph::new(self.render_field()).alignment(Alignment::Center);
        frame.render_widget(field, chunks[1]);

        let help = if self.game_over {
            Line::from(vec![
                Span::styled(" CAUGHT! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled("ENTER to restart  Esc: Menu", Style::default().fg(Color::Gray)),
            ])
        } else if self.paused {
            Line::from(Span::styled(
                " ⏸ PAUSED  P: Resume",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                " ←↑↓→: Move  P: Pause  R: Restart  Esc: Menu",
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(help), chunks[2]);
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}
