//! Brick-breaker

pub mod entities;

use std::collections::VecDeque;
use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::{Session, Simulation};
use crate::input::{Command, Direction, HeldKeys};

use entities::*;

/// Share of the paddle-relative hit offset turned into horizontal speed
pub const ENGLISH: f32 = 0.15;

pub type Breakout = Session<BreakoutSim>;

pub fn new_game(seed: u64) -> Breakout {
    Session::new(move || BreakoutSim::new(seed))
}

pub struct BreakoutSim {
    rng: Pcg32,
    paddle: Paddle,
    ball: Ball,
    bricks: Vec<Brick>,
    held: HeldKeys,
    pointer: Option<f32>,
    control: VecDeque<Command>,
    score: u32,
    round: u32,
    game_over: bool,
    paused: bool,
}

impl BreakoutSim {
    pub fn new(seed: u64) -> Self {
        let mut b = Self {
            rng: Pcg32::seed_from_u64(seed),
            paddle: Paddle::default(),
            ball: Ball::default(),
            bricks: Vec::new(),
            held: HeldKeys::default(),
            pointer: None,
            control: VecDeque::new(),
            score: 0,
            round: 1,
            game_over: false,
            paused: false,
        };
        b.serve();
        b
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Rebuild the field and launch a fresh ball.
    fn serve(&mut self) {
        self.bricks = brick_wall();
        self.paddle = Paddle::default();
        self.ball.reset(SERVE.0, SERVE.1);
        self.ball.launch(&mut self.rng);
    }

    fn restart(&mut self) {
        self.score = 0;
        self.round = 1;
        self.game_over = false;
        self.paused = false;
        self.held.clear();
        self.pointer = None;
        self.serve();
    }

    fn apply_control(&mut self, command: Command) {
        match command {
            Command::PauseToggle if !self.game_over => {
                self.paused = !self.paused;
                self.held.clear();
            }
            Command::Restart => self.restart(),
            Command::Confirm | Command::HardDrop if self.game_over => self.restart(),
            _ => {}
        }
    }

    fn steer(&mut self) {
        if self.held.is_held(Direction::Left) {
            self.paddle.move_by(-PADDLE_SPEED);
        }
        if self.held.is_held(Direction::Right) {
            self.paddle.move_by(PADDLE_SPEED);
        }
        if let Some(fraction) = self.pointer.take() {
            self.paddle.set_center(fraction * STAGE_WIDTH);
        }
    }

    /// Advance the ball one tick and resolve collisions.
    fn step(&mut self) {
        let ball = &mut self.ball;
        ball.step();

        // Wall collisions
        if ball.x - BALL_RADIUS < 0.0 {
            ball.x = BALL_RADIUS;
            ball.vx = -ball.vx;
        } else if ball.x + BALL_RADIUS > STAGE_WIDTH {
            ball.x = STAGE_WIDTH - BALL_RADIUS;
            ball.vx = -ball.vx;
        }
        if ball.y - BALL_RADIUS < 0.0 {
            ball.y = BALL_RADIUS;
            ball.vy = -ball.vy;
        } else if ball.y + BALL_RADIUS > STAGE_HEIGHT {
            self.game_over = true;
            log::info!("Breakout game over: score {}, round {}", self.score, self.round);
            return;
        }

        // Paddle
        let p = &self.paddle;
        if ball.y + BALL_RADIUS >= p.top()
            && ball.y - BALL_RADIUS <= p.bottom()
            && ball.x >= p.left()
            && ball.x <= p.right()
        {
            ball.y = p.top() - BALL_RADIUS;
            ball.vy = -ball.vy;
            ball.vx = (ball.x - p.x) * ENGLISH;
        }

        // At most one brick per tick
        if let Some(brick) = self.bricks.iter_mut().rev().find(|b| b.alive && b.overlaps(ball)) {
            brick.alive = false;
            ball.vy = -ball.vy;
            self.score += BRICK_POINTS;
        }

        if self.bricks_left() == 0 {
            self.round += 1;
            log::info!("Breakout wall cleared, round {} at score {}", self.round, self.score);
            self.serve();
        }
    }

    /// Rasterize the stage into `width` x `height*2` color samples, two per
    /// terminal cell.
    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let background = Color::Rgb(10, 10, 20);
        let rows = height * 2;
        let sx = width as f32 / STAGE_WIDTH;
        let sy = rows as f32 / STAGE_HEIGHT;
        let mut grid = vec![vec![background; width]; rows];

        let mut fill = |x0: f32, y0: f32, x1: f32, y1: f32, color: Color| {
            let cx0 = (x0 * sx) as usize;
            let cx1 = ((x1 * sx) as usize).max(cx0 + 1).min(width);
            let cy0 = (y0 * sy) as usize;
            let cy1 = ((y1 * sy) as usize).max(cy0 + 1).min(rows);
            for row in grid.iter_mut().take(cy1).skip(cy0) {
                for cell in row.iter_mut().take(cx1).skip(cx0) {
                    *cell = color;
                }
            }
        };

        for brick in self.bricks.iter().filter(|b| b.alive) {
            // Leave a one-sample gap between neighbours
            fill(brick.x, brick.y, brick.x + BRICK_WIDTH - 1.0 / sx, brick.y + BRICK_HEIGHT, brick.color);
        }
        let p = &self.paddle;
        fill(p.left(), p.top(), p.right(), p.bottom(), Color::Rgb(0, 255, 0));
        let b = &self.ball;
        fill(b.x, b.y, b.x, b.y, Color::Rgb(255, 255, 255));

        (0..height)
            .map(|line| {
                let spans: Vec<Span<'static>> = (0..width)
                    .map(|x| {
                        let style = Style::default().fg(grid[line * 2][x]).bg(grid[line * 2 + 1][x]);
                        Span::styled("▀", style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Simulation for BreakoutSim {
    const TITLE: &'static str = "Breakout";
    const MIN_WIDTH: u16 = 30;
    const MIN_HEIGHT: u16 = 12;

    fn update(&mut self, dt: Duration) {
        while let Some(command) = self.control.pop_front() {
            self.apply_control(command);
        }
        if self.game_over || self.paused {
            return;
        }
        self.steer();
        self.held.decay(dt);
        self.step();
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Release(dir) => self.held.release(dir),
            Command::Move(dir @ (Direction::Left | Direction::Right)) => {
                if !self.paused && !self.game_over {
                    self.held.press(dir);
                }
            }
            Command::PointerX(fraction) => {
                if !self.paused && !self.game_over {
                    self.pointer = Some(fraction);
                }
            }
            Command::PauseToggle | Command::Restart | Command::Confirm | Command::HardDrop => {
                self.control.push_back(command)
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(220, 80, 80)))
            .title(" 🧱 Breakout ")
            .title_style(Style::default().fg(Color::Rgb(255, 100, 100)).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(8), Constraint::Length(1)])
            .split(inner);

        // Status bar
        let status = Line::from(vec![
            Span::styled(
                format!(" Score: {} ", self.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("Round: {} ", self.round), Style::default().fg(Color::Cyan)),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Bricks: {}/{} ", self.bricks_left(), BRICK_ROWS * BRICK_COLS),
                Style::default().fg(Color::Green),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        // Game field
        let lines = self.render_field(chunks[1].width as usize, chunks[1].height as usize);
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        // Help bar
        let sep = Style::default().fg(Color::Rgb(60, 60, 60));
        let help = if self.game_over {
            Line::from(vec![
                Span::styled(" 💀 GAME OVER! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled("Press ENTER to restart, Esc for menu", Style::default().fg(Color::Gray)),
            ])
        } else if self.paused {
            Line::from(Span::styled(
                " ⏸ PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(" ←→/Mouse Move Paddle ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", sep),
                Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", sep),
                Span::styled("R Restart ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", sep),
                Span::styled("Esc Menu", Style::default().fg(Color::DarkGray)),
            ])
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

#[cfg(test)]
mod tests {
    use super::*;

    const DT: Duration = Duration::from_millis(16);

    fn sim() -> BreakoutSim {
        BreakoutSim::new(9)
    }

    fn place_ball(s: &mut BreakoutSim, x: f32, y: f32, vx: f32, vy: f32) {
        s.ball.x = x;
        s.ball.y = y;
        s.ball.vx = vx;
        s.ball.vy = vy;
    }

    #[test]
    fn test_center_hit_goes_straight_up() {
        let mut s = sim();
        let px = s.paddle.x;
        place_ball(&mut s, px, 730.0, 0.0, BALL_SPEED);
        s.update(DT);
        assert_eq!(s.ball.vx, 0.0);
        assert!(s.ball.vy < 0.0);
        assert_eq!(s.ball.y, s.paddle.top() - BALL_RADIUS);
    }

    #[test]
    fn test_right_side_hit_deflects_right() {
        let mut s = sim();
        let px = s.paddle.x;
        place_ball(&mut s, px + 40.0, 730.0, 0.0, BALL_SPEED);
        s.update(DT);
        assert!(s.ball.vx > 0.0);
        assert!((s.ball.vx - 40.0 * ENGLISH).abs() < 1e-4);
    }

    #[test]
    fn test_hit_on_paddle_right_edge_counts() {
        let mut s = sim();
        let edge = s.paddle.x + PADDLE_WIDTH / 2.0;
        place_ball(&mut s, edge, 730.0, 0.0, BALL_SPEED);
        s.update(DT);
        assert!(s.ball.vy < 0.0);
        assert!((s.ball.vx - PADDLE_WIDTH / 2.0 * ENGLISH).abs() < 1e-4);
    }

    #[test]
    fn test_bottom_edge_ends_game() {
        let mut s = sim();
        place_ball(&mut s, 50.0, 790.0, 0.0, BALL_SPEED);
        s.update(DT);
        assert!(s.is_game_over());

        // frozen, then restart
        let ball = s.ball.clone();
        s.update(DT);
        assert_eq!(s.ball, ball);
        s.handle_command(Command::Confirm);
        s.update(DT);
        assert!(!s.is_game_over());
        assert_eq!(s.bricks_left(), 40);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_side_walls_reflect_and_clamp() {
        let mut s = sim();
        place_ball(&mut s, 5.0, 400.0, -BALL_SPEED, 0.0);
        s.update(DT);
        assert_eq!(s.ball.x, BALL_RADIUS);
        assert_eq!(s.ball.vx, BALL_SPEED);

        place_ball(&mut s, 300.0, 4.0, 0.0, -BALL_SPEED);
        s.update(DT);
        assert_eq!(s.ball.y, BALL_RADIUS);
        assert_eq!(s.ball.vy, BALL_SPEED);
    }

    #[test]
    fn test_one_brick_per_tick() {
        let mut s = sim();
        // straddles the gap between the first two bricks of the top row
        place_ball(&mut s, 100.0, 60.0, 0.0, 0.0);
        s.update(DT);
        assert_eq!(s.bricks_left(), 39);
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn test_last_brick_resets_round_and_keeps_score() {
        let mut s = sim();
        s.score = 390;
        for brick in s.bricks.iter_mut().skip(1) {
            brick.alive = false;
        }
        let first = s.bricks[0].clone();
        place_ball(&mut s, first.x + 30.0, first.y + 10.0, 0.0, 0.0);
        s.update(DT);

        assert_eq!(s.score(), 400);
        assert_eq!(s.round(), 2);
        assert_eq!(s.bricks_left(), 40);
        assert_eq!((s.ball.x, s.ball.y), SERVE);
        assert_eq!(s.ball.vy, -BALL_SPEED);
        assert_eq!(s.ball.vx.abs(), BALL_SPEED);
    }

    #[test]
    fn test_held_key_moves_paddle_until_released() {
        let mut s = sim();
        place_ball(&mut s, 300.0, 400.0, 0.0, 0.0);
        let x0 = s.paddle.x;
        s.handle_command(Command::Move(Direction::Left));
        s.update(DT);
        assert_eq!(s.paddle.x, x0 - PADDLE_SPEED);
        s.update(DT);
        assert_eq!(s.paddle.x, x0 - 2.0 * PADDLE_SPEED);

        s.handle_command(Command::Release(Direction::Left));
        s.update(DT);
        assert_eq!(s.paddle.x, x0 - 2.0 * PADDLE_SPEED);
    }

    #[test]
    fn test_held_key_expires_without_release() {
        let mut s = sim();
        place_ball(&mut s, 300.0, 400.0, 0.0, 0.0);
        s.handle_command(Command::Move(Direction::Right));
        for _ in 0..20 {
            s.update(DT);
        }
        let x = s.paddle.x;
        s.update(DT);
        assert_eq!(s.paddle.x, x);
    }

    #[test]
    fn test_pointer_sets_center_clamped() {
        let mut s = sim();
        place_ball(&mut s, 300.0, 400.0, 0.0, 0.0);
        s.handle_command(Command::PointerX(0.0));
        s.update(DT);
        assert_eq!(s.paddle.left(), 0.0);
        s.handle_command(Command::PointerX(0.5));
        s.update(DT);
        assert_eq!(s.paddle.x, 300.0);
    }

    #[test]
    fn test_pause_freezes_ball() {
        let mut s = sim();
        s.handle_command(Command::PauseToggle);
        s.update(DT);
        let ball = s.ball.clone();
        s.handle_command(Command::Move(Direction::Left));
        for _ in 0..5 {
            s.update(DT);
        }
        assert!(s.is_paused());
        assert_eq!(s.ball, ball);
        assert_eq!(s.paddle.x, STAGE_WIDTH / 2.0);
    }
}
