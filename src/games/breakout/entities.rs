use rand::Rng;
use ratatui::style::Color;

pub const STAGE_WIDTH: f32 = 600.0;
pub const STAGE_HEIGHT: f32 = 800.0;

pub const PADDLE_WIDTH: f32 = 100.0;
pub const PADDLE_HEIGHT: f32 = 20.0;
pub const PADDLE_SPEED: f32 = 7.0;
pub const PADDLE_Y: f32 = STAGE_HEIGHT - 50.0;

pub const BALL_RADIUS: f32 = 8.0;
pub const BALL_SPEED: f32 = 5.0;
pub const SERVE: (f32, f32) = (STAGE_WIDTH / 2.0, STAGE_HEIGHT - 70.0);

pub const BRICK_ROWS: usize = 5;
pub const BRICK_COLS: usize = 8;
pub const BRICK_WIDTH: f32 = 60.0;
pub const BRICK_HEIGHT: f32 = 20.0;
pub const BRICK_PADDING: f32 = 10.0;
pub const BRICK_OFFSET_TOP: f32 = 50.0;
pub const BRICK_OFFSET_LEFT: f32 = 35.0;
pub const BRICK_POINTS: u32 = 10;

const ROW_COLORS: [Color; BRICK_ROWS] = [
    Color::Rgb(220, 50, 50),
    Color::Rgb(220, 130, 30),
    Color::Rgb(220, 200, 30),
    Color::Rgb(50, 200, 50),
    Color::Rgb(50, 130, 220),
];

/// Paddle, positioned by its center.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: STAGE_WIDTH / 2.0,
            y: PADDLE_Y,
        }
    }
}

impl Paddle {
    pub fn left(&self) -> f32 {
        self.x - PADDLE_WIDTH / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + PADDLE_WIDTH / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - PADDLE_HEIGHT / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + PADDLE_HEIGHT / 2.0
    }

    /// Center the paddle on `x`, keeping it fully on stage.
    pub fn set_center(&mut self, x: f32) {
        self.x = x.clamp(PADDLE_WIDTH / 2.0, STAGE_WIDTH - PADDLE_WIDTH / 2.0);
    }

    pub fn move_by(&mut self, dx: f32) {
        self.set_center(self.x + dx);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub speed: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            x: SERVE.0,
            y: SERVE.1,
            vx: 0.0,
            vy: 0.0,
            speed: BALL_SPEED,
        }
    }
}

impl Ball {
    /// Park at (x, y) with no velocity.
    pub fn reset(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.vx = 0.0;
        self.vy = 0.0;
    }

    /// Upward at 45 degrees, horizontal side picked at random.
    pub fn launch<R: Rng>(&mut self, rng: &mut R) {
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.vx = self.speed * side;
        self.vy = -self.speed;
    }

    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
    pub color: Color,
}

impl Brick {
    /// Axis-aligned overlap with the ball's bounding box.
    pub fn overlaps(&self, ball: &Ball) -> bool {
        ball.x + BALL_RADIUS > self.x
            && ball.x - BALL_RADIUS < self.x + BRICK_WIDTH
            && ball.y + BALL_RADIUS > self.y
            && ball.y - BALL_RADIUS < self.y + BRICK_HEIGHT
    }
}

/// Full wall, row-major from the top left.
pub fn brick_wall() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLS {
            bricks.push(Brick {
                x: BRICK_OFFSET_LEFT + col as f32 * (BRICK_WIDTH + BRICK_PADDING),
                y: BRICK_OFFSET_TOP + row as f32 * (BRICK_HEIGHT + BRICK_PADDING),
                alive: true,
                color: ROW_COLORS[row],
            });
        }
    }
    bricks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wall_layout_fits_stage() {
        let bricks = brick_wall();
        assert_eq!(bricks.len(), 40);
        assert_eq!((bricks[0].x, bricks[0].y), (35.0, 50.0));
        let last = &bricks[39];
        assert_eq!((last.x, last.y), (525.0, 170.0));
        assert!(last.x + BRICK_WIDTH <= STAGE_WIDTH);
    }

    #[test]
    fn test_paddle_clamped_to_stage() {
        let mut paddle = Paddle::default();
        paddle.move_by(-1000.0);
        assert_eq!(paddle.left(), 0.0);
        paddle.set_center(10_000.0);
        assert_eq!(paddle.right(), STAGE_WIDTH);
    }

    #[test]
    fn test_launch_is_diagonal_up() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..20 {
            let mut ball = Ball::default();
            ball.launch(&mut rng);
            assert_eq!(ball.vx.abs(), BALL_SPEED);
            assert_eq!(ball.vy, -BALL_SPEED);
        }
    }

    #[test]
    fn test_overlap_is_strict() {
        let brick = &brick_wall()[0];
        let mut ball = Ball::default();
        ball.reset(brick.x - BALL_RADIUS, brick.y + 5.0);
        assert!(!brick.overlaps(&ball));
        ball.x += 0.5;
        assert!(brick.overlaps(&ball));
    }
}
