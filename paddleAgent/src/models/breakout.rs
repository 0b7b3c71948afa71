//! Headless breakout playfield
//!
//! A minimal arcade loop used to drive training without a window: one paddle
//! on the bottom edge, one ball and a grid of bricks. Physics is deliberately
//! simple (axis-aligned reflection, one brick per tick) and carries no
//! rendering or audio.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::actions::paddle_action::PaddleAction;
use crate::ai::metrics::reward::{calculate_reward, RewardContext};
use crate::config::constants::*;
use crate::models::observation::Observation;
use crate::utils::traits::{Environment, StepOutcome};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Circle/rectangle overlap using the closest point on the rectangle
    pub fn intersects_circle(&self, cx: f32, cy: f32, radius: f32) -> bool {
        let nearest_x = cx.clamp(self.x, self.x + self.width);
        let nearest_y = cy.clamp(self.y, self.y + self.height);
        let dx = cx - nearest_x;
        let dy = cy - nearest_y;
        dx * dx + dy * dy <= radius * radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    pub rect: Rect,
    pub alive: bool,
}

#[derive(Debug, Clone)]
pub struct BreakoutEnv {
    pub paddle: Rect,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub score: u32,
    steps: u32,
    max_steps: u32,
    game_over: bool,
    cleared: bool,
    rng: StdRng,
}

impl BreakoutEnv {
    pub fn new(seed: u64, max_steps: u32) -> Self {
        let mut env = Self {
            paddle: Self::initial_paddle(),
            ball: Ball {
                x: SCREEN_WIDTH / 2.0,
                y: SCREEN_HEIGHT / 2.0,
                vx: 0.0,
                vy: -BALL_LAUNCH_SPEED_Y,
                radius: BALL_RADIUS,
            },
            bricks: Vec::with_capacity(BRICK_ROWS * BRICK_COLS),
            score: 0,
            steps: 0,
            max_steps,
            game_over: false,
            cleared: false,
            rng: StdRng::seed_from_u64(seed),
        };
        env.reset();
        env
    }

    fn initial_paddle() -> Rect {
        Rect::new(
            (SCREEN_WIDTH - PADDLE_WIDTH) / 2.0,
            SCREEN_HEIGHT - PADDLE_BOTTOM_MARGIN,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        )
    }

    fn layout_bricks(&mut self) {
        let grid_width = BRICK_COLS as f32 * (BRICK_WIDTH + BRICK_SPACING) - BRICK_SPACING;
        let offset_x = ((SCREEN_WIDTH - grid_width) / 2.0).floor();

        self.bricks.clear();
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                self.bricks.push(Brick {
                    rect: Rect::new(
                        offset_x + col as f32 * (BRICK_WIDTH + BRICK_SPACING),
                        BRICK_TOP_OFFSET + row as f32 * (BRICK_HEIGHT + BRICK_SPACING),
                        BRICK_WIDTH,
                        BRICK_HEIGHT,
                    ),
                    alive: true,
                });
            }
        }
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn move_paddle(&mut self, action: PaddleAction, dt: f32) {
        self.paddle.x += action.direction() * PADDLE_SPEED * dt;
        self.paddle.x = self.paddle.x.clamp(0.0, SCREEN_WIDTH - PADDLE_WIDTH);
    }

    fn bounce_off_walls(&mut self) {
        let ball = &mut self.ball;
        if ball.x <= ball.radius {
            ball.vx = ball.vx.abs();
        } else if ball.x >= SCREEN_WIDTH - ball.radius {
            ball.vx = -ball.vx.abs();
        }
        if ball.y <= ball.radius {
            ball.vy = ball.vy.abs();
        }
    }

    fn bounce_off_paddle(&mut self) {
        let ball = &mut self.ball;
        if self.paddle.intersects_circle(ball.x, ball.y, ball.radius) {
            ball.vy = -ball.vy.abs();
            let half = self.paddle.width / 2.0;
            let hit = (ball.x - (self.paddle.x + half)) / half;
            ball.vx = PADDLE_DEFLECTION_SPEED * hit;
        }
    }

    /// Breaks at most one brick, returns whether one was hit
    fn hit_bricks(&mut self) -> bool {
        let ball = &mut self.ball;
        let Some(brick) = self
            .bricks
            .iter_mut()
            .find(|b| b.alive && b.rect.intersects_circle(ball.x, ball.y, ball.radius))
        else {
            return false;
        };

        brick.alive = false;
        self.score += BRICK_SCORE;

        let r = brick.rect;
        let dist_top = ((ball.y + ball.radius) - r.y).abs();
        let dist_bottom = ((ball.y - ball.radius) - (r.y + r.height)).abs();
        let dist_left = ((ball.x + ball.radius) - r.x).abs();
        let dist_right = ((ball.x - ball.radius) - (r.x + r.width)).abs();

        // Flip the axis whose faces are closest to the ball
        if dist_top.min(dist_bottom) < dist_left.min(dist_right) {
            ball.vy = -ball.vy;
        } else {
            ball.vx = -ball.vx;
        }
        true
    }
}

impl Environment for BreakoutEnv {
    fn reset(&mut self) {
        self.paddle = Self::initial_paddle();
        self.ball = Ball {
            x: SCREEN_WIDTH / 2.0,
            y: SCREEN_HEIGHT / 2.0,
            vx: self.rng.gen_range(-BALL_LAUNCH_SPREAD_X..=BALL_LAUNCH_SPREAD_X).round(),
            vy: -BALL_LAUNCH_SPEED_Y,
            radius: BALL_RADIUS,
        };
        self.layout_bricks();
        self.score = 0;
        self.steps = 0;
        self.game_over = false;
        self.cleared = false;
    }

    fn observe(&self) -> Observation {
        Observation::new(self.paddle.x, self.ball.x, self.ball.y, self.ball.vx, self.ball.vy)
    }

    fn step(&mut self, action: PaddleAction, dt: f32) -> StepOutcome {
        let last_score = self.score;
        self.steps += 1;

        self.move_paddle(action, dt);

        self.ball.x += self.ball.vx * dt;
        self.ball.y += self.ball.vy * dt;

        self.bounce_off_walls();
        if self.ball.y >= SCREEN_HEIGHT + self.ball.radius {
            self.game_over = true;
        }
        self.bounce_off_paddle();
        let hit_brick = self.hit_bricks();

        self.cleared = self.bricks_remaining() == 0;
        let finished = self.game_over || self.cleared;
        let truncated = !finished && self.steps >= self.max_steps;

        let reward = calculate_reward(&RewardContext {
            ball_x: self.ball.x,
            paddle_x: self.paddle.x,
            paddle_width: self.paddle.width,
            screen_width: SCREEN_WIDTH,
            score: self.score,
            last_score,
            game_over: self.game_over,
            hit_brick,
        });

        StepOutcome {
            reward,
            terminal: finished || truncated,
            truncated,
            score: self.score,
            hit_brick,
        }
    }

    fn cleared(&self) -> bool {
        self.cleared
    }
}
