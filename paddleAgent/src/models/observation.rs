use serde::{Deserialize, Serialize};

/// Raw continuous readings supplied by the environment each tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Left edge of the paddle, in `[0, screen_width - paddle_width]`
    pub paddle_x: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
}

impl Observation {
    pub fn new(paddle_x: f32, ball_x: f32, ball_y: f32, ball_vx: f32, ball_vy: f32) -> Self {
        Self {
            paddle_x,
            ball_x,
            ball_y,
            ball_vx,
            ball_vy,
        }
    }
}
