// Reward module - shaping used by the reference training loop
use crate::ai::learning::constants::*;

/// What the environment reports after one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardContext {
    pub ball_x: f32,
    pub paddle_x: f32,
    pub paddle_width: f32,
    pub screen_width: f32,
    pub score: u32,
    pub last_score: u32,
    pub game_over: bool,
    pub hit_brick: bool,
}

pub fn calculate_reward(ctx: &RewardContext) -> f32 {
    if ctx.game_over {
        GAME_OVER_PENALTY
    } else if ctx.hit_brick {
        BRICK_HIT_REWARD
    } else if ctx.score > ctx.last_score {
        SCORE_INCREASE_REWARD
    } else {
        // Closer horizontal alignment between ball and paddle centre pays more
        let paddle_centre = ctx.paddle_x + ctx.paddle_width / 2.0;
        let distance = (ctx.ball_x - paddle_centre).abs();
        PROXIMITY_REWARD_MAX - distance / (ctx.screen_width / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RewardContext {
        RewardContext {
            ball_x: 400.0,
            paddle_x: 350.0,
            paddle_width: 100.0,
            screen_width: 800.0,
            score: 0,
            last_score: 0,
            game_over: false,
            hit_brick: false,
        }
    }

    #[test]
    fn test_priority_order() {
        let mut ctx = context();
        ctx.game_over = true;
        ctx.hit_brick = true;
        assert_eq!(calculate_reward(&ctx), -100.0);

        ctx.game_over = false;
        assert_eq!(calculate_reward(&ctx), 50.0);

        ctx.hit_brick = false;
        ctx.score = 10;
        assert_eq!(calculate_reward(&ctx), 10.0);
    }

    #[test]
    fn test_proximity_reward() {
        let mut ctx = context();
        assert_eq!(calculate_reward(&ctx), 1.0);
        ctx.ball_x = 0.0;
        // distance 400 over half-width 400
        assert_eq!(calculate_reward(&ctx), 0.0);
    }
}
