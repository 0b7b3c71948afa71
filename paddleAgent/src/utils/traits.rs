// Seam between the learning session and whatever simulates the playfield

use crate::ai::actions::paddle_action::PaddleAction;
use crate::models::observation::Observation;

/// Result of advancing the environment by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub reward: f32,
    /// The episode ended on this tick (ball lost, board cleared or step cap hit)
    pub terminal: bool,
    /// Ended only because the step cap was reached; the last state is not absorbing
    pub truncated: bool,
    pub score: u32,
    pub hit_brick: bool,
}

pub trait Environment {
    /// Start a new episode
    fn reset(&mut self);

    /// Current continuous readings
    fn observe(&self) -> Observation;

    /// Apply `action` for `dt` seconds and advance the simulation
    fn step(&mut self, action: PaddleAction, dt: f32) -> StepOutcome;

    /// Whether the last terminal step was a win (board cleared)
    fn cleared(&self) -> bool {
        false
    }
}
