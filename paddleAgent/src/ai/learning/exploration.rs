use serde::{Deserialize, Serialize};

use crate::ai::learning::constants::{DEFAULT_EXPLORATION_RATE, EXPLORATION_DECAY, MIN_EXPLORATION_RATE};

/// Multiplicative epsilon decay toward a floor, applied once per training episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplorationSchedule {
    pub epsilon: f32,
    pub decay: f32,
    pub floor: f32,
}

impl ExplorationSchedule {
    pub fn new(epsilon: f32, decay: f32, floor: f32) -> Self {
        Self { epsilon, decay, floor }
    }

    /// Shrinks epsilon by `decay` while it is still above the floor.
    /// The last step may land slightly below the floor.
    pub fn decay(&mut self) {
        if self.epsilon > self.floor {
            self.epsilon *= self.decay;
        }
    }
}

impl Default for ExplorationSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORATION_RATE, EXPLORATION_DECAY, MIN_EXPLORATION_RATE)
    }
}
