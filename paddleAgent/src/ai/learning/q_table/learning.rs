//! Learning module for QTable
//!
//! Temporal-difference (Q-learning) updates. `alpha` and `gamma` are trusted
//! session constants and are not validated.

use super::{QTable, Transition};
use crate::ai::actions::paddle_action::PaddleAction;

impl QTable {
    /// Q(s,a) += alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))
    ///
    /// Returns the value written for `(state, action)`.
    pub fn q_learning_update(&mut self, transition: &Transition, alpha: f32, gamma: f32) -> f32 {
        let max_next = self.max_value(transition.next_state);
        let target = transition.reward + gamma * max_next;
        self.move_toward(transition.state, transition.action, target, alpha)
    }

    /// Update for the last step of an episode: there is no successor state to
    /// bootstrap from, so the target is the reward alone.
    pub fn terminal_update(&mut self, state: usize, action: PaddleAction, reward: f32, alpha: f32) -> f32 {
        self.move_toward(state, action, reward, alpha)
    }

    fn move_toward(&mut self, state: usize, action: PaddleAction, target: f32, alpha: f32) -> f32 {
        let current = self.get(state, action);
        let updated = current + alpha * (target - current);
        self.update(state, action, updated);
        updated
    }
}
