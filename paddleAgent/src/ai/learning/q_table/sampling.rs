// Action selection for QTable

use rand::Rng;

use super::QTable;
use crate::ai::actions::paddle_action::{PaddleAction, N_ACTIONS};

impl QTable {
    /// Epsilon-greedy selection.
    ///
    /// With probability `epsilon` a uniformly random action is returned,
    /// otherwise the greedy action with random tie-breaking. Any epsilon is
    /// accepted: `0` is purely greedy and values above `1` always explore.
    pub fn select_action<R: Rng>(&self, state: usize, epsilon: f32, rng: &mut R) -> PaddleAction {
        let r: f32 = rng.gen();
        if r < epsilon {
            PaddleAction::from_index(rng.gen_range(0..N_ACTIONS))
        } else {
            self.best_action(state, rng).0
        }
    }
}
