// Core operations for QTable

use rand::Rng;

use super::QTable;
use crate::ai::actions::paddle_action::{PaddleAction, N_ACTIONS};

impl QTable {
    /// Zero-filled table with `n_states` rows
    pub fn new(n_states: usize) -> Self {
        Self {
            n_states,
            values: vec![0.0; n_states * N_ACTIONS],
        }
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn n_actions(&self) -> usize {
        N_ACTIONS
    }

    #[inline]
    fn offset(&self, state: usize, action: usize) -> usize {
        assert!(state < self.n_states, "state {} out of range (n_states = {})", state, self.n_states);
        debug_assert!(action < N_ACTIONS);
        state * N_ACTIONS + action
    }

    pub fn get(&self, state: usize, action: PaddleAction) -> f32 {
        self.values[self.offset(state, action.index())]
    }

    /// Overwrite a single entry
    pub fn update(&mut self, state: usize, action: PaddleAction, new_value: f32) {
        let offset = self.offset(state, action.index());
        self.values[offset] = new_value;
    }

    /// All action values for one state, indexed by [`PaddleAction::index`]
    pub fn row(&self, state: usize) -> &[f32] {
        let start = self.offset(state, 0);
        &self.values[start..start + N_ACTIONS]
    }

    /// Largest action value for `state`. Only the value is needed, so ties do not matter.
    pub fn max_value(&self, state: usize) -> f32 {
        self.row(state).iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Greedy action for `state` and its value.
    ///
    /// When several actions share the maximum the winner is drawn uniformly
    /// among them, so an all-zero row does not always resolve to `MoveLeft`.
    pub fn best_action<R: Rng>(&self, state: usize, rng: &mut R) -> (PaddleAction, f32) {
        let row = self.row(state);
        let best = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mut tied = [0usize; N_ACTIONS];
        let mut tied_count = 0;
        for (action, &value) in row.iter().enumerate() {
            if value == best {
                tied[tied_count] = action;
                tied_count += 1;
            }
        }

        // A row made only of NaN has no maximum; fall back to any action
        if tied_count == 0 {
            let action = rng.gen_range(0..N_ACTIONS);
            return (PaddleAction::from_index(action), row[action]);
        }

        let pick = if tied_count == 1 { tied[0] } else { tied[rng.gen_range(0..tied_count)] };
        (PaddleAction::from_index(pick), best)
    }

    /// Flat row-major view of every value
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub(crate) fn replace_values(&mut self, values: Vec<f32>) {
        debug_assert_eq!(values.len(), self.values.len());
        self.values = values;
    }
}
