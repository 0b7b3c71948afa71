// Diagnostic and debugging functions for QTable

use tracing::info;

use super::QTable;

impl QTable {
    /// Number of states with at least one non-zero entry
    pub fn visited_states(&self) -> usize {
        (0..self.n_states())
            .filter(|&state| self.row(state).iter().any(|&v| v != 0.0))
            .count()
    }

    /// Smallest and largest finite value in the table, `None` if there are none
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.values()
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// The `n` states whose best action value is highest, best first
    pub fn top_states(&self, n: usize) -> Vec<(usize, f32)> {
        let mut states: Vec<(usize, f32)> = (0..self.n_states())
            .map(|state| (state, self.max_value(state)))
            .filter(|(_, v)| v.is_finite())
            .collect();
        states.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        states.truncate(n);
        states
    }

    pub fn log_summary(&self) {
        let visited = self.visited_states();
        let coverage = visited as f64 / self.n_states().max(1) as f64 * 100.0;
        match self.value_range() {
            Some((lo, hi)) => info!(
                states = self.n_states(),
                visited,
                "Q-table coverage {:.1}%, values in [{:.3}, {:.3}]",
                coverage,
                lo,
                hi
            ),
            None => info!(states = self.n_states(), visited, "Q-table coverage {:.1}%", coverage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::actions::paddle_action::PaddleAction;

    #[test]
    fn test_fresh_table_diagnostics() {
        let table = QTable::new(5);
        assert_eq!(table.visited_states(), 0);
        assert_eq!(table.value_range(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_visited_and_range() {
        let mut table = QTable::new(5);
        table.update(1, PaddleAction::Stay, -2.0);
        table.update(3, PaddleAction::MoveLeft, 4.0);
        table.update(3, PaddleAction::MoveRight, 1.0);
        assert_eq!(table.visited_states(), 2);
        assert_eq!(table.value_range(), Some((-2.0, 4.0)));
    }

    #[test]
    fn test_top_states_order() {
        let mut table = QTable::new(4);
        table.update(0, PaddleAction::Stay, 1.0);
        table.update(2, PaddleAction::MoveLeft, 9.0);
        table.update(3, PaddleAction::MoveRight, 5.0);
        let top = table.top_states(2);
        assert_eq!(top, vec![(2, 9.0), (3, 5.0)]);
    }
}
