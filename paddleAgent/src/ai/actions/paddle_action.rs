// Paddle Action module - contains the PaddleAction enum definition
use serde::{Deserialize, Serialize};

/// Number of discrete actions available to the agent
pub const N_ACTIONS: usize = 3;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PaddleAction {
    MoveLeft,
    Stay,
    MoveRight,
}

impl PaddleAction {
    pub const ALL: [PaddleAction; N_ACTIONS] = [PaddleAction::MoveLeft, PaddleAction::Stay, PaddleAction::MoveRight];

    /// Column index of this action in the Q-table
    pub fn index(self) -> usize {
        match self {
            PaddleAction::MoveLeft => 0,
            PaddleAction::Stay => 1,
            PaddleAction::MoveRight => 2,
        }
    }

    /// Inverse of [`PaddleAction::index`]. Panics on an index outside the action space.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }

    /// Horizontal direction of travel (-1, 0 or +1)
    pub fn direction(self) -> f32 {
        match self {
            PaddleAction::MoveLeft => -1.0,
            PaddleAction::Stay => 0.0,
            PaddleAction::MoveRight => 1.0,
        }
    }
}

impl std::fmt::Display for PaddleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaddleAction::MoveLeft => write!(f, "Left"),
            PaddleAction::Stay => write!(f, "Stay"),
            PaddleAction::MoveRight => write!(f, "Right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, action) in PaddleAction::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(PaddleAction::from_index(i), *action);
        }
    }

    #[test]
    #[should_panic]
    fn test_from_index_out_of_range_panics() {
        let _ = PaddleAction::from_index(N_ACTIONS);
    }
}
