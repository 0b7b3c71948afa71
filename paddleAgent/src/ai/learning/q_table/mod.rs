//! Q-Table Module
//!
//! This module provides the tabular value store for the paddle agent.
//! It contains the QTable struct and its implementation, divided into
//! logical submodules based on functionality.

pub mod core;
pub mod sampling;
pub mod learning;
pub mod serialization;
pub mod diagnostics;

use crate::ai::actions::paddle_action::PaddleAction;

/// Dense `n_states x N_ACTIONS` table of action values.
///
/// Rows are stored back to back in one flat buffer, so the value for
/// `(state, action)` lives at `state * N_ACTIONS + action`. Every entry
/// starts at zero. Indexing outside the declared shape is a contract
/// violation and panics.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    /// Number of rows (distinct encoded states)
    n_states: usize,

    /// Row-major values, `n_states * N_ACTIONS` long
    values: Vec<f32>,
}

/// One observed step, consumed by the temporal-difference update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: usize,
    pub action: PaddleAction,
    pub reward: f32,
    pub next_state: usize,
}

#[derive(Debug)]
pub enum QTableIoError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// The file ended before the header or the full body was read
    Truncated { expected_bytes: usize, found_bytes: usize },
    /// Header shape differs from the table being loaded into
    ShapeMismatch {
        expected: (usize, usize),
        found: (i32, i32),
    },
}

impl From<std::io::Error> for QTableIoError {
    fn from(err: std::io::Error) -> Self {
        QTableIoError::Io(err)
    }
}

impl From<csv::Error> for QTableIoError {
    fn from(err: csv::Error) -> Self {
        QTableIoError::Csv(err)
    }
}

impl std::fmt::Display for QTableIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QTableIoError::Io(e) => write!(f, "IO error: {}", e),
            QTableIoError::Csv(e) => write!(f, "CSV error: {}", e),
            QTableIoError::Truncated { expected_bytes, found_bytes } => write!(
                f,
                "Truncated Q-table file: expected {} bytes, found {}",
                expected_bytes, found_bytes
            ),
            QTableIoError::ShapeMismatch { expected, found } => write!(
                f,
                "Q-table shape mismatch: expected {} states x {} actions, file has {} x {}",
                expected.0, expected.1, found.0, found.1
            ),
        }
    }
}

impl std::error::Error for QTableIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QTableIoError::Io(e) => Some(e),
            QTableIoError::Csv(e) => Some(e),
            _ => None,
        }
    }
}
