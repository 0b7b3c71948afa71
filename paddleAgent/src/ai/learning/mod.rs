//! AI Learning Module
//!
//! This module contains the tabular Q-learning components used by the paddle agent.

// Public submodules
pub mod constants;
pub mod exploration;
pub mod q_table;

// Re-export main components for convenience
pub use self::exploration::ExplorationSchedule;
pub use self::q_table::{QTable, QTableIoError, Transition};
