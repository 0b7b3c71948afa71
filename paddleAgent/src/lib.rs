// Main module declarations for the paddle agent

// Session, training and evaluation loops
pub mod core {
    pub mod session;
    pub mod training;
    pub mod evaluation;
}

// AI components
pub mod ai;

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod training_config;
}

// Environment-side types
pub mod models {
    pub mod observation;
    pub mod breakout;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
    pub mod traits;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used modules
pub use crate::ai::actions::paddle_action::PaddleAction;
pub use crate::ai::learning::q_table::{QTable, QTableIoError};
pub use crate::ai::state::encoder::StateEncoder;
pub use crate::core::session::{LearningSession, SessionMode};
pub use crate::models::observation::Observation;
