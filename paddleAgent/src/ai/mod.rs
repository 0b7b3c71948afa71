// AI module structure for the paddle agent
// Organized in sub-modules for better maintainability

// Actions module - contains the paddle action definition
pub mod actions {
    pub mod paddle_action;
}

// State module - discretizes observations into table rows
pub mod state {
    pub mod encoder;
}

// Metrics module - contains reward shaping and episode metrics
pub mod metrics {
    pub mod reward;
    pub mod episode_metrics;
}

// Learning module - contains the tabular Q-learning components
pub mod learning;

// Re-export common types for convenience
pub use actions::paddle_action::{PaddleAction, N_ACTIONS};
pub use learning::q_table::QTable;
pub use metrics::episode_metrics::{EpisodeRecord, TrainingSummary};
pub use metrics::reward::{calculate_reward, RewardContext};
pub use state::encoder::StateEncoder;
