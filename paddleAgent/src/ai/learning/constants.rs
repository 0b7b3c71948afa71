// Constants module for AI learning components
// Defaults used by the Q-table, the selector and the training loop

//---------------------------------------------------------------------
// Temporal-Difference Parameters
//---------------------------------------------------------------------
pub const DEFAULT_LEARNING_RATE: f32 = 0.1;
pub const DEFAULT_DISCOUNT_FACTOR: f32 = 0.95;

//---------------------------------------------------------------------
// Exploration Parameters
//---------------------------------------------------------------------
pub const DEFAULT_EXPLORATION_RATE: f32 = 0.1;
pub const EXPLORATION_DECAY: f32 = 0.995;
pub const MIN_EXPLORATION_RATE: f32 = 0.01;

//---------------------------------------------------------------------
// Reward Shaping
//---------------------------------------------------------------------
pub const GAME_OVER_PENALTY: f32 = -100.0;
pub const BRICK_HIT_REWARD: f32 = 50.0;
pub const SCORE_INCREASE_REWARD: f32 = 10.0;
pub const PROXIMITY_REWARD_MAX: f32 = 1.0;

//---------------------------------------------------------------------
// Training Loop
//---------------------------------------------------------------------
pub const DEFAULT_EPISODES: usize = 5_000;
pub const DEFAULT_REPORT_INTERVAL: usize = 100;
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 500;
pub const DEFAULT_EVALUATION_EPISODES: usize = 100;

//---------------------------------------------------------------------
// Persistence
//---------------------------------------------------------------------
/// Two little-endian i32 values: state count, action count
pub const QTABLE_HEADER_BYTES: usize = 8;
pub const QTABLE_VALUE_BYTES: usize = 4;
pub const ACTION_COLUMN_NAMES: [&str; 3] = ["Left", "Stay", "Right"];
