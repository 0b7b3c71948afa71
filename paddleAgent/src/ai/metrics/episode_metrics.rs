// Episode Metrics module - contains the EpisodeRecord and TrainingSummary structs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub score: u32,
    pub steps: u32,
    pub total_reward: f32,
    pub epsilon: f32,
    pub cleared: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub total_steps: u64,
    pub mean_score: f64,
    pub best_score: u32,
    pub final_epsilon: f32,
    pub visited_states: usize,
    pub checkpoints_written: usize,
}

impl TrainingSummary {
    pub fn from_records(records: &[EpisodeRecord], final_epsilon: f32, visited_states: usize) -> Self {
        let episodes = records.len();
        let total_steps = records.iter().map(|r| r.steps as u64).sum();
        let mean_score = if episodes == 0 {
            0.0
        } else {
            records.iter().map(|r| r.score as f64).sum::<f64>() / episodes as f64
        };
        let best_score = records.iter().map(|r| r.score).max().unwrap_or(0);
        Self {
            episodes,
            total_steps,
            mean_score,
            best_score,
            final_epsilon,
            visited_states,
            checkpoints_written: 0,
        }
    }
}

/// Mean score over the trailing `window` records
pub fn windowed_mean_score(records: &[EpisodeRecord], window: usize) -> f64 {
    let take = window.min(records.len());
    if take == 0 {
        return 0.0;
    }
    records[records.len() - take..].iter().map(|r| r.score as f64).sum::<f64>() / take as f64
}
