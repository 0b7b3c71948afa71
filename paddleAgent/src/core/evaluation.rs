// Greedy evaluation of a learned table over independent seeded episodes

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::learning::q_table::QTable;
use crate::ai::state::encoder::StateEncoder;
use crate::config::training_config::EncoderConfig;
use crate::models::breakout::BreakoutEnv;
use crate::utils::logging::{self, OperationCategory};
use crate::utils::traits::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationEpisode {
    pub seed: u64,
    pub score: u32,
    pub steps: u32,
    pub total_reward: f32,
    pub cleared: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub episodes: usize,
    pub mean_score: f64,
    pub min_score: u32,
    pub max_score: u32,
    pub mean_steps: f64,
    pub clear_rate: f64,
}

impl EvaluationSummary {
    pub fn from_episodes(episodes: &[EvaluationEpisode]) -> Self {
        if episodes.is_empty() {
            return Self::default();
        }
        let n = episodes.len() as f64;
        Self {
            episodes: episodes.len(),
            mean_score: episodes.iter().map(|e| e.score as f64).sum::<f64>() / n,
            min_score: episodes.iter().map(|e| e.score).min().unwrap_or(0),
            max_score: episodes.iter().map(|e| e.score).max().unwrap_or(0),
            mean_steps: episodes.iter().map(|e| e.steps as f64).sum::<f64>() / n,
            clear_rate: episodes.iter().filter(|e| e.cleared).count() as f64 / n,
        }
    }
}

/// Play a single greedy episode. The table is never written.
pub fn play_greedy_episode(
    table: &QTable,
    encoder: &StateEncoder,
    seed: u64,
    max_steps: u32,
    tick_dt: f32,
) -> EvaluationEpisode {
    let mut env = BreakoutEnv::new(seed, max_steps);
    // Tie-breaking stream, separate from the environment's launch angles
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(0x9E37_79B9_7F4A_7C15));

    let mut total_reward = 0.0;
    let mut steps = 0;
    loop {
        let state = encoder.encode(&env.observe());
        let (action, _) = table.best_action(state, &mut rng);
        let outcome = env.step(action, tick_dt);
        steps += 1;
        total_reward += outcome.reward;
        if outcome.terminal {
            break;
        }
    }

    EvaluationEpisode {
        seed,
        score: env.score,
        steps,
        total_reward,
        cleared: env.cleared(),
    }
}

/// Run `episodes` greedy games in parallel, seeded `base_seed..base_seed + episodes`
pub fn evaluate(
    table: &QTable,
    encoder_config: &EncoderConfig,
    episodes: usize,
    base_seed: u64,
    max_steps: u32,
    tick_dt: f32,
) -> EvaluationSummary {
    let _timing = logging::start_timing("evaluate", OperationCategory::Evaluation);
    let encoder = StateEncoder::new(encoder_config.clone());

    let results: Vec<EvaluationEpisode> = (0..episodes as u64)
        .into_par_iter()
        .map(|i| play_greedy_episode(table, &encoder, base_seed.wrapping_add(i), max_steps, tick_dt))
        .collect();

    let summary = EvaluationSummary::from_episodes(&results);
    info!(
        "Evaluated {} episodes: mean score {:.1} (min {}, max {}), mean steps {:.0}, cleared {:.1}%",
        summary.episodes,
        summary.mean_score,
        summary.min_score,
        summary.max_score,
        summary.mean_steps,
        summary.clear_rate * 100.0
    );
    summary
}
