use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::ai::metrics::episode_metrics::{windowed_mean_score, EpisodeRecord, TrainingSummary};
use crate::config::training_config::TrainingConfig;
use crate::core::session::LearningSession;
use crate::utils::csv_export::{run_timestamp, CsvExporter};
use crate::utils::logging::{self, OperationCategory};
use crate::utils::traits::Environment;

/// Where checkpoints and per-episode metrics go during a run
#[derive(Debug, Clone, Default)]
pub struct TrainingOutputs {
    /// Parent directory; each run writes into a timestamped subdirectory
    pub checkpoint_dir: Option<PathBuf>,
    pub metrics_csv: Option<PathBuf>,
    pub show_progress: bool,
}

/// Play one episode to completion and credit its terminal transition
pub fn run_episode<E: Environment>(
    session: &mut LearningSession,
    env: &mut E,
    tick_dt: f32,
) -> EpisodeRecord {
    let epsilon = session.current_epsilon();
    env.reset();

    let mut reward = 0.0;
    let mut total_reward = 0.0;
    let mut steps = 0u32;
    let mut score: u32;

    let terminal_reward = loop {
        let observation = env.observe();
        let action = session.step(&observation, reward);
        let outcome = env.step(action, tick_dt);

        steps += 1;
        total_reward += outcome.reward;
        score = outcome.score;

        if outcome.truncated {
            // Cut short: bootstrap from where the ball actually is
            session.step(&env.observe(), outcome.reward);
            break None;
        }
        if outcome.terminal {
            break Some(outcome.reward);
        }
        reward = outcome.reward;
    };

    let cleared = env.cleared();
    session.finish_episode(terminal_reward);

    EpisodeRecord {
        episode: session.episode(),
        score,
        steps,
        total_reward,
        epsilon,
        cleared,
    }
}

pub fn train<E: Environment>(
    session: &mut LearningSession,
    env: &mut E,
    config: &TrainingConfig,
    outputs: &TrainingOutputs,
) -> Result<TrainingSummary> {
    let _timing = logging::start_timing("train", OperationCategory::Training);

    let run_dir = match &outputs.checkpoint_dir {
        Some(dir) => {
            let run_dir = dir.join(run_timestamp());
            std::fs::create_dir_all(&run_dir)
                .with_context(|| format!("failed to create checkpoint directory {}", run_dir.display()))?;
            info!("Writing checkpoints to {}", run_dir.display());
            Some(run_dir)
        }
        None => None,
    };

    let mut exporter = match &outputs.metrics_csv {
        Some(path) => Some(CsvExporter::create(path)?),
        None => None,
    };

    let progress = if outputs.show_progress {
        let pb = ProgressBar::new(config.episodes as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} episodes ({eta}) {msg}")?
                .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    info!(
        "Training for {} episodes (alpha={}, gamma={}, epsilon={:.3})",
        config.episodes,
        config.learning_rate,
        config.discount_factor,
        session.current_epsilon()
    );

    let mut records = Vec::with_capacity(config.episodes);
    let mut checkpoints_written = 0;

    for _ in 0..config.episodes {
        let record = run_episode(session, env, config.tick_dt);
        debug!(
            episode = record.episode,
            score = record.score,
            steps = record.steps,
            "episode finished with reward {:.2}",
            record.total_reward
        );

        if let Some(exporter) = exporter.as_mut() {
            exporter.write_episode(&record)?;
        }
        let episode = record.episode;
        records.push(record);
        progress.inc(1);

        if config.report_interval > 0 && episode % config.report_interval == 0 {
            let mean = windowed_mean_score(&records, config.report_interval);
            progress.set_message(format!("mean score {:.1}", mean));
            info!(
                "Episode {}: mean score {:.1} over last {}, epsilon {:.4}, {} states visited",
                episode,
                mean,
                config.report_interval.min(records.len()),
                session.exploration().epsilon,
                session.table().visited_states()
            );
        }

        if let Some(run_dir) = &run_dir {
            if config.checkpoint_interval > 0 && episode % config.checkpoint_interval == 0 {
                save_checkpoint(session, run_dir, episode)?;
                checkpoints_written += 1;
            }
        }
    }

    progress.finish_and_clear();

    if let Some(exporter) = exporter {
        let path = exporter.finish()?;
        info!("Episode metrics written to {}", path.display());
    }

    let mut summary = TrainingSummary::from_records(
        &records,
        session.exploration().epsilon,
        session.table().visited_states(),
    );
    summary.checkpoints_written = checkpoints_written;

    info!(
        "Training finished: {} episodes, mean score {:.1}, best {}, final epsilon {:.4}",
        summary.episodes, summary.mean_score, summary.best_score, summary.final_epsilon
    );
    Ok(summary)
}

fn save_checkpoint(session: &LearningSession, run_dir: &Path, episode: usize) -> Result<()> {
    let path = run_dir.join(format!("checkpoint_{:06}.qtable", episode));
    session
        .table()
        .save_to_file(&path)
        .with_context(|| format!("failed to write checkpoint {}", path.display()))?;
    info!("Saved checkpoint {}", path.display());
    Ok(())
}
