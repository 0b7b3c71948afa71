use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use qbreakout::cli::cli::{Args, Command};
use qbreakout::config::training_config::TrainingConfig;
use qbreakout::core::evaluation::evaluate;
use qbreakout::core::session::{LearningSession, SessionMode};
use qbreakout::core::training::{run_episode, train, TrainingOutputs};
use qbreakout::models::breakout::BreakoutEnv;
use qbreakout::utils::logging::{self, FileIOType, OperationCategory};
use qbreakout::{PaddleAction, QTable, StateEncoder};

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())?;

    let config = load_config(args.config())?;
    let n_states = StateEncoder::new(config.encoder.clone()).n_states();
    info!("Q-table shape: {} states x {} actions", n_states, PaddleAction::ALL.len());

    match args.command().clone() {
        Command::Train { episodes, no_continue, checkpoint_dir, metrics_csv, no_progress } => {
            let mut config = config;
            if let Some(episodes) = episodes {
                config.episodes = episodes;
            }

            let table = if no_continue {
                info!("Starting from an empty table");
                QTable::new(n_states)
            } else {
                resume_table(args.qtable(), n_states)?
            };

            let mut session = LearningSession::with_table(table, &config, SessionMode::Training, args.seed())?;
            let mut env = BreakoutEnv::new(args.seed().unwrap_or_else(rand::random), config.max_steps_per_episode);
            let outputs = TrainingOutputs {
                checkpoint_dir: Some(PathBuf::from(checkpoint_dir)),
                metrics_csv: metrics_csv.map(PathBuf::from),
                show_progress: !no_progress,
            };

            train(&mut session, &mut env, &config, &outputs)?;

            let table = session.table();
            table
                .save_to_file(args.qtable())
                .with_context(|| format!("failed to save Q-table to {}", args.qtable()))?;
            info!("Q-table saved to {}", args.qtable());
            table
                .save_text(args.text_dump())
                .with_context(|| format!("failed to write text dump {}", args.text_dump()))?;
            table.log_summary();
        }
        Command::Play { episodes } => {
            let table = require_table(args.qtable(), n_states)?;
            let mut session = LearningSession::with_table(table, &config, SessionMode::Evaluation, args.seed())?;
            let mut env = BreakoutEnv::new(args.seed().unwrap_or_else(rand::random), config.max_steps_per_episode);

            for _ in 0..episodes {
                let record = run_episode(&mut session, &mut env, config.tick_dt);
                info!(
                    "Episode {}: score {}, {} steps{}",
                    record.episode,
                    record.score,
                    record.steps,
                    if record.cleared { ", board cleared" } else { "" }
                );
            }
        }
        Command::Evaluate { episodes } => {
            let table = require_table(args.qtable(), n_states)?;
            evaluate(
                &table,
                &config.encoder,
                episodes,
                args.seed().unwrap_or(0),
                config.max_steps_per_episode,
                config.tick_dt,
            );
        }
        Command::Dump { top } => {
            let table = require_table(args.qtable(), n_states)?;
            table
                .save_text(args.text_dump())
                .with_context(|| format!("failed to write text dump {}", args.text_dump()))?;
            info!("Text dump written to {}", args.text_dump());
            table.log_summary();
            for (state, value) in table.top_states(top) {
                let (action, _) = table.best_action(state, &mut rand::thread_rng());
                info!("state {:>6}: best {} ({:.4})", state, action, value);
            }
        }
    }

    logging::print_timing_report();
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<TrainingConfig> {
    match path {
        Some(path) => {
            let _timing = logging::start_timing("load_config",
                OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });
            let config = TrainingConfig::load_from_file(path)?;
            info!("Loaded configuration from {}", path);
            Ok(config)
        }
        None => Ok(TrainingConfig::default()),
    }
}

/// Continue from a saved table, or start empty when none exists yet
fn resume_table(path: &str, n_states: usize) -> Result<QTable> {
    let table = QTable::load_or_new(path, n_states).with_context(|| {
        format!(
            "refusing to overwrite {}; pass --no-continue or choose another --qtable",
            path
        )
    })?;
    info!("Training from {} ({} states visited so far)", path, table.visited_states());
    Ok(table)
}

fn require_table(path: &str, n_states: usize) -> Result<QTable> {
    let mut table = QTable::new(n_states);
    table
        .load_from_file(path)
        .with_context(|| format!("failed to load Q-table from {}", path))?;
    Ok(table)
}
