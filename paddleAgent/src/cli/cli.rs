use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Tabular Q-learning agent for a breakout paddle", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true, help = "JSON file overriding the training defaults")]
    config: Option<String>,

    #[arg(short = 't', long, global = true, default_value = "qtable.bin")]
    qtable: String,

    #[arg(long, global = true, default_value = "qtable.txt", help = "Human-readable dump written after training")]
    text_dump: String,

    #[arg(long, global = true, help = "Random seed for deterministic runs")]
    seed: Option<u64>,

    #[arg(long, global = true, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, global = true, default_value_t = false)]
    debug_logging: bool,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Train on the headless playfield, saving the table afterwards
    Train {
        #[arg(short = 'n', long, help = "Overrides the configured episode count")]
        episodes: Option<usize>,

        #[arg(long, default_value_t = false, help = "Start from an empty table instead of loading one")]
        no_continue: bool,

        #[arg(short = 'd', long, default_value = "checkpoints")]
        checkpoint_dir: String,

        #[arg(long, help = "Write one CSV row per episode to this file")]
        metrics_csv: Option<String>,

        #[arg(long, default_value_t = false)]
        no_progress: bool,
    },
    /// Watch the greedy policy play, one log line per episode
    Play {
        #[arg(short = 'n', long, default_value_t = 1)]
        episodes: usize,
    },
    /// Greedy evaluation over many seeded episodes in parallel
    Evaluate {
        #[arg(short = 'n', long, default_value_t = 100)]
        episodes: usize,
    },
    /// Write the text dump of a saved table and print coverage
    Dump {
        #[arg(short = 'k', long, default_value_t = 10, help = "Number of best states to list")]
        top: usize,
    },
}

impl Args {
    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn qtable(&self) -> &str {
        &self.qtable
    }

    pub fn text_dump(&self) -> &str {
        &self.text_dump
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_defaults() {
        let args = Args::try_parse_from(["qbreakout", "train"]).unwrap();
        assert_eq!(args.qtable(), "qtable.bin");
        assert_eq!(args.text_dump(), "qtable.txt");
        assert!(args.seed().is_none());
        match args.command() {
            Command::Train { episodes, no_continue, checkpoint_dir, metrics_csv, no_progress } => {
                assert!(episodes.is_none());
                assert!(!no_continue);
                assert_eq!(checkpoint_dir, "checkpoints");
                assert!(metrics_csv.is_none());
                assert!(!no_progress);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["qbreakout", "evaluate", "-n", "8", "--seed", "42", "-t", "run.bin"]).unwrap();
        assert_eq!(args.seed(), Some(42));
        assert_eq!(args.qtable(), "run.bin");
        assert!(matches!(args.command(), Command::Evaluate { episodes: 8 }));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["qbreakout"]).is_err());
    }
}
