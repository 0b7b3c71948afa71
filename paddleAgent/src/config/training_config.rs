use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::ai::learning::constants::*;
use crate::config::constants::*;

/// Playfield extents and bin counts used to discretize observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub paddle_width: f32,
    pub paddle_x_bins: usize,
    pub ball_x_bins: usize,
    pub ball_y_bins: usize,
    pub velocity_deadband: f32, // |v| <= deadband counts as near zero
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_x_bins: PADDLE_X_BINS,
            ball_x_bins: BALL_X_BINS,
            ball_y_bins: BALL_Y_BINS,
            velocity_deadband: VELOCITY_DEADBAND,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub learning_rate: f32,       // alpha
    pub discount_factor: f32,     // gamma
    pub initial_exploration: f32,
    pub exploration_decay: f32,
    pub min_exploration: f32,
    pub episodes: usize,
    pub max_steps_per_episode: u32,
    pub report_interval: usize,
    pub checkpoint_interval: usize,
    pub tick_dt: f32,
    pub encoder: EncoderConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            initial_exploration: DEFAULT_EXPLORATION_RATE,
            exploration_decay: EXPLORATION_DECAY,
            min_exploration: MIN_EXPLORATION_RATE,
            episodes: DEFAULT_EPISODES,
            max_steps_per_episode: DEFAULT_MAX_STEPS_PER_EPISODE,
            report_interval: DEFAULT_REPORT_INTERVAL,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            tick_dt: TICK_DT,
            encoder: EncoderConfig::default(),
        }
    }
}

impl EncoderConfig {
    /// Every bin count must be at least 1 and the playfield must leave room for the paddle
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.paddle_x_bins >= 1 && self.ball_x_bins >= 1 && self.ball_y_bins >= 1,
            "encoder bin counts must be at least 1 (paddle_x={}, ball_x={}, ball_y={})",
            self.paddle_x_bins,
            self.ball_x_bins,
            self.ball_y_bins
        );
        ensure!(
            self.paddle_width > 0.0 && self.screen_width > self.paddle_width,
            "screen_width ({}) must exceed paddle_width ({}), which must be positive",
            self.screen_width,
            self.paddle_width
        );
        ensure!(self.screen_height > 0.0, "screen_height must be positive, got {}", self.screen_height);
        Ok(())
    }
}

impl TrainingConfig {
    /// Read a JSON config file. Missing fields fall back to the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: TrainingConfig = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .encoder
            .validate()
            .with_context(|| format!("invalid encoder settings in {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_encoder_shape() {
        let encoder = EncoderConfig::default();
        let states = encoder.paddle_x_bins
            * encoder.ball_x_bins
            * encoder.ball_y_bins
            * BALL_VX_BINS
            * BALL_VY_BINS;
        assert_eq!(states, 20_736);
        assert_eq!(states, N_STATES);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrainingConfig = serde_json::from_str(r#"{ "episodes": 42, "learning_rate": 0.5 }"#).unwrap();
        assert_eq!(config.episodes, 42);
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.discount_factor, DEFAULT_DISCOUNT_FACTOR);
        assert_eq!(config.encoder, EncoderConfig::default());
    }

    #[test]
    fn test_zero_bins_rejected_on_load() {
        let path = std::env::temp_dir().join(format!("qbreakout_config_zero_bins_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "encoder": { "paddle_x_bins": 0 } }"#).unwrap();
        assert!(TrainingConfig::load_from_file(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_encoder_validation() {
        assert!(EncoderConfig::default().validate().is_ok());

        let narrow = EncoderConfig { screen_width: 100.0, ..EncoderConfig::default() };
        assert!(narrow.validate().is_err());

        let flat = EncoderConfig { screen_height: 0.0, ..EncoderConfig::default() };
        assert!(flat.validate().is_err());

        let no_paddle = EncoderConfig { paddle_width: 0.0, ..EncoderConfig::default() };
        assert!(no_paddle.validate().is_err());
    }

    #[test]
    fn test_valid_file_loads() {
        let path = std::env::temp_dir().join(format!("qbreakout_config_valid_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "episodes": 7, "encoder": { "ball_y_bins": 8 } }"#).unwrap();
        let config = TrainingConfig::load_from_file(&path).unwrap();
        assert_eq!(config.episodes, 7);
        assert_eq!(config.encoder.ball_y_bins, 8);
        let _ = std::fs::remove_file(&path);
    }
}
