// Per-tick driver that ties the encoder, the table and exploration together

use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::actions::paddle_action::PaddleAction;
use crate::ai::learning::exploration::ExplorationSchedule;
use crate::ai::learning::q_table::{QTable, Transition};
use crate::ai::state::encoder::StateEncoder;
use crate::config::training_config::TrainingConfig;
use crate::models::observation::Observation;
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Epsilon-greedy with table updates and per-episode decay
    Training,
    /// Greedy, table is read-only
    Evaluation,
}

/// Where the session stands inside the current episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EpisodeStep {
    AwaitingFirstObservation,
    HasPrevious { state: usize, action: PaddleAction },
}

pub struct LearningSession {
    table: QTable,
    encoder: StateEncoder,
    exploration: ExplorationSchedule,
    learning_rate: f32,
    discount_factor: f32,
    mode: SessionMode,
    step: EpisodeStep,
    episode: usize,
    rng: StdRng,
}

impl LearningSession {
    /// Fresh zero-initialised table sized for the configured encoder
    pub fn from_config(config: &TrainingConfig, mode: SessionMode, seed: Option<u64>) -> Self {
        let encoder = StateEncoder::new(config.encoder.clone());
        let table = QTable::new(encoder.n_states());
        Self::build(table, encoder, config, mode, seed)
    }

    /// Resume from an existing table. Its row count must match the encoder.
    pub fn with_table(
        table: QTable,
        config: &TrainingConfig,
        mode: SessionMode,
        seed: Option<u64>,
    ) -> Result<Self> {
        config.encoder.validate()?;
        let encoder = StateEncoder::new(config.encoder.clone());
        ensure!(
            table.n_states() == encoder.n_states(),
            "table has {} states but the encoder produces {}",
            table.n_states(),
            encoder.n_states()
        );
        Ok(Self::build(table, encoder, config, mode, seed))
    }

    fn build(
        table: QTable,
        encoder: StateEncoder,
        config: &TrainingConfig,
        mode: SessionMode,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            table,
            encoder,
            exploration: ExplorationSchedule::new(
                config.initial_exploration,
                config.exploration_decay,
                config.min_exploration,
            ),
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            mode,
            step: EpisodeStep::AwaitingFirstObservation,
            episode: 0,
            rng,
        }
    }

    /// Feed one tick: `reward` is the payoff for the action chosen on the
    /// previous tick. It is ignored on the first tick of an episode.
    pub fn step(&mut self, observation: &Observation, reward: f32) -> PaddleAction {
        let state = self.encoder.encode(observation);

        if self.mode == SessionMode::Training {
            if let EpisodeStep::HasPrevious { state: prev_state, action: prev_action } = self.step {
                let _timing = logging::start_timing("q_learning_update", OperationCategory::TableUpdate);
                self.table.q_learning_update(
                    &Transition {
                        state: prev_state,
                        action: prev_action,
                        reward,
                        next_state: state,
                    },
                    self.learning_rate,
                    self.discount_factor,
                );
            }
        }

        let action = self.table.select_action(state, self.current_epsilon(), &mut self.rng);
        self.step = EpisodeStep::HasPrevious { state, action };
        action
    }

    /// Close the current episode.
    ///
    /// With `Some(reward)` the last action is credited with that reward and no
    /// bootstrap. Epsilon decays once per training episode.
    pub fn finish_episode(&mut self, terminal_reward: Option<f32>) {
        if self.mode == SessionMode::Training {
            if let (EpisodeStep::HasPrevious { state, action }, Some(reward)) = (self.step, terminal_reward) {
                let _timing = logging::start_timing("terminal_update", OperationCategory::TableUpdate);
                self.table.terminal_update(state, action, reward, self.learning_rate);
            }
            self.exploration.decay();
        }

        self.step = EpisodeStep::AwaitingFirstObservation;
        self.episode += 1;
        debug!("Episode {} finished, epsilon now {:.4}", self.episode, self.exploration.epsilon);
    }

    /// Epsilon actually used for selection in the current mode
    pub fn current_epsilon(&self) -> f32 {
        match self.mode {
            SessionMode::Training => self.exploration.epsilon,
            SessionMode::Evaluation => 0.0,
        }
    }

    pub fn exploration(&self) -> &ExplorationSchedule {
        &self.exploration
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn episode(&self) -> usize {
        self.episode
    }

    pub fn encoder(&self) -> &StateEncoder {
        &self.encoder
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut QTable {
        &mut self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TrainingConfig {
        TrainingConfig {
            initial_exploration: 0.0,
            ..TrainingConfig::default()
        }
    }

    fn origin() -> Observation {
        Observation::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn test_first_step_does_not_update() {
        let mut session = LearningSession::from_config(&config(), SessionMode::Training, Some(1));
        session.step(&origin(), 1000.0);
        assert_eq!(session.table().visited_states(), 0);
    }

    #[test]
    fn test_second_step_credits_previous_action() {
        let mut session = LearningSession::from_config(&config(), SessionMode::Training, Some(2));
        let state = session.encoder().encode(&origin());
        let first = session.step(&origin(), 0.0);
        session.step(&origin(), 5.0);
        // alpha 0.1, empty successor row
        assert!((session.table().get(state, first) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_terminal_reward_has_no_bootstrap() {
        let mut session = LearningSession::from_config(&config(), SessionMode::Training, Some(3));
        let state = session.encoder().encode(&origin());
        let action = session.step(&origin(), 0.0);
        session.finish_episode(Some(-100.0));
        assert!((session.table().get(state, action) + 10.0).abs() < 1e-5);
        assert_eq!(session.episode(), 1);
    }

    #[test]
    fn test_new_episode_does_not_bootstrap_across_boundary() {
        let mut session = LearningSession::from_config(&config(), SessionMode::Training, Some(4));
        session.step(&origin(), 0.0);
        session.finish_episode(None);
        session.step(&origin(), 42.0);
        assert_eq!(session.table().visited_states(), 0);
    }

    #[test]
    fn test_epsilon_decays_only_in_training() {
        let config = TrainingConfig {
            initial_exploration: 0.5,
            exploration_decay: 0.5,
            min_exploration: 0.01,
            ..TrainingConfig::default()
        };
        let mut training = LearningSession::from_config(&config, SessionMode::Training, Some(5));
        training.finish_episode(None);
        assert!((training.exploration().epsilon - 0.25).abs() < 1e-7);

        let mut evaluation = LearningSession::from_config(&config, SessionMode::Evaluation, Some(5));
        assert_eq!(evaluation.mode(), SessionMode::Evaluation);
        assert_eq!(evaluation.current_epsilon(), 0.0);
        evaluation.finish_episode(None);
        assert!((evaluation.exploration().epsilon - 0.5).abs() < 1e-7);
    }

    #[test]
    fn test_evaluation_leaves_table_untouched() {
        let mut session = LearningSession::from_config(&config(), SessionMode::Evaluation, Some(6));
        let state = session.encoder().encode(&origin());
        session.table_mut().update(state, PaddleAction::MoveLeft, 3.0);
        let before = session.table().clone();

        for _ in 0..10 {
            assert_eq!(session.step(&origin(), 50.0), PaddleAction::MoveLeft);
        }
        session.finish_episode(Some(-100.0));
        assert_eq!(session.table(), &before);
    }

    #[test]
    fn test_with_table_rejects_zero_bins() {
        let mut config = config();
        config.encoder.ball_x_bins = 0;
        let result = LearningSession::with_table(QTable::new(0), &config, SessionMode::Training, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_table_rejects_wrong_shape() {
        let result = LearningSession::with_table(QTable::new(10), &config(), SessionMode::Training, None);
        assert!(result.is_err());
    }
}
