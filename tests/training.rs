use qbreakout::config::training_config::TrainingConfig;
use qbreakout::core::evaluation::evaluate;
use qbreakout::core::session::{LearningSession, SessionMode};
use qbreakout::core::training::{run_episode, train, TrainingOutputs};
use qbreakout::models::breakout::BreakoutEnv;
use qbreakout::QTable;

fn short_config() -> TrainingConfig {
    TrainingConfig {
        episodes: 20,
        max_steps_per_episode: 3_000,
        report_interval: 10,
        checkpoint_interval: 0,
        ..TrainingConfig::default()
    }
}

#[test]
fn short_training_run_learns_something() {
    let config = short_config();
    let mut session = LearningSession::from_config(&config, SessionMode::Training, Some(7));
    let mut env = BreakoutEnv::new(7, config.max_steps_per_episode);

    let summary = train(&mut session, &mut env, &config, &TrainingOutputs::default()).unwrap();

    assert_eq!(summary.episodes, 20);
    assert_eq!(session.episode(), 20);
    assert!(summary.visited_states > 0);
    assert_eq!(summary.visited_states, session.table().visited_states());
    assert_eq!(summary.checkpoints_written, 0);
    let expected_epsilon = config.initial_exploration * config.exploration_decay.powi(20);
    assert!((summary.final_epsilon - expected_epsilon).abs() < 1e-5);

    // Losing the ball is the only large negative reward
    let (lo, _) = session.table().value_range().unwrap();
    assert!(lo < 0.0);
}

#[test]
fn same_seed_reproduces_training() {
    let config = short_config();
    let run = || {
        let mut session = LearningSession::from_config(&config, SessionMode::Training, Some(3));
        let mut env = BreakoutEnv::new(3, config.max_steps_per_episode);
        train(&mut session, &mut env, &config, &TrainingOutputs::default()).unwrap();
        session.into_table()
    };
    assert_eq!(run(), run());
}

#[test]
fn trained_table_survives_save_and_greedy_play() {
    let config = short_config();
    let mut session = LearningSession::from_config(&config, SessionMode::Training, Some(11));
    let mut env = BreakoutEnv::new(11, config.max_steps_per_episode);
    train(&mut session, &mut env, &config, &TrainingOutputs::default()).unwrap();

    let path = std::env::temp_dir().join(format!("qbreakout_it_trained_{}.bin", std::process::id()));
    session.table().save_to_file(&path).unwrap();

    let mut restored = QTable::new(session.table().n_states());
    restored.load_from_file(&path).unwrap();
    assert_eq!(&restored, session.table());

    let mut player = LearningSession::with_table(restored.clone(), &config, SessionMode::Evaluation, Some(1)).unwrap();
    let mut env = BreakoutEnv::new(99, 1_000);
    let record = run_episode(&mut player, &mut env, config.tick_dt);
    assert!(record.steps <= 1_000);
    assert_eq!(record.epsilon, 0.0);
    assert_eq!(player.table(), &restored);

    let summary = evaluate(&restored, &config.encoder, 3, 5, 1_000, config.tick_dt);
    assert_eq!(summary.episodes, 3);

    let _ = std::fs::remove_file(&path);
}
