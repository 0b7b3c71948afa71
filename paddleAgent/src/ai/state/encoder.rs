//! State encoder
//!
//! Maps a continuous [`Observation`] onto a single row index of the Q-table.
//! Positions are split into uniform bins over their playfield range and the
//! two velocity components are classified by sign with a fixed deadband.
//! The five digits are composed most-significant first in the order
//! paddle_x, ball_x, ball_y, ball_vx sign, ball_vy sign.

use crate::config::constants::{BALL_VX_BINS, BALL_VY_BINS};
use crate::config::training_config::EncoderConfig;
use crate::models::observation::Observation;

/// Discretizes `value` over `[min, max]` into one of `bins` buckets.
/// Values outside the range land in the boundary bucket. Zero bins yields bucket 0.
pub fn discretize(value: f32, min: f32, max: f32, bins: usize) -> usize {
    let scaled = ((value - min) / (max - min) * bins as f32).floor();
    // NaN casts to 0, infinities saturate
    (scaled as i64).clamp(0, bins.saturating_sub(1) as i64) as usize
}

/// 0 for moving negative, 1 for near zero, 2 for moving positive.
/// The deadband is inclusive on the near-zero side.
pub fn sign_bin(velocity: f32, deadband: f32) -> usize {
    if velocity < -deadband {
        0
    } else if velocity > deadband {
        2
    } else {
        1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateEncoder {
    config: EncoderConfig,
    n_states: usize,
}

impl StateEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        let n_states = config.paddle_x_bins * config.ball_x_bins * config.ball_y_bins * BALL_VX_BINS * BALL_VY_BINS;
        Self { config, n_states }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Number of distinct state indices this encoder can produce
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn encode(&self, obs: &Observation) -> usize {
        let c = &self.config;
        let px = discretize(obs.paddle_x, 0.0, c.screen_width - c.paddle_width, c.paddle_x_bins);
        let bx = discretize(obs.ball_x, 0.0, c.screen_width, c.ball_x_bins);
        let by = discretize(obs.ball_y, 0.0, c.screen_height, c.ball_y_bins);
        let svx = sign_bin(obs.ball_vx, c.velocity_deadband);
        let svy = sign_bin(obs.ball_vy, c.velocity_deadband);

        (((px * c.ball_x_bins + bx) * c.ball_y_bins + by) * BALL_VX_BINS + svx) * BALL_VY_BINS + svy
    }
}

impl Default for StateEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::N_STATES;
    use proptest::prelude::*;

    #[test]
    fn test_sign_bin_deadband() {
        assert_eq!(sign_bin(-11.0, 10.0), 0);
        assert_eq!(sign_bin(-10.0, 10.0), 1);
        assert_eq!(sign_bin(0.0, 10.0), 1);
        assert_eq!(sign_bin(10.0, 10.0), 1);
        assert_eq!(sign_bin(11.0, 10.0), 2);
    }

    #[test]
    fn test_discretize_edges() {
        assert_eq!(discretize(0.0, 0.0, 800.0, 12), 0);
        assert_eq!(discretize(800.0, 0.0, 800.0, 12), 11);
        assert_eq!(discretize(-50.0, 0.0, 800.0, 12), 0);
        assert_eq!(discretize(1e9, 0.0, 800.0, 12), 11);
        assert_eq!(discretize(f32::NAN, 0.0, 800.0, 12), 0);
        // 400 / 800 * 12 = 6
        assert_eq!(discretize(400.0, 0.0, 800.0, 12), 6);
        assert_eq!(discretize(400.0, 0.0, 800.0, 0), 0);
    }

    #[test]
    fn test_origin_with_negative_velocity_is_state_zero() {
        let encoder = StateEncoder::default();
        assert_eq!(encoder.n_states(), 20_736);
        let obs = Observation::new(0.0, 0.0, 0.0, -20.0, -20.0);
        assert_eq!(encoder.encode(&obs), 0);
    }

    #[test]
    fn test_far_corner_is_last_state() {
        let encoder = StateEncoder::default();
        let obs = Observation::new(700.0, 800.0, 600.0, 20.0, 20.0);
        assert_eq!(encoder.encode(&obs), N_STATES - 1);
    }

    #[test]
    fn test_mixed_radix_digit_order() {
        let encoder = StateEncoder::default();
        // Only the least significant digit (vy sign) moves
        let base = encoder.encode(&Observation::new(0.0, 0.0, 0.0, -20.0, -20.0));
        let vy_up = encoder.encode(&Observation::new(0.0, 0.0, 0.0, -20.0, 0.0));
        assert_eq!(vy_up - base, 1);
        // vx sign has radix 3
        let vx_up = encoder.encode(&Observation::new(0.0, 0.0, 0.0, 0.0, -20.0));
        assert_eq!(vx_up - base, 3);
        // one ball_y bin is worth 3 * 3
        let by_up = encoder.encode(&Observation::new(0.0, 0.0, 600.0 / 16.0 + 1.0, -20.0, -20.0));
        assert_eq!(by_up - base, 9);
        // one ball_x bin is worth 16 * 9
        let bx_up = encoder.encode(&Observation::new(0.0, 800.0 / 12.0 + 1.0, 0.0, -20.0, -20.0));
        assert_eq!(bx_up - base, 144);
        // one paddle bin is worth 12 * 144
        let px_up = encoder.encode(&Observation::new(700.0 / 12.0 + 1.0, 0.0, 0.0, -20.0, -20.0));
        assert_eq!(px_up - base, 1728);
    }

    #[test]
    fn test_out_of_range_inputs_clamp() {
        let encoder = StateEncoder::default();
        let clamped = encoder.encode(&Observation::new(0.0, 0.0, 0.0, 5.0, 5.0));
        let low = encoder.encode(&Observation::new(-300.0, -50.0, -1.0, 5.0, 5.0));
        assert_eq!(clamped, low);

        let top = encoder.encode(&Observation::new(700.0, 800.0, 600.0, 5.0, 5.0));
        let high = encoder.encode(&Observation::new(5000.0, 900.0, 1e6, 5.0, 5.0));
        assert_eq!(top, high);
    }

    proptest! {
        #[test]
        fn prop_encode_in_range_and_deterministic(
            px in -1000.0f32..2000.0,
            bx in -1000.0f32..2000.0,
            by in -1000.0f32..2000.0,
            vx in -1000.0f32..1000.0,
            vy in -1000.0f32..1000.0,
        ) {
            let encoder = StateEncoder::default();
            let obs = Observation::new(px, bx, by, vx, vy);
            let first = encoder.encode(&obs);
            prop_assert!(first < encoder.n_states());
            prop_assert_eq!(first, encoder.encode(&obs));
        }

        #[test]
        fn prop_ball_x_below_range_matches_zero(bx in -10_000.0f32..0.0, by in 0.0f32..600.0) {
            let encoder = StateEncoder::default();
            let below = encoder.encode(&Observation::new(50.0, bx, by, 30.0, -30.0));
            let at_min = encoder.encode(&Observation::new(50.0, 0.0, by, 30.0, -30.0));
            prop_assert_eq!(below, at_min);
        }
    }
}
