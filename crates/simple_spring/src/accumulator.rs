//! Fixed-timestep accumulation.
//!
//! Hosts tick at whatever rate they render. The spring always integrates at
//! [`PHYSICS_RATE`] steps per simulated second and the observable value is
//! interpolated between the last two steps, so motion is deterministic and
//! still smooth at any frame rate.

use tracing::trace;

use crate::integrator::step_physics;
use crate::state::SpringState;

/// Physics steps per simulated second.
pub const PHYSICS_RATE: f64 = 60.0;

/// Length of one physics step in seconds.
pub const FIXED_STEP: f64 = 1.0 / PHYSICS_RATE;

/// Largest frame delta honored per call, about a 15 fps floor.
pub const MAX_FRAME_DELTA: f64 = 0.067;

/// Converts host frame deltas into whole physics steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAccumulator {
    rate: f64,
    max_delta: f64,
}

impl Default for TimeAccumulator {
    fn default() -> Self {
        Self {
            rate: PHYSICS_RATE,
            max_delta: MAX_FRAME_DELTA,
        }
    }
}

impl TimeAccumulator {
    /// Creates the standard 60 Hz accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamps a raw host delta into `[0, max_delta]`.
    ///
    /// Negative and non-finite deltas count as no time passing.
    pub fn clamp_delta(&self, dt: f64) -> f64 {
        if dt.is_finite() {
            dt.clamp(0.0, self.max_delta)
        } else {
            0.0
        }
    }

    /// Feeds one frame delta into the spring and runs the owed steps.
    ///
    /// Returns the number of physics steps executed. Afterwards
    /// `smooth_value` holds the interpolated position.
    pub fn advance(&self, state: &mut SpringState, dt: f64) -> u64 {
        state.time += self.clamp_delta(dt);

        let scaled = state.time * self.rate;
        // floor of a non-negative finite float; the cast saturates
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let target_steps = scaled.floor() as u64;

        let mut ran = 0;
        while state.steps < target_steps {
            state.prev_value = state.value;
            step_physics(state);
            state.steps += 1;
            ran += 1;
        }

        #[allow(clippy::cast_precision_loss)]
        let fraction = scaled - state.steps as f64;
        state.smooth_value = state.prev_value + (state.value - state.prev_value) * fraction;

        trace!(steps = ran, fraction, value = state.value, "accumulated frame");
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_state() -> SpringState {
        let mut state = SpringState::default();
        state.to = 100.0;
        state.is_animating = true;
        state
    }

    #[test]
    fn test_clamp_delta() {
        let acc = TimeAccumulator::new();
        assert_eq!(acc.clamp_delta(0.5), MAX_FRAME_DELTA);
        assert_eq!(acc.clamp_delta(-1.0), 0.0);
        assert_eq!(acc.clamp_delta(f64::NAN), 0.0);
        assert_eq!(acc.clamp_delta(f64::INFINITY), 0.0);
        assert_eq!(acc.clamp_delta(0.01), 0.01);
    }

    #[test]
    fn test_zero_delta_runs_nothing() {
        let acc = TimeAccumulator::new();
        let mut state = moving_state();
        let before = state;
        assert_eq!(acc.advance(&mut state, 0.0), 0);
        assert_eq!(state.smooth_value, before.smooth_value);
        assert_eq!(state.value, before.value);
    }

    #[test]
    fn test_half_step_interpolates_without_stepping() {
        let acc = TimeAccumulator::new();
        let mut state = moving_state();
        assert_eq!(acc.advance(&mut state, FIXED_STEP / 2.0), 0);
        // no step yet: prev == value == 0
        assert_eq!(state.smooth_value, 0.0);
    }

    #[test]
    fn test_interpolation_between_steps() {
        let acc = TimeAccumulator::new();
        let mut state = moving_state();
        // 1.5 steps worth of time: one step runs, fraction 0.5
        let ran = acc.advance(&mut state, 1.5 / 60.0);
        assert_eq!(ran, 1);
        let expected = state.prev_value + (state.value - state.prev_value) * 0.5;
        assert!((state.smooth_value - expected).abs() < 1e-9);
        assert!(state.smooth_value > state.prev_value);
        assert!(state.smooth_value < state.value);
    }

    #[test]
    fn test_stall_is_bounded() {
        let acc = TimeAccumulator::new();
        let mut state = moving_state();
        // a 10 second hitch only earns 0.067 s worth of steps
        let ran = acc.advance(&mut state, 10.0);
        assert_eq!(ran, 4);
        assert_eq!(state.steps, 4);
    }

    #[test]
    fn test_steps_track_time() {
        let acc = TimeAccumulator::new();
        let mut state = moving_state();
        for _ in 0..16 {
            acc.advance(&mut state, 0.0625);
        }
        assert_eq!(state.time, 1.0);
        assert_eq!(state.steps, 60);
    }
}
