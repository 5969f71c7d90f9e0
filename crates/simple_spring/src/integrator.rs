//! One fixed-rate spring step.
//!
//! This is a per-step geometric-decay spring rather than a dimensioned ODE:
//! stiffness is the fraction of the remaining distance added to velocity,
//! damping is the fraction of velocity kept. Both are dimensionless and
//! only meaningful at the fixed step rate.
//!
//! The update is semi-implicit and order-sensitive:
//!
//! ```text
//! velocity += (to - value) * stiffness
//! velocity *= damping
//! value    += velocity
//! ```

use crate::state::SpringState;

/// Advances a position and velocity by one step toward `target`.
///
/// # Returns
///
/// A tuple of `(new_value, new_velocity)`.
///
/// # Example
///
/// ```rust
/// use simple_spring::integrator::step;
///
/// let mut value = 0.0;
/// let mut velocity = 0.0;
/// for _ in 0..600 {
///     (value, velocity) = step(value, velocity, 100.0, 0.15, 0.8);
/// }
/// assert!((value - 100.0).abs() < 0.01);
/// ```
#[inline]
pub fn step(value: f64, velocity: f64, target: f64, stiffness: f64, damping: f64) -> (f64, f64) {
    let displacement = target - value;
    let velocity = (velocity + displacement * stiffness) * damping;
    (value + velocity, velocity)
}

/// Runs one step on a spring's state in place.
///
/// `prev_value` is left alone; the accumulator snapshots it before calling.
#[inline]
pub fn step_physics(state: &mut SpringState) {
    (state.value, state.velocity) = step(
        state.value,
        state.velocity,
        state.to,
        state.stiffness,
        state.damping,
    );
}
