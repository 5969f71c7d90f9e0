//! The simulation fields of one spring.

use crate::config::SpringConfig;

/// Everything a spring needs to advance and be observed.
///
/// A `SpringState` belongs to exactly one behavior. Fields are public so the
/// integrator and the accumulator can be driven directly, but a
/// [`SpringBehavior`](crate::SpringBehavior) is the only thing that keeps the
/// invariants (clamped gains, finite value, idle implies at rest on target).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringState {
    /// Start of the current animation.
    pub from: f64,
    /// Target the spring is pulled toward.
    pub to: f64,
    /// Position after the last physics step.
    pub value: f64,
    /// Position before the last physics step.
    pub prev_value: f64,
    /// Position interpolated between `prev_value` and `value`; what hosts see.
    pub smooth_value: f64,
    /// Change in position per physics step.
    pub velocity: f64,
    /// Restoring gain per step.
    pub stiffness: f64,
    /// Velocity retention per step.
    pub damping: f64,
    /// Settle threshold for displacement and speed.
    pub precision: f64,
    /// Whether the spring is in motion.
    pub is_animating: bool,
    /// Simulated seconds accumulated since the last reset or finish.
    pub time: f64,
    /// Physics steps already run within the current accumulation window.
    pub steps: u64,
}

impl SpringState {
    /// Creates an idle spring resting at zero.
    ///
    /// The config is sanitized, so out-of-range gains are clamped here.
    pub fn new(config: SpringConfig) -> Self {
        let config = config.sanitized();
        Self {
            from: 0.0,
            to: 0.0,
            value: 0.0,
            prev_value: 0.0,
            smooth_value: 0.0,
            velocity: 0.0,
            stiffness: config.stiffness,
            damping: config.damping,
            precision: config.precision,
            is_animating: false,
            time: 0.0,
            steps: 0,
        }
    }

    /// Places the spring at `value` with no motion and an empty accumulator.
    pub fn reset_to(&mut self, value: f64) {
        self.value = value;
        self.prev_value = value;
        self.smooth_value = value;
        self.velocity = 0.0;
        self.clear_clock();
    }

    /// Ends the animation on the target.
    pub fn finish(&mut self) {
        self.value = self.to;
        self.smooth_value = self.to;
        self.velocity = 0.0;
        self.is_animating = false;
        self.clear_clock();
    }

    /// Distance left to travel.
    pub fn displacement(&self) -> f64 {
        self.to - self.value
    }

    /// True when both displacement and speed are under the precision.
    pub fn is_within_precision(&self) -> bool {
        self.displacement().abs() < self.precision && self.velocity.abs() < self.precision
    }

    fn clear_clock(&mut self) {
        self.time = 0.0;
        self.steps = 0;
    }
}

impl Default for SpringState {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}
