//! The attachable spring behavior.
//!
//! [`SpringBehavior`] owns one [`SpringState`] and drives it: commands
//! retarget or nudge the spring, [`tick`](SpringBehavior::tick) advances it
//! by one host frame, and the queries read it back.
//!
//! # Frame order
//!
//! Within one frame a host should apply its commands, then tick, then read
//! [`value`](SpringBehavior::value). The behavior does not enforce this.
//!
//! # Example
//!
//! ```rust
//! use simple_spring::{SpringBehavior, SpringConfig};
//!
//! let mut spring = SpringBehavior::new(SpringConfig::default());
//! spring.spring_from_to(0.0, 100.0);
//!
//! while spring.is_animating() {
//!     spring.tick(1.0 / 60.0);
//! }
//!
//! assert_eq!(spring.value(), 100.0);
//! assert!(spring.has_reached_target());
//! ```

use tracing::{debug, warn};

use crate::accumulator::TimeAccumulator;
use crate::angle::{normalize_degrees, shortest_delta};
use crate::config::{SpringConfig, clamp_damping, clamp_stiffness};
use crate::events::{Callback, ConditionFn, EventDispatcher, REACHED_TARGET, SubscribeOptions};
use crate::state::SpringState;

/// Something a behavior can be attached to.
///
/// The host owns the clock; the behavior only asks how long the last frame
/// took.
pub trait Host {
    /// Seconds elapsed since the previous frame.
    fn delta_time(&self) -> f64;
}

/// Per-frame contract shared by attachable behaviors.
pub trait Behavior {
    /// Advances the behavior by `dt` seconds of host time.
    fn tick(&mut self, dt: f64) -> TickOutcome;

    /// Whether the behavior still needs ticks.
    fn is_active(&self) -> bool;
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The spring was at rest; nothing changed.
    Idle,
    /// The spring moved and is still animating.
    Running,
    /// The spring arrived and the reached-target trigger fired.
    Settled,
    /// The spring blew up and was forced onto its target without a trigger.
    Diverged,
}

/// A damped spring animating one scalar, attached to a host `H`.
pub struct SpringBehavior<H = ()> {
    host: H,
    pub(crate) state: SpringState,
    accumulator: TimeAccumulator,
    events: EventDispatcher,
}

impl SpringBehavior<()> {
    /// Creates a detached behavior.
    pub fn new(config: SpringConfig) -> Self {
        Self::attach((), config)
    }
}

impl Default for SpringBehavior<()> {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}

impl<H> SpringBehavior<H> {
    /// Attaches a new, idle spring to `host`.
    pub fn attach(host: H, config: SpringConfig) -> Self {
        Self::with_conditions(host, config, Box::new(trigger_conditions))
    }

    /// Attaches a spring whose event dispatcher uses `conditions` to gate
    /// parameterized subscriptions.
    pub fn with_conditions(host: H, config: SpringConfig, conditions: ConditionFn) -> Self {
        let state = SpringState::new(config);
        debug!(
            stiffness = state.stiffness,
            damping = state.damping,
            precision = state.precision,
            "spring attached"
        );
        Self {
            host,
            state,
            accumulator: TimeAccumulator::new(),
            events: EventDispatcher::new(conditions),
        }
    }

    // ---------------------------------------------------------------------
    // Host handle
    // ---------------------------------------------------------------------

    /// The object this behavior is attached to.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host object.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Detaches the behavior, handing the host back.
    pub fn into_host(self) -> H {
        self.host
    }

    // ---------------------------------------------------------------------
    // Animation controller
    // ---------------------------------------------------------------------

    /// Advances the spring by one host frame of `dt` seconds.
    ///
    /// Does nothing while idle. Otherwise runs the owed fixed-rate steps,
    /// then either finishes on divergence (silently), finishes on arrival
    /// (firing [`REACHED_TARGET`] once), or keeps running.
    pub fn tick(&mut self, dt: f64) -> TickOutcome {
        if !self.state.is_animating {
            return TickOutcome::Idle;
        }

        self.accumulator.advance(&mut self.state, dt);

        if !self.state.value.is_finite() {
            warn!(
                to = self.state.to,
                velocity = self.state.velocity,
                "spring diverged, forcing it onto its target"
            );
            self.finish();
            return TickOutcome::Diverged;
        }

        if self.state.is_within_precision() {
            self.finish();
            debug!(to = self.state.to, "spring reached target");
            self.events.dispatch(REACHED_TARGET);
            return TickOutcome::Settled;
        }

        TickOutcome::Running
    }

    fn finish(&mut self) {
        self.state.finish();
    }

    // ---------------------------------------------------------------------
    // Retargeting
    // ---------------------------------------------------------------------

    /// Springs from `from` toward `to`.
    ///
    /// An idle spring is first placed at `from`. A running spring keeps its
    /// position and velocity and is only redirected, so repeated retargets
    /// produce continuous motion. Non-finite arguments are ignored.
    pub fn spring_from_to(&mut self, from: f64, to: f64) {
        if !from.is_finite() || !to.is_finite() {
            warn!(from, to, "ignoring retarget with a non-finite endpoint");
            return;
        }
        if !self.state.is_animating {
            self.state.reset_to(from);
        }
        self.state.from = from;
        self.state.to = to;
        self.state.is_animating = true;
        debug!(from, to, value = self.state.value, velocity = self.state.velocity, "retarget");
    }

    /// Springs an angle in degrees along the shortest rotation.
    ///
    /// The rotation is applied as an offset from the spring's current
    /// position, so a running spring that has wandered past 360 keeps
    /// turning the short way. Non-finite arguments are ignored.
    pub fn spring_from_to_angle(&mut self, from: f64, to: f64) {
        if !from.is_finite() || !to.is_finite() {
            warn!(from, to, "ignoring angle retarget with a non-finite endpoint");
            return;
        }
        let start = normalize_degrees(from);
        let delta = shortest_delta(from, to);

        if !self.state.is_animating {
            self.state.reset_to(start);
        }
        self.state.from = self.state.value;
        self.state.to = self.state.value + delta;
        self.state.is_animating = true;
        debug!(from = self.state.from, to = self.state.to, delta, "angle retarget");
    }

    /// Sets the stiffness, clamped into `[0.01, 1]`.
    pub fn set_stiffness(&mut self, stiffness: f64) {
        self.state.stiffness = clamp_stiffness(stiffness);
    }

    /// Sets the damping, clamped into `[0, 1]`.
    pub fn set_damping(&mut self, damping: f64) {
        self.state.damping = clamp_damping(damping);
    }

    /// Stops the animation on its target.
    ///
    /// Equivalent to [`snap_to_target`](Self::snap_to_target). Use
    /// [`stop_in_place`](Self::stop_in_place) to freeze where the spring is.
    pub fn stop(&mut self) {
        debug!(to = self.state.to, "stop");
        self.finish();
    }

    /// Freezes the spring at the value currently shown.
    ///
    /// The target is moved to that value, so the spring is at rest on its
    /// target afterwards. No trigger fires.
    pub fn stop_in_place(&mut self) {
        let here = self.state.smooth_value;
        debug!(at = here, "stop in place");
        self.state.to = here;
        self.finish();
    }

    /// Jumps straight to the target and stops.
    pub fn snap_to_target(&mut self) {
        debug!(to = self.state.to, "snap to target");
        self.finish();
    }

    /// Replaces the velocity and starts animating toward the current target.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.state.velocity = velocity;
        self.state.is_animating = true;
    }

    /// Adds to the velocity and starts animating toward the current target.
    pub fn add_to_velocity(&mut self, delta: f64) {
        self.state.velocity += delta;
        self.state.is_animating = true;
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Whether the spring is in motion.
    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    /// Whether the spring is at rest within precision of its target.
    pub fn has_reached_target(&self) -> bool {
        !self.state.is_animating && (self.state.value - self.state.to).abs() < self.state.precision
    }

    /// The smoothed value to render this frame.
    pub fn value(&self) -> f64 {
        self.state.smooth_value
    }

    /// Start of the current animation.
    pub fn from(&self) -> f64 {
        self.state.from
    }

    /// Target of the current animation.
    pub fn to(&self) -> f64 {
        self.state.to
    }

    /// Velocity in units per physics step.
    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Current stiffness.
    pub fn stiffness(&self) -> f64 {
        self.state.stiffness
    }

    /// Current damping.
    pub fn damping(&self) -> f64 {
        self.state.damping
    }

    /// Settle threshold, fixed at construction.
    pub fn precision(&self) -> f64 {
        self.state.precision
    }

    /// Read-only view of every simulation field.
    pub fn state(&self) -> &SpringState {
        &self.state
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    /// Subscribes to the reached-target trigger.
    pub fn on_reached_target(&mut self, callback: Callback, options: SubscribeOptions) {
        self.events.on(REACHED_TARGET, callback, options);
    }

    /// The behavior's event dispatcher.
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Mutable access to the event dispatcher.
    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }
}

impl<H: Host> SpringBehavior<H> {
    /// Ticks using the host's own frame delta.
    pub fn update(&mut self) -> TickOutcome {
        let dt = self.host.delta_time();
        self.tick(dt)
    }
}

impl<H> Behavior for SpringBehavior<H> {
    fn tick(&mut self, dt: f64) -> TickOutcome {
        Self::tick(self, dt)
    }

    fn is_active(&self) -> bool {
        self.state.is_animating
    }
}

impl<H: std::fmt::Debug> std::fmt::Debug for SpringBehavior<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpringBehavior")
            .field("host", &self.host)
            .field("state", &self.state)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

/// Default condition table: the reached-target trigger always holds.
fn trigger_conditions(tag: &str, _params: &[f64]) -> Option<bool> {
    (tag == REACHED_TARGET).then_some(true)
}
