//! The simulated host and the frame loop that drives a spring.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use simple_spring::{Host, SpringBehavior, SpringSnapshot, SubscribeOptions, TickOutcome};
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::script::Step;

/// A host whose clock advances by a fixed delta each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedHost {
    dt: f64,
    frame: u64,
    elapsed: f64,
}

impl SimulatedHost {
    /// Creates a host at frame zero.
    pub const fn new(dt: f64) -> Self {
        Self {
            dt,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Frames completed so far.
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds since the first frame.
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn advance(&mut self) {
        self.frame += 1;
        self.elapsed += self.dt;
    }
}

impl Host for SimulatedHost {
    fn delta_time(&self) -> f64 {
        self.dt
    }
}

/// One line of simulator output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Record {
    /// An action was applied before `frame` ran.
    Action { frame: u64, action: String },
    /// State after a frame.
    Frame {
        frame: u64,
        time: f64,
        value: f64,
        velocity: f64,
        animating: bool,
    },
    /// The reached-target trigger fired during `frame`.
    Reached { frame: u64, value: f64 },
    /// The spring blew up during `frame` and was snapped to its target.
    Diverged { frame: u64 },
}

/// A spring attached to a [`SimulatedHost`].
pub struct Simulation {
    spring: SpringBehavior<SimulatedHost>,
    reached: Rc<Cell<bool>>,
    until_settled: bool,
}

impl Simulation {
    /// Builds a resting spring from resolved settings.
    pub fn new(config: &SimConfig) -> Self {
        let mut spring = SpringBehavior::attach(SimulatedHost::new(config.dt), config.spring);
        let reached = Rc::new(Cell::new(false));
        let flag = Rc::clone(&reached);
        spring.on_reached_target(Rc::new(move || flag.set(true)), SubscribeOptions::always());
        Self {
            spring,
            reached,
            until_settled: config.until_settled,
        }
    }

    /// The driven spring.
    pub const fn spring(&self) -> &SpringBehavior<SimulatedHost> {
        &self.spring
    }

    /// Restores spring state. The host clock is left alone.
    pub fn restore(&mut self, snapshot: &SpringSnapshot) {
        self.spring.load(snapshot);
        debug!(
            value = self.spring.value(),
            to = self.spring.to(),
            animating = self.spring.is_animating(),
            "restored snapshot"
        );
    }

    /// Captures the spring's durable state.
    pub fn snapshot(&self) -> SpringSnapshot {
        self.spring.save()
    }

    /// Runs every step in order.
    ///
    /// If no step ticks the host, `default_frames` frames are run after the
    /// last action.
    pub fn run(&mut self, steps: &[Step], default_frames: usize) -> Vec<Record> {
        let mut records = Vec::new();
        for step in steps {
            self.run_step(*step, &mut records);
        }
        if !steps.iter().any(|step| matches!(step, Step::Tick(_))) {
            self.run_step(Step::Tick(default_frames), &mut records);
        }
        info!(
            frames = self.spring.host().frame(),
            value = self.spring.value(),
            animating = self.spring.is_animating(),
            "simulation finished"
        );
        records
    }

    fn run_step(&mut self, step: Step, records: &mut Vec<Record>) {
        match step {
            Step::Action(action) => {
                debug!(%action, "applying action");
                action.apply(&mut self.spring);
                records.push(Record::Action {
                    frame: self.spring.host().frame(),
                    action: action.to_string(),
                });
            }
            Step::Tick(frames) => {
                for _ in 0..frames {
                    if self.until_settled && !self.spring.is_animating() {
                        break;
                    }
                    self.frame(records);
                }
            }
        }
    }

    fn frame(&mut self, records: &mut Vec<Record>) {
        let outcome = self.spring.update();
        self.spring.host_mut().advance();

        let host = self.spring.host();
        let frame = host.frame();
        records.push(Record::Frame {
            frame,
            time: host.elapsed(),
            value: self.spring.value(),
            velocity: self.spring.velocity(),
            animating: self.spring.is_animating(),
        });
        if self.reached.replace(false) {
            records.push(Record::Reached {
                frame,
                value: self.spring.value(),
            });
        }
        if outcome == TickOutcome::Diverged {
            records.push(Record::Diverged { frame });
        }
    }
}
