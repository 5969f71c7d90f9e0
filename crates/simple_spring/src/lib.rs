#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

//! # Simple Spring
//!
//! A numeric spring you attach to an object in a real-time application to
//! animate one scalar (a coordinate, an angle, an opacity) toward a target.
//!
//! Simple Spring provides:
//! - **Fixed-timestep physics**: a 60 Hz integrator fed by any frame rate,
//!   with the shown value interpolated between steps
//! - **Velocity inheritance**: retargeting a moving spring redirects it
//!   without losing momentum
//! - **Shortest-path angles**: rotations wrap the short way around
//! - **Settle trigger**: a "reached target" event fired once per arrival
//! - **Snapshots**: flat save/restore of the durable state
//!
//! ## Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use simple_spring::{SpringBehavior, SpringConfig, SubscribeOptions};
//!
//! let mut spring = SpringBehavior::new(SpringConfig::default());
//!
//! let arrived = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&arrived);
//! spring.on_reached_target(Rc::new(move || flag.set(true)), SubscribeOptions::once());
//!
//! spring.spring_from_to(0.0, 100.0);
//!
//! // Host loop at 144 Hz; physics still runs at 60 Hz
//! for _ in 0..600 {
//!     spring.tick(1.0 / 144.0);
//!     let _shown = spring.value();
//! }
//!
//! assert!(arrived.get());
//! assert_eq!(spring.value(), 100.0);
//! ```
//!
//! ## Tuning
//!
//! Both gains are dimensionless and apply once per physics step:
//!
//! - **Stiffness** (0.01 to 1): fraction of the remaining distance added to
//!   velocity each step. Higher responds faster.
//! - **Damping** (0 to 1): fraction of velocity kept each step. Lower
//!   overshoots less; 0 stops all motion.

pub mod accumulator;
pub mod angle;
pub mod behavior;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod inspect;
pub mod integrator;
pub mod snapshot;
pub mod state;

pub use accumulator::{FIXED_STEP, MAX_FRAME_DELTA, PHYSICS_RATE, TimeAccumulator};
pub use behavior::{Behavior, Host, SpringBehavior, TickOutcome};
pub use commands::{Action, Condition, Expression};
pub use config::{PROPERTIES, PropertyDef, SpringConfig};
pub use error::{Result, SpringError};
pub use events::{Callback, ConditionFn, EventDispatcher, REACHED_TARGET, SubscribeOptions};
pub use inspect::{DEBUG_SECTION, DebugProperty, DebugValue};
pub use snapshot::SpringSnapshot;
pub use state::SpringState;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::behavior::{Behavior, Host, SpringBehavior, TickOutcome};
    pub use crate::commands::{Action, Condition, Expression};
    pub use crate::config::SpringConfig;
    pub use crate::events::{Callback, REACHED_TARGET, SubscribeOptions};
    pub use crate::snapshot::SpringSnapshot;
}
