//! Tag-keyed subscriber registry.
//!
//! A spring has a single trigger, [`REACHED_TARGET`], but the dispatcher is
//! generic over tags so hosts can route their own signals through the same
//! registry.
//!
//! Subscribers can be gated by a condition: when a subscription carries
//! parameters, the dispatcher asks the injected [`ConditionFn`] whether the
//! tag's condition holds for those parameters before running the callback.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use simple_spring::events::{Callback, EventDispatcher, SubscribeOptions};
//!
//! let hits = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&hits);
//! let callback: Callback = Rc::new(move || counter.set(counter.get() + 1));
//!
//! let mut events = EventDispatcher::default();
//! events.on("landed", Rc::clone(&callback), SubscribeOptions::once());
//! events.dispatch("landed");
//! events.dispatch("landed");
//! assert_eq!(hits.get(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Tag fired when a spring settles on its target.
pub const REACHED_TARGET: &str = "OnReachedTarget";

/// A subscriber callback. Identity is the `Rc` allocation.
pub type Callback = Rc<dyn Fn()>;

/// Evaluates the condition behind a tag for some parameters.
///
/// Returns `None` when the tag has no condition, which lets the callback run.
pub type ConditionFn = Box<dyn Fn(&str, &[f64]) -> Option<bool>>;

/// Per-subscription options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscribeOptions {
    /// Parameters for the tag's condition. `None` skips the check.
    pub params: Option<Vec<f64>>,
    /// Remove the subscription after it fires once.
    pub once: bool,
}

impl SubscribeOptions {
    /// Fires every time, no condition check.
    pub fn always() -> Self {
        Self::default()
    }

    /// Fires a single time.
    pub fn once() -> Self {
        Self {
            params: None,
            once: true,
        }
    }

    /// Gates the subscription on the tag's condition with these parameters.
    pub fn with_params(mut self, params: impl Into<Vec<f64>>) -> Self {
        self.params = Some(params.into());
        self
    }
}

struct Subscriber {
    callback: Callback,
    options: SubscribeOptions,
}

/// Registry of callbacks keyed by tag, fired in registration order.
pub struct EventDispatcher {
    subscribers: HashMap<String, Vec<Subscriber>>,
    conditions: ConditionFn,
}

impl EventDispatcher {
    /// Creates a dispatcher that consults `conditions` for gated subscribers.
    pub fn new(conditions: ConditionFn) -> Self {
        Self {
            subscribers: HashMap::new(),
            conditions,
        }
    }

    /// Appends a subscriber to `tag`.
    pub fn on(&mut self, tag: impl Into<String>, callback: Callback, options: SubscribeOptions) {
        self.subscribers
            .entry(tag.into())
            .or_default()
            .push(Subscriber { callback, options });
    }

    /// Removes every subscription of `callback` under `tag`.
    pub fn off(&mut self, tag: &str, callback: &Callback) {
        if let Some(list) = self.subscribers.get_mut(tag) {
            list.retain(|sub| !same_callback(&sub.callback, callback));
        }
    }

    /// Runs the subscribers of `tag` in order. Returns how many ran.
    pub fn dispatch(&mut self, tag: &str) -> usize {
        let Some(list) = self.subscribers.get(tag) else {
            return 0;
        };

        let mut fired = 0;
        let mut spent: Vec<Callback> = Vec::new();
        for sub in list {
            if let Some(params) = &sub.options.params {
                if (self.conditions)(tag, params) == Some(false) {
                    continue;
                }
            }
            (sub.callback)();
            fired += 1;
            if sub.options.once {
                spent.push(Rc::clone(&sub.callback));
            }
        }

        for callback in &spent {
            self.off(tag, callback);
        }
        fired
    }

    /// Number of subscriptions under `tag`.
    pub fn subscriber_count(&self, tag: &str) -> usize {
        self.subscribers.get(tag).map_or(0, Vec::len)
    }

    /// Drops every subscription.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl Default for EventDispatcher {
    /// A dispatcher with no known conditions; gated subscribers always run.
    fn default() -> Self {
        Self::new(Box::new(|_: &str, _: &[f64]| None))
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .subscribers
            .iter()
            .map(|(tag, list)| (tag.as_str(), list.len()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("subscribers", &counts)
            .finish_non_exhaustive()
    }
}

fn same_callback(a: &Callback, b: &Callback) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
