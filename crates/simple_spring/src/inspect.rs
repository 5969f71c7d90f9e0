//! Debugger view of a running spring.
//!
//! Editors show a behavior's live fields in a property panel and let the
//! user poke numbers while the game runs. Edits go through the same
//! sanitizing paths as the public API.

use std::fmt;

use crate::behavior::SpringBehavior;
use crate::error::{Result, SpringError};

/// Heading the properties are grouped under.
pub const DEBUG_SECTION: &str = "Simple Spring";

/// A value shown in the debugger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugValue {
    /// A flag.
    Bool(bool),
    /// A number.
    Number(f64),
}

impl fmt::Display for DebugValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One row of the debugger panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugProperty {
    /// Property name.
    pub name: &'static str,
    /// Current value.
    pub value: DebugValue,
    /// Whether [`SpringBehavior::edit_debug_property`] accepts it.
    pub editable: bool,
}

impl<H> SpringBehavior<H> {
    /// Lists the fields shown in the debugger, in display order.
    pub fn debug_properties(&self) -> Vec<DebugProperty> {
        let number = |name, value| DebugProperty {
            name,
            value: DebugValue::Number(value),
            editable: true,
        };
        vec![
            DebugProperty {
                name: "isAnimating",
                value: DebugValue::Bool(self.state.is_animating),
                editable: false,
            },
            number("currentValue", self.state.value),
            number("velocity", self.state.velocity),
            number("stiffness", self.state.stiffness),
            number("damping", self.state.damping),
        ]
    }

    /// Applies a debugger edit.
    ///
    /// Non-finite input leaves the field unchanged. Editing `currentValue`
    /// moves the spring without interpolating toward the new position.
    /// Position and velocity edits wake an idle spring so it returns to
    /// its target.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::UnknownProperty`] for names that are not
    /// editable.
    pub fn edit_debug_property(&mut self, name: &str, value: f64) -> Result<()> {
        let known = matches!(name, "currentValue" | "velocity" | "stiffness" | "damping");
        if !known {
            return Err(SpringError::UnknownProperty(name.to_string()));
        }
        if !value.is_finite() {
            return Ok(());
        }
        match name {
            "currentValue" => {
                self.state.value = value;
                self.state.prev_value = value;
                self.state.smooth_value = value;
                self.state.is_animating = true;
            }
            "velocity" => self.set_velocity(value),
            "stiffness" => self.set_stiffness(value),
            _ => self.set_damping(value),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_listed_in_order() {
        let spring = SpringBehavior::default();
        let names: Vec<_> = spring.debug_properties().iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            ["isAnimating", "currentValue", "velocity", "stiffness", "damping"]
        );
    }

    #[test]
    fn test_properties_reflect_state() {
        let mut spring = SpringBehavior::default();
        spring.spring_from_to(3.0, 9.0);
        let props = spring.debug_properties();
        assert_eq!(props[0].value, DebugValue::Bool(true));
        assert!(!props[0].editable);
        assert_eq!(props[1].value, DebugValue::Number(3.0));
        assert_eq!(props[3].value.to_string(), "0.15");
    }

    #[test]
    fn test_edit_current_value_resets_caches() {
        let mut spring = SpringBehavior::default();
        spring.edit_debug_property("currentValue", 12.0).unwrap();
        assert_eq!(spring.value(), 12.0);
        assert_eq!(spring.state().prev_value, 12.0);
    }

    #[test]
    fn test_edited_idle_spring_returns_to_target() {
        use crate::accumulator::FIXED_STEP;

        for (name, value) in [("currentValue", 12.0), ("velocity", 5.0)] {
            let mut spring = SpringBehavior::default();
            spring.edit_debug_property(name, value).unwrap();
            assert!(spring.is_animating(), "{name} edit left the spring idle");

            for _ in 0..2_000 {
                spring.tick(FIXED_STEP);
            }
            assert!(spring.has_reached_target(), "{name} edit never settled");
            assert_eq!(spring.value(), 0.0);
            assert_eq!(spring.velocity(), 0.0);
        }
    }

    #[test]
    fn test_edit_gains_clamp() {
        let mut spring = SpringBehavior::default();
        spring.edit_debug_property("stiffness", 4.0).unwrap();
        spring.edit_debug_property("damping", -4.0).unwrap();
        assert_eq!(spring.stiffness(), 1.0);
        assert_eq!(spring.damping(), 0.0);
    }

    #[test]
    fn test_edit_rejects_read_only_and_unknown() {
        let mut spring = SpringBehavior::default();
        assert_eq!(
            spring.edit_debug_property("isAnimating", 1.0),
            Err(SpringError::UnknownProperty("isAnimating".into()))
        );
        assert!(spring.edit_debug_property("mass", 1.0).is_err());
    }

    #[test]
    fn test_edit_ignores_non_finite() {
        let mut spring = SpringBehavior::default();
        spring.edit_debug_property("velocity", f64::NAN).unwrap();
        assert_eq!(spring.velocity(), 0.0);
    }
}
