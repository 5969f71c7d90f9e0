//! Degree helpers for shortest-path rotation.

/// Degrees in a full turn.
pub const FULL_TURN: f64 = 360.0;

/// Wraps an angle into `[0, 360)`.
///
/// ```rust
/// use simple_spring::angle::normalize_degrees;
///
/// assert_eq!(normalize_degrees(-90.0), 270.0);
/// assert_eq!(normalize_degrees(720.0), 0.0);
/// ```
pub fn normalize_degrees(degrees: f64) -> f64 {
    let mut wrapped = degrees % FULL_TURN;
    if wrapped < 0.0 {
        wrapped += FULL_TURN;
    }
    // tiny negatives round up to a full turn
    if wrapped >= FULL_TURN {
        wrapped -= FULL_TURN;
    }
    wrapped
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
///
/// A half turn is reported as `+180`.
///
/// ```rust
/// use simple_spring::angle::shortest_delta;
///
/// assert_eq!(shortest_delta(350.0, 10.0), 20.0);
/// assert_eq!(shortest_delta(10.0, 350.0), -20.0);
/// ```
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let mut diff = normalize_degrees(to) - normalize_degrees(from);
    if diff > FULL_TURN / 2.0 {
        diff -= FULL_TURN;
    } else if diff <= -FULL_TURN / 2.0 {
        diff += FULL_TURN;
    }
    diff
}
