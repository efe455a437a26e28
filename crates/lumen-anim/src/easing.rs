//! Quadratic easing curves.
//!
//! Every curve maps `(current, start, delta, total)` to a value that moves
//! from `start` toward `start + delta` as `current` goes from 0 to `total`.

use serde::{Deserialize, Serialize};

/// Constant speed.
pub fn linear(current: f64, start: f64, delta: f64, total: f64) -> f64 {
    delta * current / total + start
}

/// Accelerate from rest.
pub fn ease_in(current: f64, start: f64, delta: f64, total: f64) -> f64 {
    let t = current / total;
    delta * t * t + start
}

/// Decelerate to rest.
pub fn ease_out(current: f64, start: f64, delta: f64, total: f64) -> f64 {
    let t = current / total;
    -delta * t * (t - 2.0) + start
}

/// Accelerate through the first half, decelerate through the second.
pub fn ease_in_out(current: f64, start: f64, delta: f64, total: f64) -> f64 {
    let mut t = current / (total / 2.0);
    if t < 1.0 {
        return delta / 2.0 * t * t + start;
    }
    t -= 1.0;
    -delta / 2.0 * (t * (t - 2.0) - 1.0) + start
}

/// Selectable easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// [`linear`]
    #[default]
    Linear,
    /// [`ease_in`]
    EaseIn,
    /// [`ease_out`]
    EaseOut,
    /// [`ease_in_out`]
    EaseInOut,
}

impl Easing {
    /// Evaluate the curve.
    pub fn apply(self, current: f64, start: f64, delta: f64, total: f64) -> f64 {
        let f = match self {
            Easing::Linear => linear,
            Easing::EaseIn => ease_in,
            Easing::EaseOut => ease_out,
            Easing::EaseInOut => ease_in_out,
        };
        f(current, start, delta, total)
    }
}
