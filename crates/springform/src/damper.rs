//! Exponential damper: non-oscillating ease toward a target.
//!
//! A damper has no velocity state and no regime logic. It closes half of the
//! remaining distance every `halflife` time units, which is often all a call
//! site needs when velocity continuity does not matter.
//!
//! # Example
//!
//! ```rust
//! use springform::damper;
//!
//! let halfway = damper(0.0, 10.0, 0.5, 0.5);
//! assert!((halfway - 5.0).abs() < 1e-12);
//! ```

use core::f64::consts::LN_2;

use crate::math::{exp2, fast_neg_exp, lerp};
use crate::normalize::normalize_halflife;

/// Eases from `start` toward `end`, covering half the distance every
/// `halflife` time units.
///
/// `damper(start, end, halflife, t) = lerp(start, end, 1 - 2^(-t / halflife))`
///
/// The half-life is clamped to a small positive floor, so a zero half-life
/// jumps straight to `end` for any `t > 0`.
pub fn damper(start: f64, end: f64, halflife: f64, t: f64) -> f64 {
    let progress = 1.0 - exp2(-t / normalize_halflife(halflife));
    lerp(start, end, progress)
}

/// [`damper`] using the rational [`fast_neg_exp`] approximation.
///
/// Negative times are treated as `0`.
pub fn fast_damper(start: f64, end: f64, halflife: f64, t: f64) -> f64 {
    let x = LN_2 * t.max(0.0) / normalize_halflife(halflife);
    lerp(start, end, 1.0 - fast_neg_exp(x))
}

/// [`damper`] applied independently to each axis.
pub fn damper_n<const N: usize>(start: [f64; N], end: [f64; N], halflife: f64, t: f64) -> [f64; N] {
    let progress = 1.0 - exp2(-t / normalize_halflife(halflife));
    core::array::from_fn(|axis| lerp(start[axis], end[axis], progress))
}
