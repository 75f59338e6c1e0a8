//! Conversions between spring parameterizations.
//!
//! Every spring is ultimately described by a `(stiffness, damping)` pair.
//! Designers usually think in other terms, so this module converts from
//! half-life, damping ratio and frequency into that canonical pair and back.
//!
//! All functions are total: out-of-range and non-finite inputs are clamped
//! to the nearest usable value instead of producing NaN or infinity. Inputs
//! outside the physical range have no correct answer, so the clamped result
//! is a documented approximation.
//!
//! # Example
//!
//! ```rust
//! use springform::normalize::{damping_from_halflife, stiffness_from_damping_ratio};
//!
//! let damping = damping_from_halflife(0.25);
//! let stiffness = stiffness_from_damping_ratio(0.5, damping);
//! assert!(stiffness > damping * damping / 4.0); // under-damped
//! ```

use core::f64::consts::{LN_2, PI};

use crate::consts::{PARAMETER_FLOOR, PARAMETER_LIMIT};
use crate::math::{sqrt, square};

const TWO_LN_2: f64 = 2.0 * LN_2;
const TAU: f64 = 2.0 * PI;

/// Clamps a non-negative parameter into `[0, PARAMETER_LIMIT]`. NaN maps to 0.
#[inline]
fn clamp_non_negative(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, PARAMETER_LIMIT)
    }
}

/// Clamps a divisor into `[PARAMETER_FLOOR, PARAMETER_LIMIT]`. NaN maps to the floor.
#[inline]
fn clamp_divisor(x: f64) -> f64 {
    if x.is_nan() {
        PARAMETER_FLOOR
    } else {
        x.clamp(PARAMETER_FLOOR, PARAMETER_LIMIT)
    }
}

/// Clamps stiffness into `[0, PARAMETER_LIMIT]`.
#[inline]
pub fn normalize_stiffness(stiffness: f64) -> f64 {
    clamp_non_negative(stiffness)
}

/// Clamps damping into `[0, PARAMETER_LIMIT]`.
#[inline]
pub fn normalize_damping(damping: f64) -> f64 {
    clamp_non_negative(damping)
}

/// Clamps a half-life to at least [`PARAMETER_FLOOR`].
///
/// An infinite half-life is kept: it describes a spring with no damping.
#[inline]
pub fn normalize_halflife(halflife: f64) -> f64 {
    if halflife.is_nan() {
        PARAMETER_FLOOR
    } else {
        halflife.max(PARAMETER_FLOOR)
    }
}

/// Clamps a damping ratio into `[0, PARAMETER_LIMIT]`. NaN maps to 1 (critical).
///
/// Ratios above 1 are kept: over-damped motion is physically valid.
#[inline]
pub fn normalize_damping_ratio(damping_ratio: f64) -> f64 {
    if damping_ratio.is_nan() {
        1.0
    } else {
        damping_ratio.clamp(0.0, PARAMETER_LIMIT)
    }
}

/// Clamps a frequency into `[0, PARAMETER_LIMIT]`.
#[inline]
pub fn normalize_frequency(frequency: f64) -> f64 {
    clamp_non_negative(frequency)
}

/// Clamps a settling tolerance to at least [`PARAMETER_FLOOR`].
#[inline]
pub fn normalize_epsilon(epsilon: f64) -> f64 {
    clamp_divisor(epsilon)
}

/// Damping whose decay envelope halves every `halflife` time units.
///
/// `damping = 2·ln(2) / halflife`
pub fn damping_from_halflife(halflife: f64) -> f64 {
    normalize_damping(TWO_LN_2 / normalize_halflife(halflife))
}

/// Half-life of the decay envelope produced by `damping`.
///
/// Zero damping is floored, giving a very long but finite half-life.
pub fn halflife_from_damping(damping: f64) -> f64 {
    TWO_LN_2 / clamp_divisor(damping)
}

/// Stiffness at which `damping` is the given fraction of critical damping.
///
/// `stiffness = (damping / (2·ratio))²`
pub fn stiffness_from_damping_ratio(damping_ratio: f64, damping: f64) -> f64 {
    let ratio = clamp_divisor(normalize_damping_ratio(damping_ratio));
    normalize_stiffness(square(normalize_damping(damping) / (2.0 * ratio)))
}

/// Damping that gives `stiffness` the requested damping ratio.
///
/// `damping = 2·ratio·sqrt(stiffness)`
pub fn damping_from_damping_ratio(damping_ratio: f64, stiffness: f64) -> f64 {
    normalize_damping(
        2.0 * normalize_damping_ratio(damping_ratio) * sqrt(normalize_stiffness(stiffness)),
    )
}

/// Damping ratio of a `(stiffness, damping)` pair. 1 is critical.
pub fn damping_ratio(stiffness: f64, damping: f64) -> f64 {
    normalize_damping_ratio(
        normalize_damping(damping) / (2.0 * sqrt(clamp_divisor(stiffness))),
    )
}

/// Stiffness of a spring whose undamped oscillation has `frequency` cycles
/// per time unit.
///
/// `stiffness = (2π·frequency)²`
pub fn stiffness_from_frequency(frequency: f64) -> f64 {
    normalize_stiffness(square(TAU * normalize_frequency(frequency)))
}

/// Undamped frequency, in cycles per time unit, of a spring with `stiffness`.
pub fn frequency_from_stiffness(stiffness: f64) -> f64 {
    sqrt(normalize_stiffness(stiffness)) / TAU
}

/// Half-life that critically damps a spring oscillating at `frequency`.
pub fn critical_halflife(frequency: f64) -> f64 {
    let stiffness = stiffness_from_frequency(frequency);
    halflife_from_damping(damping_from_damping_ratio(1.0, stiffness))
}

/// Frequency that is critically damped by a spring with `halflife`.
pub fn critical_frequency(halflife: f64) -> f64 {
    let damping = damping_from_halflife(halflife);
    frequency_from_stiffness(stiffness_from_damping_ratio(1.0, damping))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_halflife_round_trip() {
        for halflife in [0.01, 0.25, 1.0, 7.5, 1000.0] {
            let damping = damping_from_halflife(halflife);
            assert!(approx_eq(halflife_from_damping(damping), halflife));
        }
    }

    #[test]
    fn test_damping_from_halflife_value() {
        assert!(approx_eq(damping_from_halflife(1.0), 2.0 * LN_2));
    }

    #[test]
    fn test_damping_ratio_round_trip() {
        let damping = 3.0;
        for ratio in [0.1, 0.5, 1.0, 2.0, 10.0] {
            let stiffness = stiffness_from_damping_ratio(ratio, damping);
            assert!(approx_eq(damping_ratio(stiffness, damping), ratio));
            assert!(approx_eq(damping_from_damping_ratio(ratio, stiffness), damping));
        }
    }

    #[test]
    fn test_ratio_one_is_critical() {
        let damping = 4.0;
        let stiffness = stiffness_from_damping_ratio(1.0, damping);
        assert!(approx_eq(stiffness, square(damping / 2.0)));
    }

    #[test]
    fn test_frequency_round_trip() {
        for frequency in [0.0, 0.5, 1.0, 60.0] {
            let stiffness = stiffness_from_frequency(frequency);
            assert!(approx_eq(frequency_from_stiffness(stiffness), frequency));
        }
        assert!(approx_eq(stiffness_from_frequency(1.0), square(TAU)));
    }

    #[test]
    fn test_critical_halflife_and_frequency_are_inverse() {
        for frequency in [0.1, 1.0, 4.0] {
            let halflife = critical_halflife(frequency);
            assert!(approx_eq(critical_frequency(halflife), frequency));
        }
    }

    #[test]
    fn test_negative_inputs_clamped() {
        assert_eq!(normalize_stiffness(-5.0), 0.0);
        assert_eq!(normalize_damping(-0.1), 0.0);
        assert_eq!(normalize_halflife(-1.0), PARAMETER_FLOOR);
        assert_eq!(normalize_damping_ratio(-2.0), 0.0);
        assert_eq!(stiffness_from_frequency(-3.0), 0.0);
    }

    #[test]
    fn test_overdamped_ratio_not_clamped() {
        assert_eq!(normalize_damping_ratio(3.5), 3.5);
    }

    #[test]
    fn test_non_finite_inputs_stay_finite() {
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -0.0] {
            assert!(damping_from_halflife(x).is_finite(), "halflife={x}");
            assert!(halflife_from_damping(x).is_finite(), "damping={x}");
            assert!(stiffness_from_damping_ratio(x, 1.0).is_finite(), "ratio={x}");
            assert!(stiffness_from_damping_ratio(1.0, x).is_finite(), "damping={x}");
            assert!(damping_from_damping_ratio(x, 1.0).is_finite(), "ratio={x}");
            assert!(damping_ratio(x, 1.0).is_finite(), "stiffness={x}");
            assert!(stiffness_from_frequency(x).is_finite(), "frequency={x}");
            assert!(frequency_from_stiffness(x).is_finite(), "stiffness={x}");
            assert!(normalize_epsilon(x).is_finite(), "epsilon={x}");
        }
    }

    #[test]
    fn test_infinite_halflife_means_no_damping() {
        assert_eq!(damping_from_halflife(f64::INFINITY), 0.0);
    }
}
