//! Default parameters and numeric tolerances.
//!
//! These are plain constants: nothing in the crate mutates them at runtime.

use core::f64::consts::LN_2;

/// Default initial position.
pub const DEFAULT_POSITION: f64 = 0.0;

/// Default initial velocity.
pub const DEFAULT_VELOCITY: f64 = 0.0;

/// Default target (equilibrium) position.
pub const DEFAULT_TARGET: f64 = 1.0;

/// Default half-life of the decay envelope.
///
/// Long enough that an unconfigured spring barely moves.
pub const DEFAULT_HALFLIFE: f64 = 1000.0;

/// Damping derived from [`DEFAULT_HALFLIFE`].
pub const DEFAULT_DAMPING: f64 = 2.0 * LN_2 / DEFAULT_HALFLIFE;

/// Stiffness that critically damps [`DEFAULT_DAMPING`].
pub const DEFAULT_STIFFNESS: f64 = (DEFAULT_DAMPING / 2.0) * (DEFAULT_DAMPING / 2.0);

/// Default settling tolerance used by [`SpringConfig::duration`](crate::SpringConfig::duration).
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Relative tolerance for classifying the discriminant as zero.
///
/// The discriminant is compared against `REGIME_EPSILON * (half_damping² + stiffness)`.
pub const REGIME_EPSILON: f64 = 1e-9;

/// Smallest positive value accepted where a parameter is used as a divisor
/// (half-life, damping ratio, epsilon).
pub const PARAMETER_FLOOR: f64 = 1e-12;

/// Largest value accepted for stiffness, damping and damping ratio.
///
/// Keeps squares and products of parameters finite.
pub const PARAMETER_LIMIT: f64 = 1e100;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::exp;

    #[test]
    fn test_default_spring_is_critical() {
        let half = DEFAULT_DAMPING / 2.0;
        assert!((half * half - DEFAULT_STIFFNESS).abs() <= REGIME_EPSILON * DEFAULT_STIFFNESS);
    }

    #[test]
    fn test_default_damping_matches_halflife() {
        let envelope = exp(-DEFAULT_DAMPING / 2.0 * DEFAULT_HALFLIFE);
        assert!((envelope - 0.5).abs() < 1e-12);
    }
}
