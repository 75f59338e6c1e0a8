//! Settling-time estimation.
//!
//! Every regime decays inside an exponential envelope
//! `envelope · e^(-rate·t)`. Inverting it for a tolerance `epsilon` gives the
//! time after which the spring stays within `epsilon` of its target:
//!
//! ```text
//! t* = ln(envelope / epsilon) / rate
//! ```
//!
//! The rate is the slowest-decaying term: `half_damping` for under-damped
//! springs, `|λ1|` for over-damped ones. A critically damped spring decays
//! inside `(|c0| + |c1|·t)·e^(-h t)` instead, which is inverted with a few
//! Newton steps that approach the root from above. A spring whose envelope
//! never decays settles [`SettlingTime::Never`].

use core::f64::consts::E;
use core::fmt;
use core::time::Duration;

use crate::config::SpringConfig;
use crate::math::{abs, exp, ln};
use crate::normalize::normalize_epsilon;
use crate::solution::{Motion, Solution};

/// Outcome of a settling-time query.
///
/// Variants order by time, with `Never` after every finite time, so `>=`
/// reads as "settles no sooner than".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettlingTime {
    /// Settles within tolerance after this many time units (`>= 0`).
    After(f64),
    /// The envelope never decays below the tolerance.
    Never,
}

impl SettlingTime {
    /// Already within tolerance.
    pub const ZERO: Self = Self::After(0.0);

    /// The settling time, or `None` if the spring never settles.
    #[inline]
    pub fn as_secs(self) -> Option<f64> {
        match self {
            Self::After(t) => Some(t),
            Self::Never => None,
        }
    }

    /// The settling time, with `Never` mapped to `f64::INFINITY`.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.as_secs().unwrap_or(f64::INFINITY)
    }

    /// The settling time as a [`Duration`], treating time units as seconds.
    ///
    /// Returns `None` for `Never` or a time too large for `Duration`.
    pub fn as_duration(self) -> Option<Duration> {
        self.as_secs()
            .and_then(|t| Duration::try_from_secs_f64(t).ok())
    }

    /// True if the spring never settles.
    #[inline]
    pub fn is_never(self) -> bool {
        matches!(self, Self::Never)
    }

    /// The later of two settling times. `Never` dominates.
    pub fn max(self, other: Self) -> Self {
        match (self, other) {
            (Self::After(a), Self::After(b)) => Self::After(a.max(b)),
            _ => Self::Never,
        }
    }
}

impl fmt::Display for SettlingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::After(t) => write!(f, "{t}"),
            Self::Never => f.write_str("never"),
        }
    }
}

/// Inverts `envelope · e^(-rate·t) = epsilon`.
fn invert_envelope(envelope: f64, rate: f64, epsilon: f64) -> SettlingTime {
    if envelope <= epsilon {
        return SettlingTime::ZERO;
    }
    if !(rate > 0.0) {
        return SettlingTime::Never;
    }

    let t = ln(envelope / epsilon) / rate;
    if t.is_finite() {
        SettlingTime::After(t)
    } else {
        SettlingTime::Never
    }
}

/// Newton refinements of the critically damped settling time.
const NEWTON_STEPS: usize = 8;

/// Settling time of `(c0 + c1·t)·e^(-h t)`.
///
/// Every iterate is an upper bound on the true crossing: the log-envelope is
/// concave, so Newton steps started past the root never overshoot it.
fn critical_settle(c0: f64, c1: f64, h: f64, epsilon: f64) -> SettlingTime {
    let (a, b) = (abs(c0), abs(c1));

    if !(h > 0.0) {
        // Free particle: stays put only without velocity
        return if b == 0.0 && a <= epsilon {
            SettlingTime::ZERO
        } else {
            SettlingTime::Never
        };
    }

    // The envelope peaks at 1/h - a/b before decaying
    let peak_time = (1.0 / h - a / b).max(0.0);
    if (a + b * peak_time) * exp(-h * peak_time) <= epsilon {
        return SettlingTime::ZERO;
    }

    // t·e^(-h t / 2) <= 2 / (e·h) gives a pure exponential bound to start from
    let mut t = match invert_envelope(a + 2.0 * b / (E * h), h / 2.0, epsilon) {
        SettlingTime::After(t) => t,
        SettlingTime::Never => return SettlingTime::Never,
    };

    let ln_epsilon = ln(epsilon);
    for _ in 0..NEWTON_STEPS {
        let envelope = a + b * t;
        let excess = ln(envelope) - h * t - ln_epsilon;
        let slope = b / envelope - h;
        if !(excess < 0.0 && slope < 0.0) {
            break;
        }
        t -= excess / slope;
    }

    SettlingTime::After(t)
}

impl Solution {
    /// Time until the trajectory's envelope falls within `epsilon` of the
    /// target.
    ///
    /// Non-positive or NaN tolerances are clamped to
    /// [`PARAMETER_FLOOR`](crate::consts::PARAMETER_FLOOR).
    ///
    /// # Example
    ///
    /// ```rust
    /// use springform::{SettlingTime, SpringConfig};
    ///
    /// let solution = SpringConfig::from_halflife(0.5, 0.4).solve();
    /// let settle = solution.duration_until(0.01);
    /// assert!(settle.as_f64() > 0.0);
    ///
    /// // No damping: the oscillation never decays
    /// let undamped = SpringConfig::new(4.0, 0.0).solve();
    /// assert_eq!(undamped.duration_until(0.01), SettlingTime::Never);
    /// ```
    pub fn duration_until(&self, epsilon: f64) -> SettlingTime {
        let epsilon = normalize_epsilon(epsilon);
        let h = self.half_damping;

        let (envelope, rate) = match self.motion {
            Motion::Rest => return SettlingTime::ZERO,
            Motion::Underdamped { amplitude, .. } => (abs(amplitude), h),
            Motion::Critical { c0, c1 } => return critical_settle(c0, c1, h, epsilon),
            Motion::Overdamped {
                slow_rate,
                fast_rate,
                c0,
                c1,
            } => {
                if c0 == 0.0 {
                    (abs(c1), -fast_rate)
                } else {
                    (abs(c0) + abs(c1), -slow_rate)
                }
            }
        };

        invert_envelope(envelope, rate, epsilon)
    }
}

/// Time until `config` settles within `epsilon` of its target.
pub fn duration_until(config: &SpringConfig, epsilon: f64) -> SettlingTime {
    Solution::new(config).duration_until(epsilon)
}
