//! Closed-form solution of the damped harmonic oscillator.
//!
//! The motion of a unit-mass spring with displacement `x` from its target
//! obeys `x'' + damping·x' + stiffness·x = 0`. With `h = damping / 2` and the
//! discriminant `D = h² - stiffness`, the solution takes one of three forms:
//!
//! - **Under-damped (D < 0)**: `x(t) = A·e^(-h t)·cos(ω t + φ)` with
//!   `ω = sqrt(-D)`
//! - **Critically damped (D = 0)**: `x(t) = (c0 + c1 t)·e^(-h t)`
//! - **Over-damped (D > 0)**: `x(t) = c0·e^(λ1 t) + c1·e^(λ2 t)` with
//!   `λ = -h ± sqrt(D)`
//!
//! [`Solution::new`] classifies the regime and derives the two constants
//! from the initial position and velocity once; evaluating position and
//! velocity afterwards is O(1) with no iteration.

use tracing::trace;

use crate::config::SpringConfig;
use crate::consts::REGIME_EPSILON;
use crate::math::{atan2, cos, exp, sin, sqrt, square};

/// Damping regime of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Regime {
    /// Oscillates around the target with a decaying envelope.
    Underdamped,
    /// Fastest approach to the target without oscillating.
    Critical,
    /// Approaches the target slowly along two real decay rates.
    Overdamped,
}

impl Regime {
    /// Classifies a `(half_damping, stiffness)` pair.
    ///
    /// The discriminant is treated as zero within
    /// `REGIME_EPSILON · (half_damping² + stiffness)`, so configurations that
    /// are critical up to floating-point noise do not flip between branches.
    pub fn classify(half_damping: f64, stiffness: f64) -> Self {
        let half_damping_sq = square(half_damping);
        let discriminant = half_damping_sq - stiffness;
        let tolerance = REGIME_EPSILON * (half_damping_sq + stiffness);

        if discriminant < -tolerance {
            Self::Underdamped
        } else if discriminant > tolerance {
            Self::Overdamped
        } else {
            Self::Critical
        }
    }

    /// Returns the lowercase name of the regime.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Underdamped => "underdamped",
            Self::Critical => "critical",
            Self::Overdamped => "overdamped",
        }
    }
}

impl core::fmt::Display for Regime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regime-specific constants of the closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Motion {
    /// Starts on the target with no velocity and never moves.
    Rest,
    Underdamped {
        frequency: f64,
        amplitude: f64,
        phase: f64,
    },
    Critical {
        c0: f64,
        c1: f64,
    },
    Overdamped {
        /// `λ1`, the root closer to zero.
        slow_rate: f64,
        /// `λ2`.
        fast_rate: f64,
        c0: f64,
        c1: f64,
    },
}

/// Derived state of a [`SpringConfig`]: the regime and the constants of its
/// closed-form trajectory.
///
/// A `Solution` is immutable and cheap to copy. Build it once per
/// configuration and evaluate it at as many times as needed.
///
/// # Example
///
/// ```rust
/// use springform::{Regime, SpringConfig};
///
/// let solution = SpringConfig::new(1.0, 2.0).solve();
/// assert_eq!(solution.regime(), Regime::Critical);
///
/// // Sample the curve, e.g. one value per rendered column
/// let curve: Vec<f64> = (0..100).map(|i| solution.position_at(i as f64 * 0.1)).collect();
/// assert_eq!(curve[0], 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub(crate) target: f64,
    pub(crate) delta: f64,
    pub(crate) half_damping: f64,
    pub(crate) discriminant: f64,
    pub(crate) regime: Regime,
    pub(crate) motion: Motion,
}

impl Solution {
    /// Classifies the regime of `config` and derives its coefficients.
    pub fn new(config: &SpringConfig) -> Self {
        let target = config.target();
        let delta = config.delta();
        let velocity = config.velocity();
        let stiffness = config.stiffness();
        let half_damping = config.half_damping();
        let discriminant = square(half_damping) - stiffness;
        let regime = Regime::classify(half_damping, stiffness);

        let motion = if config.is_at_rest() {
            Motion::Rest
        } else {
            match regime {
                Regime::Underdamped => Self::under_damped(delta, velocity, half_damping, discriminant),
                Regime::Critical => Self::critically_damped(delta, velocity, half_damping),
                Regime::Overdamped => {
                    Self::over_damped(delta, velocity, half_damping, stiffness, discriminant)
                }
            }
        };

        trace!(
            spring.regime = %regime,
            spring.discriminant = discriminant,
            spring.at_rest = matches!(motion, Motion::Rest),
            "Spring solved"
        );

        Self {
            target,
            delta,
            half_damping,
            discriminant,
            regime,
            motion,
        }
    }

    /// Computes amplitude and phase for an under-damped spring (D < 0).
    fn under_damped(delta: f64, velocity: f64, half_damping: f64, discriminant: f64) -> Motion {
        let frequency = sqrt(-discriminant);
        // Sine coefficient of the decaying oscillation
        let sine_term = (velocity + delta * half_damping) / frequency;

        Motion::Underdamped {
            frequency,
            amplitude: sqrt(square(sine_term) + square(delta)),
            phase: atan2(-sine_term, delta),
        }
    }

    /// Computes constants for a critically damped spring (D ≈ 0).
    fn critically_damped(delta: f64, velocity: f64, half_damping: f64) -> Motion {
        Motion::Critical {
            c0: delta,
            c1: velocity + delta * half_damping,
        }
    }

    /// Computes roots and constants for an over-damped spring (D > 0).
    fn over_damped(
        delta: f64,
        velocity: f64,
        half_damping: f64,
        stiffness: f64,
        discriminant: f64,
    ) -> Motion {
        let root = sqrt(discriminant);
        // λ1 = -h + sqrt(D), rewritten via λ1·λ2 = stiffness to avoid cancellation
        let slow_rate = -stiffness / (half_damping + root);
        let fast_rate = -half_damping - root;

        let c0 = (velocity - fast_rate * delta) / (slow_rate - fast_rate);

        Motion::Overdamped {
            slow_rate,
            fast_rate,
            c0,
            c1: delta - c0,
        }
    }

    /// The damping regime.
    #[inline]
    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// True when the spring started on its target with no velocity.
    #[inline]
    pub fn is_at_rest(&self) -> bool {
        matches!(self.motion, Motion::Rest)
    }

    /// The target position.
    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Initial displacement from the target.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Decay rate of the envelope, `damping / 2`.
    #[inline]
    pub fn half_damping(&self) -> f64 {
        self.half_damping
    }

    /// `half_damping² - stiffness`.
    #[inline]
    pub fn discriminant(&self) -> f64 {
        self.discriminant
    }

    /// Angular frequency of the oscillation, or `None` unless under-damped.
    pub fn damped_frequency(&self) -> Option<f64> {
        match self.motion {
            Motion::Underdamped { frequency, .. } => Some(frequency),
            _ => None,
        }
    }

    /// `(amplitude, phase)` of the oscillation, or `None` unless under-damped.
    ///
    /// The amplitude is non-negative and `amplitude · cos(phase)` equals the
    /// initial displacement.
    pub fn amplitude_phase(&self) -> Option<(f64, f64)> {
        match self.motion {
            Motion::Underdamped {
                amplitude, phase, ..
            } => Some((amplitude, phase)),
            _ => None,
        }
    }

    /// The two real decay rates `(λ1, λ2)`, or `None` unless over-damped.
    pub fn rates(&self) -> Option<(f64, f64)> {
        match self.motion {
            Motion::Overdamped {
                slow_rate,
                fast_rate,
                ..
            } => Some((slow_rate, fast_rate)),
            _ => None,
        }
    }

    /// Position at time `t`.
    ///
    /// Any `t` is accepted; negative values extrapolate the trajectory
    /// backwards.
    pub fn position_at(&self, t: f64) -> f64 {
        match self.motion {
            Motion::Rest => self.target,
            Motion::Underdamped {
                frequency,
                amplitude,
                phase,
            } => self.target + amplitude * exp(-self.half_damping * t) * cos(frequency * t + phase),
            Motion::Critical { c0, c1 } => self.target + (c0 + c1 * t) * exp(-self.half_damping * t),
            Motion::Overdamped {
                slow_rate,
                fast_rate,
                c0,
                c1,
            } => self.target + c0 * exp(slow_rate * t) + c1 * exp(fast_rate * t),
        }
    }

    /// Velocity at time `t`: the exact derivative of [`position_at`](Self::position_at).
    pub fn velocity_at(&self, t: f64) -> f64 {
        self.state_at(t).1
    }

    /// `(position, velocity)` at time `t`, sharing the exponentials.
    pub fn state_at(&self, t: f64) -> (f64, f64) {
        let h = self.half_damping;
        match self.motion {
            Motion::Rest => (self.target, 0.0),
            Motion::Underdamped {
                frequency,
                amplitude,
                phase,
            } => {
                let envelope = amplitude * exp(-h * t);
                let theta = frequency * t + phase;
                let (sin_theta, cos_theta) = (sin(theta), cos(theta));
                (
                    self.target + envelope * cos_theta,
                    envelope * (-h * cos_theta - frequency * sin_theta),
                )
            }
            Motion::Critical { c0, c1 } => {
                let decay = exp(-h * t);
                let displacement = c0 + c1 * t;
                (
                    self.target + displacement * decay,
                    decay * (c1 - h * displacement),
                )
            }
            Motion::Overdamped {
                slow_rate,
                fast_rate,
                c0,
                c1,
            } => {
                let slow = c0 * exp(slow_rate * t);
                let fast = c1 * exp(fast_rate * t);
                (
                    self.target + slow + fast,
                    slow * slow_rate + fast * fast_rate,
                )
            }
        }
    }
}

impl From<&SpringConfig> for Solution {
    fn from(config: &SpringConfig) -> Self {
        Self::new(config)
    }
}

impl From<SpringConfig> for Solution {
    fn from(config: SpringConfig) -> Self {
        Self::new(&config)
    }
}

/// Position of `config` at time `t`.
///
/// Solves the spring on every call; prefer [`SpringConfig::solve`] or
/// [`SolutionCache`](crate::SolutionCache) when sampling many times.
pub fn position_at(config: &SpringConfig, t: f64) -> f64 {
    Solution::new(config).position_at(t)
}

/// Velocity of `config` at time `t`.
///
/// Solves the spring on every call; prefer [`SpringConfig::solve`] or
/// [`SolutionCache`](crate::SolutionCache) when sampling many times.
pub fn velocity_at(config: &SpringConfig, t: f64) -> f64 {
    Solution::new(config).velocity_at(t)
}
