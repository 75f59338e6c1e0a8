//! Multi-axis springs.
//!
//! Each axis is an independent scalar spring sharing one stiffness and one
//! damping. Axes are not coupled, which is exact for isotropic damping.
//!
//! # Example
//!
//! ```rust
//! use springform::SpringConfig2;
//!
//! let config = SpringConfig2::from_halflife(0.3, 0.6)
//!     .with_position([0.0, 100.0])
//!     .with_target([50.0, 20.0]);
//!
//! let solution = config.solve();
//! let [x, y] = solution.position_at(0.0);
//! assert!(x.abs() < 1e-9 && (y - 100.0).abs() < 1e-9);
//!
//! // Stop sampling once the slowest axis has settled
//! let settle = solution.duration_until(0.5);
//! assert!(settle.as_f64().is_finite());
//! ```

use crate::config::SpringConfig;
use crate::consts::{DEFAULT_POSITION, DEFAULT_TARGET, DEFAULT_VELOCITY};
use crate::settle::SettlingTime;
use crate::solution::{Regime, Solution};

/// An N-axis spring: per-axis initial state with shared parameters.
///
/// Use the [`SpringConfig2`], [`SpringConfig3`] and [`SpringConfig4`]
/// aliases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfigN<const N: usize> {
    position: [f64; N],
    velocity: [f64; N],
    target: [f64; N],
    parameters: SpringConfig,
}

/// Two-axis spring configuration.
pub type SpringConfig2 = SpringConfigN<2>;
/// Three-axis spring configuration.
pub type SpringConfig3 = SpringConfigN<3>;
/// Four-axis spring configuration.
pub type SpringConfig4 = SpringConfigN<4>;

impl<const N: usize> SpringConfigN<N> {
    /// Creates a spring from stiffness and damping, with every axis starting
    /// at rest at the default position and moving toward the default target.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self::from_parameters(&SpringConfig::new(stiffness, damping))
    }

    /// Creates a spring from half-life and damping ratio.
    pub fn from_halflife(halflife: f64, damping_ratio: f64) -> Self {
        Self::from_parameters(&SpringConfig::from_halflife(halflife, damping_ratio))
    }

    /// Creates a spring from undamped frequency and damping ratio.
    pub fn from_frequency(frequency: f64, damping_ratio: f64) -> Self {
        Self::from_parameters(&SpringConfig::from_frequency(frequency, damping_ratio))
    }

    /// Takes stiffness and damping from a scalar configuration, for example
    /// one produced by [`SpringConfig::builder`]. Its initial state is
    /// ignored.
    pub fn from_parameters(config: &SpringConfig) -> Self {
        Self {
            position: [DEFAULT_POSITION; N],
            velocity: [DEFAULT_VELOCITY; N],
            target: [DEFAULT_TARGET; N],
            parameters: SpringConfig::new(config.stiffness(), config.damping()),
        }
    }

    /// Returns a copy with different initial positions.
    pub fn with_position(mut self, position: [f64; N]) -> Self {
        self.position = position;
        self
    }

    /// Returns a copy with different initial velocities.
    pub fn with_velocity(mut self, velocity: [f64; N]) -> Self {
        self.velocity = velocity;
        self
    }

    /// Returns a copy with different targets.
    pub fn with_target(mut self, target: [f64; N]) -> Self {
        self.target = target;
        self
    }

    /// Initial positions.
    #[inline]
    pub fn position(&self) -> [f64; N] {
        self.position
    }

    /// Initial velocities.
    #[inline]
    pub fn velocity(&self) -> [f64; N] {
        self.velocity
    }

    /// Targets.
    #[inline]
    pub fn target(&self) -> [f64; N] {
        self.target
    }

    /// Shared stiffness.
    #[inline]
    pub fn stiffness(&self) -> f64 {
        self.parameters.stiffness()
    }

    /// Shared damping.
    #[inline]
    pub fn damping(&self) -> f64 {
        self.parameters.damping()
    }

    /// The scalar configuration of one axis, or `None` if out of range.
    pub fn axis(&self, axis: usize) -> Option<SpringConfig> {
        (axis < N).then(|| self.axis_unchecked(axis))
    }

    fn axis_unchecked(&self, axis: usize) -> SpringConfig {
        self.parameters
            .with_position(self.position[axis])
            .with_velocity(self.velocity[axis])
            .with_target(self.target[axis])
    }

    /// The scalar configuration of every axis.
    pub fn axes(&self) -> [SpringConfig; N] {
        core::array::from_fn(|axis| self.axis_unchecked(axis))
    }

    /// Solves every axis.
    pub fn solve(&self) -> SolutionN<N> {
        SolutionN::new(self)
    }

    /// Compares every field by bit pattern.
    pub fn bit_eq(&self, other: &Self) -> bool {
        fn bits_eq<const N: usize>(a: &[f64; N], b: &[f64; N]) -> bool {
            a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
        }

        bits_eq(&self.position, &other.position)
            && bits_eq(&self.velocity, &other.velocity)
            && bits_eq(&self.target, &other.target)
            && self.parameters.bit_eq(&other.parameters)
    }
}

impl<const N: usize> Default for SpringConfigN<N> {
    fn default() -> Self {
        Self::from_parameters(&SpringConfig::default())
    }
}

/// Solved N-axis spring: one [`Solution`] per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionN<const N: usize> {
    axes: [Solution; N],
    regime: Regime,
}

/// Two-axis solution.
pub type Solution2 = SolutionN<2>;
/// Three-axis solution.
pub type Solution3 = SolutionN<3>;
/// Four-axis solution.
pub type Solution4 = SolutionN<4>;

impl<const N: usize> SolutionN<N> {
    /// Solves every axis of `config`.
    pub fn new(config: &SpringConfigN<N>) -> Self {
        let axes = config.axes();
        Self {
            axes: core::array::from_fn(|axis| axes[axis].solve()),
            regime: Regime::classify(config.parameters.half_damping(), config.stiffness()),
        }
    }

    /// The damping regime shared by every axis.
    #[inline]
    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// The solution of one axis, or `None` if out of range.
    pub fn axis(&self, axis: usize) -> Option<&Solution> {
        self.axes.get(axis)
    }

    /// All per-axis solutions.
    pub fn axes(&self) -> &[Solution; N] {
        &self.axes
    }

    /// Positions at time `t`.
    pub fn position_at(&self, t: f64) -> [f64; N] {
        core::array::from_fn(|axis| self.axes[axis].position_at(t))
    }

    /// Velocities at time `t`.
    pub fn velocity_at(&self, t: f64) -> [f64; N] {
        core::array::from_fn(|axis| self.axes[axis].velocity_at(t))
    }

    /// Writes positions at time `t` into `out`.
    pub fn position_into(&self, out: &mut [f64; N], t: f64) {
        for (slot, axis) in out.iter_mut().zip(&self.axes) {
            *slot = axis.position_at(t);
        }
    }

    /// Writes velocities at time `t` into `out`.
    pub fn velocity_into(&self, out: &mut [f64; N], t: f64) {
        for (slot, axis) in out.iter_mut().zip(&self.axes) {
            *slot = axis.velocity_at(t);
        }
    }

    /// Time until every axis has settled within `epsilon`: the maximum of the
    /// per-axis settling times.
    pub fn duration_until(&self, epsilon: f64) -> SettlingTime {
        self.axes
            .iter()
            .map(|axis| axis.duration_until(epsilon))
            .fold(SettlingTime::ZERO, SettlingTime::max)
    }
}

impl<const N: usize> From<&SpringConfigN<N>> for SolutionN<N> {
    fn from(config: &SpringConfigN<N>) -> Self {
        Self::new(config)
    }
}

/// Positions of `config` at time `t`.
pub fn position_at_n<const N: usize>(config: &SpringConfigN<N>, t: f64) -> [f64; N] {
    config.solve().position_at(t)
}

/// Velocities of `config` at time `t`.
pub fn velocity_at_n<const N: usize>(config: &SpringConfigN<N>, t: f64) -> [f64; N] {
    config.solve().velocity_at(t)
}

/// Time until every axis of `config` has settled within `epsilon`.
pub fn duration_until_n<const N: usize>(config: &SpringConfigN<N>, epsilon: f64) -> SettlingTime {
    config.solve().duration_until(epsilon)
}
