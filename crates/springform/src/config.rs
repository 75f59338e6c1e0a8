//! Spring configuration: initial conditions plus canonical parameters.

use tracing::debug;

use crate::consts::{
    DEFAULT_DAMPING, DEFAULT_EPSILON, DEFAULT_POSITION, DEFAULT_STIFFNESS, DEFAULT_TARGET,
    DEFAULT_VELOCITY,
};
use crate::error::{ConfigError, Result};
use crate::math::square;
use crate::normalize::{
    damping_from_damping_ratio, damping_from_halflife, damping_ratio, frequency_from_stiffness,
    halflife_from_damping, normalize_damping, normalize_stiffness, stiffness_from_damping_ratio,
    stiffness_from_frequency,
};
use crate::settle::SettlingTime;
use crate::solution::Solution;

/// An immutable description of one spring motion.
///
/// A `SpringConfig` holds the initial position and velocity, the target
/// (equilibrium) position, and the canonical `(stiffness, damping)` pair.
/// Stiffness and damping are always normalized on construction, so they are
/// finite and non-negative.
///
/// Changing any input produces a new configuration: the `with_*` methods
/// return modified copies.
///
/// # Example
///
/// ```rust
/// use springform::SpringConfig;
///
/// // Critically damped spring from 0 toward 100 with a 0.2s half-life
/// let config = SpringConfig::from_halflife(0.2, 1.0).with_target(100.0);
///
/// let solution = config.solve();
/// assert_eq!(solution.position_at(0.0), 0.0);
/// assert!(solution.position_at(5.0) > 99.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawSpringConfig"))]
pub struct SpringConfig {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
}

/// Logs when normalization changed a parameter and returns the normalized value.
#[inline]
fn clamped(parameter: &'static str, raw: f64, value: f64) -> f64 {
    if raw.to_bits() != value.to_bits() {
        debug!(spring.parameter = parameter, raw, value, "Spring parameter clamped");
    }
    value
}

impl SpringConfig {
    /// Creates a spring from stiffness and damping, starting at rest at
    /// [`DEFAULT_POSITION`](crate::consts::DEFAULT_POSITION) and moving
    /// toward [`DEFAULT_TARGET`](crate::consts::DEFAULT_TARGET).
    ///
    /// Negative or non-finite parameters are clamped.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            position: DEFAULT_POSITION,
            velocity: DEFAULT_VELOCITY,
            target: DEFAULT_TARGET,
            stiffness: clamped("stiffness", stiffness, normalize_stiffness(stiffness)),
            damping: clamped("damping", damping, normalize_damping(damping)),
        }
    }

    /// Creates a spring whose decay envelope halves every `halflife` time
    /// units, with the given damping ratio (`1.0` is critical).
    pub fn from_halflife(halflife: f64, damping_ratio: f64) -> Self {
        let damping = damping_from_halflife(halflife);
        Self::new(stiffness_from_damping_ratio(damping_ratio, damping), damping)
    }

    /// Creates a spring that oscillates at `frequency` cycles per time unit
    /// when undamped, with the given damping ratio (`1.0` is critical).
    pub fn from_frequency(frequency: f64, damping_ratio: f64) -> Self {
        let stiffness = stiffness_from_frequency(frequency);
        Self::new(stiffness, damping_from_damping_ratio(damping_ratio, stiffness))
    }

    /// Returns a builder accepting any one consistent parameterization.
    pub fn builder() -> SpringBuilder {
        SpringBuilder::new()
    }

    /// Returns a copy with a different initial position.
    pub fn with_position(mut self, position: f64) -> Self {
        self.position = position;
        self
    }

    /// Returns a copy with a different initial velocity.
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Returns a copy with a different target position.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = target;
        self
    }

    /// Initial position.
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Initial velocity.
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Target (equilibrium) position.
    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Stiffness, always in `[0, PARAMETER_LIMIT]`.
    #[inline]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping, always in `[0, PARAMETER_LIMIT]`.
    #[inline]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Displacement from the target: `position - target`.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.position - self.target
    }

    /// Half of the damping; the decay rate of the envelope.
    #[inline]
    pub fn half_damping(&self) -> f64 {
        self.damping / 2.0
    }

    /// `half_damping² - stiffness`. Its sign selects the damping regime.
    #[inline]
    pub fn discriminant(&self) -> f64 {
        square(self.half_damping()) - self.stiffness
    }

    /// True when the spring starts on its target with no velocity.
    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.delta() == 0.0 && self.velocity == 0.0
    }

    /// Damping ratio of this spring. `1.0` is critical.
    pub fn damping_ratio(&self) -> f64 {
        damping_ratio(self.stiffness, self.damping)
    }

    /// Half-life of the decay envelope.
    pub fn halflife(&self) -> f64 {
        halflife_from_damping(self.damping)
    }

    /// Undamped frequency in cycles per time unit.
    pub fn frequency(&self) -> f64 {
        frequency_from_stiffness(self.stiffness)
    }

    /// Classifies the regime and derives the closed-form coefficients.
    ///
    /// Evaluate the returned [`Solution`] as often as needed; use
    /// [`SolutionCache`](crate::SolutionCache) when the configuration is
    /// only known at each call site.
    pub fn solve(&self) -> Solution {
        Solution::new(self)
    }

    /// Position at time `t`. Solves the spring on every call.
    pub fn position_at(&self, t: f64) -> f64 {
        self.solve().position_at(t)
    }

    /// Velocity at time `t`. Solves the spring on every call.
    pub fn velocity_at(&self, t: f64) -> f64 {
        self.solve().velocity_at(t)
    }

    /// Time until the trajectory settles within `epsilon` of the target.
    pub fn duration_until(&self, epsilon: f64) -> SettlingTime {
        self.solve().duration_until(epsilon)
    }

    /// Time until the trajectory settles within
    /// [`DEFAULT_EPSILON`](crate::consts::DEFAULT_EPSILON) of the target.
    pub fn duration(&self) -> SettlingTime {
        self.duration_until(DEFAULT_EPSILON)
    }

    /// Compares every field by bit pattern.
    ///
    /// Unlike `==`, this treats `0.0` and `-0.0` as different and a NaN as
    /// equal to itself.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.position.to_bits() == other.position.to_bits()
            && self.velocity.to_bits() == other.velocity.to_bits()
            && self.target.to_bits() == other.target.to_bits()
            && self.stiffness.to_bits() == other.stiffness.to_bits()
            && self.damping.to_bits() == other.damping.to_bits()
    }
}

impl Default for SpringConfig {
    /// A critically damped spring with a very long half-life, from 0 to 1.
    fn default() -> Self {
        Self::new(DEFAULT_STIFFNESS, DEFAULT_DAMPING)
    }
}

/// Deserialized form of [`SpringConfig`]; normalized on conversion.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawSpringConfig {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
}

#[cfg(feature = "serde")]
impl Default for RawSpringConfig {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            velocity: DEFAULT_VELOCITY,
            target: DEFAULT_TARGET,
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
        }
    }
}

#[cfg(feature = "serde")]
impl From<RawSpringConfig> for SpringConfig {
    fn from(raw: RawSpringConfig) -> Self {
        Self::new(raw.stiffness, raw.damping)
            .with_position(raw.position)
            .with_velocity(raw.velocity)
            .with_target(raw.target)
    }
}

/// Builds a [`SpringConfig`] from whichever parameters are at hand.
///
/// Stiffness comes from `stiffness`, `frequency`, or `damping_ratio` applied
/// to the damping. Damping comes from `damping`, `halflife`, or
/// `damping_ratio` applied to the stiffness. Anything left unspecified takes
/// its default: position `0`, velocity `0`, target `1`, damping from a
/// 1000-unit half-life, and the stiffness that critically damps it.
///
/// # Example
///
/// ```rust
/// use springform::SpringConfig;
///
/// let config = SpringConfig::builder()
///     .halflife(0.25)
///     .damping_ratio(0.5)
///     .position(480.0)
///     .target(160.0)
///     .build()
///     .unwrap();
///
/// assert!((config.damping_ratio() - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpringBuilder {
    position: Option<f64>,
    velocity: Option<f64>,
    target: Option<f64>,
    stiffness: Option<f64>,
    damping: Option<f64>,
    halflife: Option<f64>,
    frequency: Option<f64>,
    damping_ratio: Option<f64>,
}

impl SpringBuilder {
    /// Creates a builder with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial position.
    pub fn position(mut self, position: f64) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the initial velocity.
    pub fn velocity(mut self, velocity: f64) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Sets the target position.
    pub fn target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the stiffness directly.
    pub fn stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = Some(stiffness);
        self
    }

    /// Sets the damping directly.
    pub fn damping(mut self, damping: f64) -> Self {
        self.damping = Some(damping);
        self
    }

    /// Sets the damping through the envelope half-life.
    pub fn halflife(mut self, halflife: f64) -> Self {
        self.halflife = Some(halflife);
        self
    }

    /// Sets the stiffness through the undamped frequency.
    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the damping ratio, which determines whichever of stiffness or
    /// damping is not otherwise given.
    pub fn damping_ratio(mut self, damping_ratio: f64) -> Self {
        self.damping_ratio = Some(damping_ratio);
        self
    }

    /// Resolves the parameters into a [`SpringConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Conflicting`] if both `stiffness` and
    /// `frequency`, or both `damping` and `halflife`, are set. Returns
    /// [`ConfigError::Overdetermined`] if `damping_ratio` is set along with
    /// both a stiffness and a damping parameter.
    pub fn build(self) -> Result<SpringConfig> {
        let stiffness_source = match (self.stiffness, self.frequency) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Conflicting {
                    first: "stiffness",
                    second: "frequency",
                    quantity: "stiffness",
                });
            }
            (Some(stiffness), None) => Some(("stiffness", stiffness)),
            (None, Some(frequency)) => Some(("frequency", stiffness_from_frequency(frequency))),
            (None, None) => None,
        };

        let damping_source = match (self.damping, self.halflife) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Conflicting {
                    first: "damping",
                    second: "halflife",
                    quantity: "damping",
                });
            }
            (Some(damping), None) => Some(("damping", damping)),
            (None, Some(halflife)) => Some(("halflife", damping_from_halflife(halflife))),
            (None, None) => None,
        };

        let (stiffness, damping) = match (stiffness_source, damping_source, self.damping_ratio) {
            (Some((stiffness, _)), Some((damping, _)), Some(_)) => {
                return Err(ConfigError::Overdetermined { stiffness, damping });
            }
            (Some((_, stiffness)), Some((_, damping)), None) => (stiffness, damping),
            (Some((_, stiffness)), None, Some(ratio)) => {
                (stiffness, damping_from_damping_ratio(ratio, stiffness))
            }
            (Some((_, stiffness)), None, None) => {
                debug!(spring.damping = DEFAULT_DAMPING, "No damping given, using default");
                (stiffness, DEFAULT_DAMPING)
            }
            (None, Some((_, damping)), ratio) => (
                stiffness_from_damping_ratio(ratio.unwrap_or(1.0), damping),
                damping,
            ),
            (None, None, ratio) => {
                debug!(spring.damping = DEFAULT_DAMPING, "No damping given, using default");
                (
                    stiffness_from_damping_ratio(ratio.unwrap_or(1.0), DEFAULT_DAMPING),
                    DEFAULT_DAMPING,
                )
            }
        };

        Ok(SpringConfig::new(stiffness, damping)
            .with_position(self.position.unwrap_or(DEFAULT_POSITION))
            .with_velocity(self.velocity.unwrap_or(DEFAULT_VELOCITY))
            .with_target(self.target.unwrap_or(DEFAULT_TARGET)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Regime;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_new_clamps_negative_parameters() {
        let config = SpringConfig::new(-4.0, -1.0);
        assert_eq!(config.stiffness(), 0.0);
        assert_eq!(config.damping(), 0.0);
    }

    #[test]
    fn test_new_uses_default_state() {
        let config = SpringConfig::new(1.0, 2.0);
        assert_eq!(config.position(), DEFAULT_POSITION);
        assert_eq!(config.velocity(), DEFAULT_VELOCITY);
        assert_eq!(config.target(), DEFAULT_TARGET);
    }

    #[test]
    fn test_with_methods_copy() {
        let base = SpringConfig::new(1.0, 2.0);
        let moved = base.with_position(5.0).with_velocity(-1.0).with_target(9.0);
        assert_eq!(base.position(), 0.0);
        assert_eq!(moved.position(), 5.0);
        assert_eq!(moved.velocity(), -1.0);
        assert_eq!(moved.target(), 9.0);
        assert_eq!(moved.delta(), -4.0);
    }

    #[test]
    fn test_default_is_critical() {
        let config = SpringConfig::default();
        assert_eq!(config.solve().regime(), Regime::Critical);
        assert!(approx_eq(config.halflife(), 1000.0));
    }

    #[test]
    fn test_from_halflife() {
        let config = SpringConfig::from_halflife(0.5, 0.3);
        assert!(approx_eq(config.halflife(), 0.5));
        assert!(approx_eq(config.damping_ratio(), 0.3));
    }

    #[test]
    fn test_from_frequency() {
        let config = SpringConfig::from_frequency(2.0, 1.5);
        assert!(approx_eq(config.frequency(), 2.0));
        assert!(approx_eq(config.damping_ratio(), 1.5));
        assert_eq!(config.solve().regime(), Regime::Overdamped);
    }

    #[test]
    fn test_discriminant_sign() {
        assert!(SpringConfig::new(4.0, 0.0).discriminant() < 0.0);
        assert!(SpringConfig::new(1.0, 2.0).discriminant().abs() < TOLERANCE);
        assert!(SpringConfig::new(1.0, 6.0).discriminant() > 0.0);
    }

    #[test]
    fn test_is_at_rest() {
        assert!(SpringConfig::new(1.0, 1.0).with_target(0.0).is_at_rest());
        assert!(
            !SpringConfig::new(1.0, 1.0)
                .with_target(0.0)
                .with_velocity(1.0)
                .is_at_rest()
        );
        assert!(!SpringConfig::new(1.0, 1.0).is_at_rest());
    }

    #[test]
    fn test_bit_eq_distinguishes_signed_zero() {
        let a = SpringConfig::new(1.0, 1.0).with_position(0.0);
        let b = SpringConfig::new(1.0, 1.0).with_position(-0.0);
        assert_eq!(a, b);
        assert!(!a.bit_eq(&b));
        assert!(a.bit_eq(&a));
    }

    #[test]
    fn test_builder_defaults() {
        let config = SpringConfig::builder().build().unwrap();
        assert!(config.bit_eq(&SpringConfig::default()));
    }

    #[test]
    fn test_builder_stiffness_and_damping() {
        let config = SpringConfig::builder()
            .stiffness(4.0)
            .damping(1.0)
            .position(3.0)
            .velocity(2.0)
            .target(-1.0)
            .build()
            .unwrap();
        assert_eq!(config.stiffness(), 4.0);
        assert_eq!(config.damping(), 1.0);
        assert_eq!(config.position(), 3.0);
        assert_eq!(config.velocity(), 2.0);
        assert_eq!(config.target(), -1.0);
    }

    #[test]
    fn test_builder_halflife_and_ratio() {
        let built = SpringConfig::builder()
            .halflife(0.25)
            .damping_ratio(0.5)
            .build()
            .unwrap();
        let direct = SpringConfig::from_halflife(0.25, 0.5);
        assert!(built.bit_eq(&direct));
    }

    #[test]
    fn test_builder_frequency_and_ratio() {
        let built = SpringConfig::builder()
            .frequency(3.0)
            .damping_ratio(0.2)
            .build()
            .unwrap();
        let direct = SpringConfig::from_frequency(3.0, 0.2);
        assert!(built.bit_eq(&direct));
    }

    #[test]
    fn test_builder_halflife_alone_is_critical() {
        let config = SpringConfig::builder().halflife(2.0).build().unwrap();
        assert!(approx_eq(config.damping_ratio(), 1.0));
    }

    #[test]
    fn test_builder_stiffness_alone_uses_default_damping() {
        let config = SpringConfig::builder().stiffness(9.0).build().unwrap();
        assert_eq!(config.damping(), DEFAULT_DAMPING);
    }

    #[test]
    fn test_builder_conflicting_stiffness() {
        let err = SpringConfig::builder()
            .stiffness(1.0)
            .frequency(1.0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Conflicting {
                first: "stiffness",
                second: "frequency",
                quantity: "stiffness",
            }
        );
    }

    #[test]
    fn test_builder_conflicting_damping() {
        let err = SpringConfig::builder()
            .damping(1.0)
            .halflife(1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Conflicting { quantity: "damping", .. }));
    }

    #[test]
    fn test_builder_overdetermined() {
        let err = SpringConfig::builder()
            .frequency(1.0)
            .halflife(1.0)
            .damping_ratio(0.5)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Overdetermined {
                stiffness: "frequency",
                damping: "halflife",
            }
        );
    }
}
