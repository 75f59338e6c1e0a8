//! Single-slot memoization of spring solutions.
//!
//! Callers often evaluate one configuration at many times, for example when
//! sampling a curve for display, without holding on to the [`Solution`].
//! [`SolutionCache`] keeps the most recent `(config, solution)` pair and
//! re-solves only when the configuration changes.
//!
//! The cache has exactly one slot. Keep one cache per spring instance:
//! sharing a cache between springs that alternate makes every call a miss.
//!
//! # Example
//!
//! ```rust
//! use springform::{SolutionCache, SpringConfig};
//!
//! let mut cache: SolutionCache = SolutionCache::new();
//! let config = SpringConfig::from_halflife(0.25, 0.5).with_target(10.0);
//!
//! for i in 0..60 {
//!     let _y = cache.position_at(&config, i as f64 / 60.0);
//! }
//!
//! assert_eq!(cache.misses(), 1);
//! assert_eq!(cache.hits(), 59);
//! ```

use tracing::trace;

use crate::config::SpringConfig;
use crate::settle::SettlingTime;
use crate::solution::Solution;
use crate::vector::{SolutionN, SpringConfigN};

/// A configuration that can be solved and compared bit for bit.
pub trait Solve: Copy + core::fmt::Debug {
    /// The derived state produced by [`Solve::solve`].
    type Solution: Copy + core::fmt::Debug;

    /// Derives the solution.
    fn solve(&self) -> Self::Solution;

    /// True if every field of `self` and `other` has the same bit pattern.
    fn bit_eq(&self, other: &Self) -> bool;
}

impl Solve for SpringConfig {
    type Solution = Solution;

    #[inline]
    fn solve(&self) -> Solution {
        Solution::new(self)
    }

    #[inline]
    fn bit_eq(&self, other: &Self) -> bool {
        SpringConfig::bit_eq(self, other)
    }
}

impl<const N: usize> Solve for SpringConfigN<N> {
    type Solution = SolutionN<N>;

    #[inline]
    fn solve(&self) -> SolutionN<N> {
        SolutionN::new(self)
    }

    #[inline]
    fn bit_eq(&self, other: &Self) -> bool {
        SpringConfigN::bit_eq(self, other)
    }
}

/// Holds the most recently solved configuration and its solution.
#[derive(Debug, Clone)]
pub struct SolutionCache<C: Solve = SpringConfig> {
    slot: Option<(C, C::Solution)>,
    hits: u64,
    misses: u64,
}

impl<C: Solve> Default for SolutionCache<C> {
    fn default() -> Self {
        Self {
            slot: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<C: Solve> SolutionCache<C> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the solution of `config`, reusing the cached one if `config`
    /// is bit-equal to the cached configuration.
    pub fn solve(&mut self, config: &C) -> &C::Solution {
        let entry = match self.slot.take() {
            Some(entry) if entry.0.bit_eq(config) => {
                self.hits += 1;
                trace!(cache.hits = self.hits, "Spring solution cache hit");
                entry
            }
            _ => {
                self.misses += 1;
                trace!(cache.misses = self.misses, "Spring solution cache miss");
                (*config, config.solve())
            }
        };
        &self.slot.insert(entry).1
    }

    /// The cached configuration, if any.
    pub fn cached_config(&self) -> Option<&C> {
        self.slot.as_ref().map(|(config, _)| config)
    }

    /// Empties the slot. Counters are kept.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Number of calls answered from the slot.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of calls that had to solve.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl SolutionCache<SpringConfig> {
    /// Position of `config` at time `t`.
    pub fn position_at(&mut self, config: &SpringConfig, t: f64) -> f64 {
        self.solve(config).position_at(t)
    }

    /// Velocity of `config` at time `t`.
    pub fn velocity_at(&mut self, config: &SpringConfig, t: f64) -> f64 {
        self.solve(config).velocity_at(t)
    }

    /// Time until `config` settles within `epsilon` of its target.
    pub fn duration_until(&mut self, config: &SpringConfig, epsilon: f64) -> SettlingTime {
        self.solve(config).duration_until(epsilon)
    }
}

impl<const N: usize> SolutionCache<SpringConfigN<N>> {
    /// Positions of `config` at time `t`.
    pub fn position_at(&mut self, config: &SpringConfigN<N>, t: f64) -> [f64; N] {
        self.solve(config).position_at(t)
    }

    /// Velocities of `config` at time `t`.
    pub fn velocity_at(&mut self, config: &SpringConfigN<N>, t: f64) -> [f64; N] {
        self.solve(config).velocity_at(t)
    }

    /// Time until every axis of `config` settles within `epsilon`.
    pub fn duration_until(&mut self, config: &SpringConfigN<N>, epsilon: f64) -> SettlingTime {
        self.solve(config).duration_until(epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::SpringConfig2;

    #[test]
    fn test_repeated_config_hits() {
        let mut cache: SolutionCache = SolutionCache::new();
        let config = SpringConfig::new(9.0, 1.0);
        let first = *cache.solve(&config);
        let second = *cache.solve(&config);
        assert_eq!(first, second);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_changed_config_misses_and_replaces() {
        let mut cache: SolutionCache = SolutionCache::new();
        let a = SpringConfig::new(9.0, 1.0);
        let b = a.with_target(2.0);
        cache.solve(&a);
        cache.solve(&b);
        assert_eq!(cache.misses(), 2);
        assert!(cache.cached_config().unwrap().bit_eq(&b));

        // Single slot: going back to `a` solves again
        cache.solve(&a);
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_signed_zero_is_a_different_input() {
        let mut cache: SolutionCache = SolutionCache::new();
        cache.solve(&SpringConfig::new(1.0, 1.0).with_position(0.0));
        cache.solve(&SpringConfig::new(1.0, 1.0).with_position(-0.0));
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_cached_values_match_direct() {
        let mut cache: SolutionCache = SolutionCache::new();
        let config = SpringConfig::new(2.0, 10.0).with_velocity(3.0);
        let direct = config.solve();
        for t in [0.0, 0.5, 2.0] {
            assert_eq!(cache.position_at(&config, t), direct.position_at(t));
            assert_eq!(cache.velocity_at(&config, t), direct.velocity_at(t));
        }
        assert_eq!(cache.duration_until(&config, 0.1), direct.duration_until(0.1));
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache: SolutionCache = SolutionCache::new();
        let config = SpringConfig::default();
        cache.solve(&config);
        cache.clear();
        assert!(cache.cached_config().is_none());
        cache.solve(&config);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_vector_cache() {
        let mut cache = SolutionCache::<SpringConfig2>::new();
        let config = SpringConfig2::new(4.0, 2.0).with_position([3.0, -3.0]);
        let direct = config.solve();
        assert_eq!(cache.position_at(&config, 0.4), direct.position_at(0.4));
        assert_eq!(cache.velocity_at(&config, 0.4), direct.velocity_at(0.4));
        assert_eq!(cache.duration_until(&config, 0.1), direct.duration_until(0.1));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 2);
    }
}
