#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::module_name_repetitions)]

//! # Springform
//!
//! Closed-form damped springs for animation and UI motion.
//!
//! Instead of stepping a simulation frame by frame, springform solves the
//! damped harmonic oscillator analytically. Given an initial position,
//! velocity and target plus stiffness and damping, it evaluates position and
//! velocity at any time `t` directly, and estimates when the motion settles.
//!
//! Springform provides:
//! - **[`SpringConfig`]**: initial conditions plus canonical `(stiffness, damping)`
//! - **[`Solution`]**: the solved trajectory, evaluated in O(1) per sample
//! - **[`SettlingTime`]**: when the trajectory stays within a tolerance
//! - **[`SpringConfig2`] / [`SpringConfig3`] / [`SpringConfig4`]**: multi-axis springs
//! - **[`SolutionCache`]**: single-slot memoization across repeated calls
//! - **[`damper`]**: a simpler non-oscillating exponential ease
//!
//! ## Spring Example
//!
//! ```rust
//! use springform::{fps, SpringConfig};
//!
//! // Move from 0 toward 100, bouncy, envelope halves every 0.15s
//! let spring = SpringConfig::from_halflife(0.15, 0.4).with_target(100.0).solve();
//!
//! // Sample the trajectory once per frame until it settles within 0.5
//! let settle = spring.duration_until(0.5).as_secs().unwrap();
//! let frames = (settle / fps(60)).ceil() as usize;
//! let samples: Vec<f64> = (0..=frames)
//!     .map(|frame| spring.position_at(frame as f64 * fps(60)))
//!     .collect();
//!
//! assert!((samples[frames] - 100.0).abs() < 0.5);
//! ```
//!
//! ## Parameterizations
//!
//! A spring can be described by:
//!
//! - **stiffness and damping** ([`SpringConfig::new`])
//! - **half-life and damping ratio** ([`SpringConfig::from_halflife`])
//! - **frequency and damping ratio** ([`SpringConfig::from_frequency`])
//! - any consistent mix, through [`SpringConfig::builder`]
//!
//! Out-of-range values are clamped, never rejected. See [`normalize`].
//!
//! ## Damping Ratios
//!
//! The damping ratio determines the spring's behavior:
//!
//! - **Over-damped (ζ > 1)**: No oscillation, slow return to equilibrium
//! - **Critically-damped (ζ = 1)**: Fastest return without oscillation
//! - **Under-damped (ζ < 1)**: Oscillates around equilibrium with decay
//!
//! ## Features
//!
//! - `std` (default): use the standard library's float math. Without it the
//!   crate is `no_std` and uses `libm`.
//! - `serde`: `Serialize`/`Deserialize` for [`SpringConfig`], [`Regime`] and
//!   [`SettlingTime`].

pub mod cache;
pub mod config;
pub mod consts;
pub mod damper;
pub mod error;
mod math;
pub mod normalize;
pub mod settle;
pub mod solution;
pub mod vector;

pub use cache::{SolutionCache, Solve};
pub use config::{SpringBuilder, SpringConfig};
pub use damper::{damper, damper_n, fast_damper};
pub use error::ConfigError;
pub use math::{fast_neg_exp, lerp};
pub use settle::{SettlingTime, duration_until};
pub use solution::{Regime, Solution, position_at, velocity_at};
pub use vector::{
    Solution2, Solution3, Solution4, SolutionN, SpringConfig2, SpringConfig3, SpringConfig4,
    SpringConfigN, duration_until_n, position_at_n, velocity_at_n,
};

/// Returns a time delta for a given number of frames per second.
///
/// Useful as the sampling step when evaluating a spring once per frame.
/// Game engines usually provide the frame time as well, which you should
/// prefer if available.
///
/// # Example
///
/// ```rust
/// use springform::{fps, SpringConfig};
///
/// let spring = SpringConfig::new(25.0, 4.0).solve();
/// let second_frame = spring.position_at(2.0 * fps(60));
/// assert!(second_frame > 0.0);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / n as f64
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cache::{SolutionCache, Solve};
    pub use crate::config::{SpringBuilder, SpringConfig};
    pub use crate::damper::{damper, damper_n, fast_damper};
    pub use crate::fps;
    pub use crate::settle::SettlingTime;
    pub use crate::solution::{Regime, Solution};
    pub use crate::vector::{SpringConfig2, SpringConfig3, SpringConfig4, SpringConfigN};
}
