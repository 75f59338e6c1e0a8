//! Error types for spring construction.

use thiserror::Error;

/// Error returned by [`SpringBuilder::build`](crate::SpringBuilder::build)
/// when the supplied parameters do not describe a single spring.
///
/// Numeric problems (negative, zero or non-finite values) are never errors;
/// they are clamped. Only structurally ambiguous parameter sets are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two parameters that set the same quantity were both supplied.
    #[error("conflicting spring parameters: `{first}` and `{second}` both set the {quantity}")]
    Conflicting {
        /// The first parameter name.
        first: &'static str,
        /// The second parameter name.
        second: &'static str,
        /// The quantity both parameters determine.
        quantity: &'static str,
    },

    /// A damping ratio was supplied together with both a stiffness source
    /// and a damping source, leaving nothing for the ratio to determine.
    #[error("overdetermined spring: `damping_ratio` given with both `{stiffness}` and `{damping}`")]
    Overdetermined {
        /// The parameter that set the stiffness.
        stiffness: &'static str,
        /// The parameter that set the damping.
        damping: &'static str,
    },
}

/// A specialized `Result` type for spring construction.
pub type Result<T> = core::result::Result<T, ConfigError>;
