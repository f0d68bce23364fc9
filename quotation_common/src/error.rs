//! Error types shared between client and server.
//!
//! `ConfigError` covers everything that can go wrong while turning command-line
//! input into configuration values, so both binaries can report bad flags the
//! same way.
use thiserror::Error;

/// Unified configuration error shared by client and server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The input is not a duration at all (empty, stray characters, missing digits).
    #[error("invalid duration {0:?}")]
    InvalidDuration(String),

    /// A number in the duration is not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// A unit other than `ns`, `us`, `µs`, `ms`, `s`, `m` or `h` was used.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The offending unit.
        unit: String,
        /// The whole input, for context.
        input: String,
    },

    /// Timeouts cannot be negative.
    #[error("negative duration {0:?} is not allowed")]
    NegativeDuration(String),

    /// The duration does not fit into 64-bit nanoseconds.
    #[error("duration {0:?} is out of range")]
    DurationOverflow(String),

    /// A flag value was rejected; carries that flag's usage line.
    #[error("invalid argument, {usage}")]
    InvalidArgument {
        /// How the flag is meant to be used.
        usage: &'static str,
    },
}
