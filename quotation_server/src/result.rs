//! Result type alias for the server crate.
//!
//! Functions in this crate can simply return `Result<T>`; the error defaults to
//! `ServerError`.
use crate::error::ServerError;

/// Crate-wide `Result` alias with `ServerError` as the default error.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;
