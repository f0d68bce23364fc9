//!
//! Common types and utilities shared by the quotation server and client.
//!
//! This crate aggregates:
//! - `error`: configuration error type `ConfigError` used by both binaries.
//! - `result`: handy `Result<T, ConfigError>` alias.
//! - `model`: JSON payloads: upstream quotation, bid response and error body.
//! - `deadline`: explicit deadlines and the `min(parent, budget)` derivation rule.
//! - `duration`: Go-style duration strings for timeout flags and messages.
//! - `args`: argv normalisation so `-rt 200ms` style flags reach clap.
//! - `net`: networking constants and small helpers.
#![warn(missing_docs)]
pub mod args;
pub mod deadline;
pub mod duration;
pub mod error;
pub mod model;
pub mod net;
pub mod result;

pub use deadline::Deadline;
pub use duration::GoDuration;
pub use error::ConfigError;
pub use result::Result;
