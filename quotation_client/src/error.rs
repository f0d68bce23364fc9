//! Error types used across the quotation client.
//!
//! Every variant is fatal: the client performs one request per run and has no
//! fallback, so `main` logs the error and exits with a non-zero status.
use std::io;

use quotation_common::GoDuration;
use thiserror::Error;

/// Unified error type for the client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server did not answer before the request deadline.
    #[error("request exceeded maximum time of {0}")]
    Timeout(GoDuration),

    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Any other transport failure.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body does not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with an error body.
    #[error("an error occurred: {message}\ncode: {status_code}")]
    Server {
        /// Message embedded by the server.
        message: String,
        /// Status code embedded by the server.
        status_code: u16,
    },

    /// Opening or appending to the output file failed.
    #[error("failed to save data to disk: {0}")]
    Io(#[from] io::Error),
}
