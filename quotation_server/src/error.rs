//! Error types used across the quotation server crate.
//!
//! `ServerError` is the single error surface of a request: every failure of the
//! fetch → decode → persist → respond chain maps to one variant, and its
//! `IntoResponse` impl turns it into the uniform 500 `ErrorResponse` body.
//! `StoreError` stays separate so the store can be used (and tested) on its own.
//!
//! Startup failures (database bootstrap, bind, serve) share the same enum and are
//! fatal for the process.
use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use quotation_common::GoDuration;
use quotation_common::model::ErrorResponse;
use thiserror::Error;

/// Failures of the persistence store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database file could not be opened or created.
    #[error("failed to open database: {0}")]
    Open(#[source] sqlx::Error),

    /// Schema bootstrap failed.
    #[error("failed to create quotation table: {0}")]
    Schema(#[source] sqlx::Error),

    /// The statement failed to execute.
    #[error("failed to execute query. {0}")]
    Execute(#[source] sqlx::Error),

    /// The insert did not complete before its deadline.
    #[error("query exceeded maximum time of {0}")]
    Timeout(GoDuration),
}

/// Unified error type for request handling and server startup.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The upstream exchange did not finish before the request deadline.
    #[error("request exceeded maximum time of {0}")]
    UpstreamTimeout(GoDuration),

    /// The outbound request could not be built (e.g., malformed upstream URL).
    #[error("GET /cotacao - failed to create request: {0}")]
    BuildRequest(#[source] reqwest::Error),

    /// Any other transport failure talking to the upstream source.
    #[error("GET /cotacao - request failed: {0}")]
    Upstream(#[source] reqwest::Error),

    /// The upstream body is not a `{"USDBRL": {...}}` document.
    #[error("GET /cotacao - failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Persisting the quotation failed or timed out.
    #[error("GET /cotacao - failed to save data in the database: {0}")]
    Persist(#[source] StoreError),

    /// The bid response could not be serialized.
    #[error("GET /cotacao - failed to send response: {0}")]
    Encode(#[source] serde_json::Error),

    /// The shared HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Database bootstrap failed at startup.
    #[error("database error: {0}")]
    Database(#[from] StoreError),

    /// Listener bind or serve failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ServerError {
    /// HTTP status reported for this error. Every failure path answers 500.
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        error!("{}", message);
        let status = self.status();
        let body = Json(ErrorResponse::new(message, status.as_u16()));
        (status, body).into_response()
    }
}
