//! `GET /cotacao`: fetch → decode → persist → respond.
//!
//! Each request runs in its own task and shares only `AppState`: the read-only
//! configuration, the upstream client and the store. Steps are strictly
//! sequential and the first failure ends the request with a 500 body built by
//! `ServerError::into_response`.
//!
//! Deadlines:
//! - the upstream call gets `min(parent, now + request_timeout)`;
//! - the insert gets `min(parent, now + database_timeout)`, derived from the
//!   inbound scope when persistence starts, not from the upstream deadline.
//!
//! Plain HTTP requests carry no deadline of their own, so the handler passes
//! `None` as parent. If the client disconnects, axum drops the handler future
//! and with it whatever upstream call or insert is in flight.
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use log::info;
use quotation_common::Deadline;
use quotation_common::model::QuotationResponse;
use quotation_common::net::QUOTATION_ROUTE;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::result::Result;
use crate::store::{QuotationStore, save_quotation};
use crate::upstream::UpstreamClient;

/// State shared by every request handler.
pub struct AppState<S: QuotationStore> {
    pub config: ServerConfig,
    pub upstream: UpstreamClient,
    pub store: S,
}

impl<S: QuotationStore> AppState<S> {
    pub fn new(config: ServerConfig, upstream: UpstreamClient, store: S) -> Self {
        AppState {
            config,
            upstream,
            store,
        }
    }

    /// Fetch the current quotation, record it and return its bid.
    ///
    /// `parent` is the inbound deadline, if any. The bid in the returned
    /// response is the same string that was written to the store.
    pub async fn quote(&self, parent: Option<Deadline>) -> Result<QuotationResponse> {
        let request_timeout = self.config.request_timeout;
        let deadline = Deadline::within(parent, request_timeout);
        let quotation = self.upstream.fetch(deadline, request_timeout).await?;

        save_quotation(
            &self.store,
            &quotation,
            parent,
            self.config.database_timeout,
        )
        .await
        .map_err(ServerError::Persist)?;

        Ok(QuotationResponse::from(&quotation))
    }
}

/// Create the HTTP router.
pub fn create_router<S: QuotationStore + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route(QUOTATION_ROUTE, get(get_quotation::<S>))
        .with_state(state)
}

/// GET /cotacao
pub async fn get_quotation<S: QuotationStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Response> {
    info!("GET {}", QUOTATION_ROUTE);
    let quotation = state.quote(None).await?;
    let body = quotation.to_json_bytes().map_err(ServerError::Encode)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
