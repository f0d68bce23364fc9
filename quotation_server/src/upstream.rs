//! Outbound client for the upstream quotation source.
//!
//! One GET per inbound request, no retries. The whole exchange (sending the
//! request and reading the body) runs under the caller's deadline, so a slow
//! body counts against the same budget as a slow connect.
use std::time::Duration;

use log::debug;
use quotation_common::Deadline;
use quotation_common::model::{Quotation, UpstreamQuotation};
use reqwest::Client;

use crate::error::ServerError;
use crate::result::Result;

/// HTTP client bound to a single upstream endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    url: String,
}

impl UpstreamClient {
    /// Build a client for `url`. The connection pool is shared by all requests.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(ServerError::HttpClient)?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Endpoint this client calls.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the current quotation before `deadline`.
    ///
    /// `budget` is the configured request timeout; it only feeds the timeout
    /// message, the deadline itself decides when to give up.
    pub async fn fetch(&self, deadline: Deadline, budget: Duration) -> Result<Quotation> {
        let request = self
            .http
            .get(&self.url)
            .build()
            .map_err(ServerError::BuildRequest)?;

        let exchange = async {
            let response = self.http.execute(request).await?;
            debug!("upstream answered {}", response.status());
            response.bytes().await
        };

        let body = deadline
            .run(exchange)
            .await
            .map_err(|_| ServerError::UpstreamTimeout(budget.into()))?
            .map_err(|e| {
                if e.is_timeout() {
                    ServerError::UpstreamTimeout(budget.into())
                } else {
                    ServerError::Upstream(e)
                }
            })?;

        let envelope = UpstreamQuotation::from_slice(&body).map_err(ServerError::Decode)?;
        Ok(envelope.quotation)
    }
}
