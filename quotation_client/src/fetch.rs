//! The single request the client makes per run.
//!
//! The request, the status line and the body are all read under one deadline.
//! A 200 decodes as `QuotationResponse`; anything else decodes as the server's
//! `ErrorResponse` and becomes `ClientError::Server`.
use std::time::Duration;

use log::debug;
use quotation_common::Deadline;
use quotation_common::model::{ErrorResponse, QuotationResponse};
use reqwest::{Client, StatusCode};

use crate::error::ClientError;
use crate::result::Result;

/// HTTP client for the quotation server.
#[derive(Debug, Clone)]
pub struct QuotationClient {
    http: Client,
    url: String,
    timeout: Duration,
}

impl QuotationClient {
    /// Create a client for `url` with a per-request `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().build().map_err(ClientError::HttpClient)?;
        Ok(Self {
            http,
            url: url.into(),
            timeout,
        })
    }

    /// Request the current bid from the server.
    pub async fn fetch(&self) -> Result<QuotationResponse> {
        let deadline = Deadline::after(self.timeout);
        let exchange = async {
            let response = self.http.get(&self.url).send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = deadline
            .run(exchange)
            .await
            .map_err(|_| ClientError::Timeout(self.timeout.into()))?
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(self.timeout.into())
                } else {
                    ClientError::Request(e)
                }
            })?;
        debug!("server answered {}", status);

        if status == StatusCode::OK {
            return Ok(serde_json::from_slice::<QuotationResponse>(&body)?);
        }

        let error: ErrorResponse = serde_json::from_slice(&body)?;
        Err(ClientError::Server {
            message: error.error,
            status_code: error.status_code,
        })
    }
}
