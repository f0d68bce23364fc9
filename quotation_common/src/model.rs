//! Wire payloads exchanged between the upstream source, the server and the client.
//!
//! Every quotation field is kept as text. The upstream sends numbers as strings
//! and occasionally values that would not survive a strict numeric type, so
//! nothing here parses them; bids travel from upstream to disk byte for byte.
use serde::{Deserialize, Serialize};

/// One USD-BRL quotation as published by the upstream source.
///
/// Fields missing from the upstream payload decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quotation {
    /// Base currency code (e.g., `USD`).
    pub code: String,
    /// Quote currency code (e.g., `BRL`).
    #[serde(rename = "codein")]
    pub code_in: String,
    /// Human-readable pair name.
    pub name: String,
    /// Day high.
    pub high: String,
    /// Day low.
    pub low: String,
    /// Bid variation.
    #[serde(rename = "varBid")]
    pub var_bid: String,
    /// Percent change.
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    /// Bid price.
    pub bid: String,
    /// Ask price.
    pub ask: String,
    /// Quote timestamp (unix seconds, as text).
    pub timestamp: String,
    /// Creation date as reported upstream.
    pub create_date: String,
}

/// Upstream response envelope: `{"USDBRL": { ... }}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamQuotation {
    /// The wrapped quotation.
    #[serde(rename = "USDBRL")]
    pub quotation: Quotation,
}

impl UpstreamQuotation {
    /// Decode an upstream response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// Server reply on success: only the bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationResponse {
    /// Bid price, verbatim from the upstream quotation.
    pub bid: String,
}

impl QuotationResponse {
    /// Encode the response to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl From<&Quotation> for QuotationResponse {
    fn from(quotation: &Quotation) -> Self {
        QuotationResponse {
            bid: quotation.bid.clone(),
        }
    }
}

/// Error body sent by the server on any failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Diagnostic message.
    pub error: String,
    /// Mirrors the HTTP status of the response; `0` if the server omitted it.
    #[serde(default)]
    pub status_code: u16,
}

impl ErrorResponse {
    /// Creates a new error body.
    pub fn new(error: impl Into<String>, status_code: u16) -> Self {
        ErrorResponse {
            error: error.into(),
            status_code,
        }
    }
}
