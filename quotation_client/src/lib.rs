//! USD-BRL quotation client.
//!
//! Performs exactly one `GET /cotacao` against the quotation server and appends
//! the returned bid to a local file as `Dólar: <bid>`. Any failure, including a
//! non-200 answer, is returned as a `ClientError` for `main` to report.
use log::info;

pub mod args;
pub mod error;
pub mod fetch;
pub mod output;
pub mod result;

pub use args::ClientConfig;
pub use error::ClientError;
pub use fetch::QuotationClient;
pub use result::Result;

/// Fetch the bid once and record it. Returns the line written to disk.
pub async fn run(config: &ClientConfig) -> Result<String> {
    let client = QuotationClient::new(config.url.clone(), config.request_timeout)?;
    let response = client.fetch().await?;
    let record = output::append_bid(&config.output, &response)?;
    info!("{}", saved_message(&record));
    Ok(record)
}

fn saved_message(record: &str) -> String {
    format!("record saved to disk. {}", record)
}
