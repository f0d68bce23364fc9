//! Quotation Client: asks the quotation server for the current USD-BRL bid and
//! appends it to `cotacao.txt`.
//!
//! Usage example (CLI):
//! ```bash
//! quotation_client -rt 300ms
//! ```
//!
//! Exits with status 1 and a diagnostic on stderr on any failure.
use log::error;
use quotation_client::ClientConfig;
use quotation_client::args::Args;

#[tokio::main]
async fn main() {
    init_logger();
    let config = ClientConfig::from(Args::parse_normalized());
    if let Err(e) = quotation_client::run(&config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
