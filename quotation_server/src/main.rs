//! Quotation server binary.
//!
//! Usage example:
//! ```bash
//! quotation_server -rt 200ms -dbt 10ms -p 8080
//! ```
//!
//! Everything interesting lives in the library crate; this file only wires the
//! logger, the CLI and process exit codes together.
use log::error;
use quotation_server::ServerConfig;
use quotation_server::args::Args;

#[tokio::main]
async fn main() {
    init_logger();
    let config = ServerConfig::from(Args::parse_normalized());
    if let Err(e) = quotation_server::run(config).await {
        error!("*** ERROR ***: {}", e);
        std::process::exit(1);
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
