//! Command-line arguments for the quotation client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quotation_common::GoDuration;
use quotation_common::args::{normalize_flags, with_usage};
use quotation_common::net::SERVER_URL;

/// File the bid is appended to unless `--output` says otherwise.
pub const DEFAULT_OUTPUT: &str = "cotacao.txt";

/// Usage line reported for a bad `-rt` value.
pub const REQUEST_TIMEOUT_USAGE: &str = "request timeout usage: -rt 200ms or -rt 1s or -rt 1m";

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Fetches the current USD-BRL bid and appends it to a file", long_about = None)]
pub struct Args {
    /// Request timeout usage: -rt 200ms or -rt 1s or -rt 1m
    #[arg(
        long = "rt",
        value_name = "DURATION",
        default_value = "200ms",
        value_parser = with_usage::<GoDuration>(REQUEST_TIMEOUT_USAGE)
    )]
    pub request_timeout: GoDuration,

    /// Quotation server endpoint.
    #[arg(long, default_value = SERVER_URL)]
    pub url: String,

    /// File the bid is appended to.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

impl Args {
    /// Parse the process arguments, accepting the Go-style `-rt` flag.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_flags(std::env::args_os()))
    }
}

/// Client configuration built once from `Args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Budget for the whole request, body included.
    pub request_timeout: Duration,
    /// Server endpoint.
    pub url: String,
    /// Output file.
    pub output: PathBuf,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        ClientConfig {
            request_timeout: args.request_timeout.get(),
            url: args.url,
            output: args.output,
        }
    }
}
