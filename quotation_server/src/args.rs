//! Command-line arguments for the quotation server.
//!
//! Flags keep their Go spelling (`-rt`, `-dbt`, `-p`); see
//! `quotation_common::args::normalize_flags` for how they reach clap.
use std::path::PathBuf;

use clap::Parser;
use quotation_common::GoDuration;
use quotation_common::args::{normalize_flags, with_usage};
use quotation_common::net::{DEFAULT_PORT, UPSTREAM_URL};

use crate::config::DEFAULT_DATABASE;

/// Usage line reported for a bad `-rt` value.
pub const REQUEST_TIMEOUT_USAGE: &str = "request timeout usage: -rt 200ms or -rt 1s or -rt 1m";
/// Usage line reported for a bad `-dbt` value.
pub const DATABASE_TIMEOUT_USAGE: &str = "database timeout usage: -dbt 10ms or -dbt 1s";
/// Usage line reported for a bad `-p` value.
pub const SERVER_PORT_USAGE: &str =
    "server port usage: -p 8080 or -p 3000 (range from 0 to 65535)";

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Serves the current USD-BRL bid and records every quotation", long_about = None)]
pub struct Args {
    /// Request timeout usage: -rt 200ms or -rt 1s or -rt 1m
    #[arg(
        long = "rt",
        value_name = "DURATION",
        default_value = "200ms",
        value_parser = with_usage::<GoDuration>(REQUEST_TIMEOUT_USAGE)
    )]
    pub request_timeout: GoDuration,

    /// Database timeout usage: -dbt 10ms or -dbt 1s
    #[arg(
        long = "dbt",
        value_name = "DURATION",
        default_value = "10ms",
        value_parser = with_usage::<GoDuration>(DATABASE_TIMEOUT_USAGE)
    )]
    pub database_timeout: GoDuration,

    /// Server port usage: -p 8080 or -p 3000 (range from 0 to 65535)
    #[arg(
        short = 'p',
        long = "port",
        default_value_t = DEFAULT_PORT,
        value_parser = with_usage::<u16>(SERVER_PORT_USAGE)
    )]
    pub port: u16,

    /// Upstream quotation endpoint.
    #[arg(long, default_value = UPSTREAM_URL)]
    pub upstream: String,

    /// SQLite database file, created if missing.
    #[arg(long, default_value = DEFAULT_DATABASE)]
    pub db: PathBuf,
}

impl Args {
    /// Parse the process arguments, accepting Go-style `-rt`/`-dbt` flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_flags(std::env::args_os()))
    }
}
