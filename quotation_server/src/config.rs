//! Server configuration, built once at startup and shared read-only.
use std::path::PathBuf;
use std::time::Duration;

use quotation_common::net::{DEFAULT_PORT, UPSTREAM_URL};

use crate::args::Args;

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "cotacao.db";

/// Everything the handler and store need to know about their environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Budget for the outbound upstream call.
    pub request_timeout: Duration,
    /// Budget for the persistence insert, independent of `request_timeout`.
    pub database_timeout: Duration,
    /// Listen port.
    pub port: u16,
    /// Upstream quotation endpoint.
    pub upstream_url: String,
    /// SQLite database file.
    pub database_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            request_timeout: Duration::from_millis(200),
            database_timeout: Duration::from_millis(10),
            port: DEFAULT_PORT,
            upstream_url: UPSTREAM_URL.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            request_timeout: args.request_timeout.get(),
            database_timeout: args.database_timeout.get(),
            port: args.port,
            upstream_url: args.upstream,
            database_path: args.db,
        }
    }
}
