//! Shared networking constants and helpers used by client and server.

/// Port the quotation server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 8080;
/// Route serving the current bid.
pub const QUOTATION_ROUTE: &str = "/cotacao";
/// Third-party endpoint providing the USD-BRL quotation.
pub const UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
/// Address the client calls by default.
pub const SERVER_URL: &str = "http://localhost:8080/cotacao";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}
