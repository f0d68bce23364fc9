//! Appending bids to the local output file.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use quotation_common::model::QuotationResponse;

use crate::result::Result;

/// Label written in front of every bid.
pub const LABEL: &str = "Dólar: ";

/// Formats the line recorded for `response`, without the trailing newline.
pub fn format_record(response: &QuotationResponse) -> String {
    format!("{}{}", LABEL, response.bid)
}

/// Appends one `Dólar: <bid>` line to `path`, creating the file if needed.
///
/// Returns the recorded line.
pub fn append_bid(path: &Path, response: &QuotationResponse) -> Result<String> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o660);
    }

    let mut file = options.open(path)?;
    let record = format_record(response);
    writeln!(file, "{}", record)?;
    Ok(record)
}
