//! Command-line normalisation shared by both binaries.
//!
//! Operators pass timeouts the Go way (`-rt 200ms`, `-dbt 10ms`), with a single
//! dash in front of a multi-letter flag. clap only accepts single-character
//! short flags, so those tokens are rewritten to their `--` long form first.
use std::ffi::OsString;
use std::str::FromStr;

use crate::error::ConfigError;

/// Rewrites single-dash multi-letter flags (`-rt`) to long flags (`--rt`).
///
/// The program name, values, negative numbers, single-letter flags (`-p`,
/// `-p=3000`) and everything after a `--` terminator are left untouched.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut terminated = false;
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            let arg: OsString = arg.into();
            if index == 0 || terminated {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                terminated = true;
                return arg;
            }
            if is_go_style_flag(text) {
                return OsString::from(format!("-{}", text));
            }
            arg
        })
        .collect()
}

/// clap value parser that reports any bad value with the flag's `usage` line.
///
/// ```ignore
/// #[arg(long = "rt", value_parser = with_usage::<GoDuration>(REQUEST_TIMEOUT_USAGE))]
/// ```
pub fn with_usage<T>(
    usage: &'static str,
) -> impl Fn(&str) -> Result<T, ConfigError> + Clone + Send + Sync + 'static
where
    T: FromStr + 'static,
{
    move |value: &str| {
        value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidArgument { usage })
    }
}

/// `-name` or `-name=value` where `name` is longer than one letter.
fn is_go_style_flag(text: &str) -> bool {
    let Some(flag) = text.strip_prefix('-') else {
        return false;
    };
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    name.starts_with(|c: char| c.is_ascii_alphabetic()) && name.chars().count() > 1
}
