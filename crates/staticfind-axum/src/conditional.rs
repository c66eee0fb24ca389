//! Conditional-GET support: `If-Modified-Since` evaluation and HTTP date
//! formatting.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

/// Header shape: an RFC-2822 date, optionally followed by `; length=N`.
static IF_MODIFIED_SINCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([^;]+)(; length=([0-9]+))?$").expect("hard-coded regex"));

/// Was the file modified since the client last downloaded it?
///
/// Returns `true` (serve the full response) unless every check passes:
/// the header is present and well-formed, its date parses, the optional
/// `length` matches `size` exactly, and `mtime` (seconds since epoch) is
/// not newer than the header date. A `length` mismatch invalidates the
/// conditional check outright.
pub fn was_modified_since(header: Option<&str>, mtime: i64, size: u64) -> bool {
    let Some(header) = header else {
        return true;
    };
    let Some(captures) = IF_MODIFIED_SINCE.captures(header) else {
        return true;
    };
    let Ok(header_date) = DateTime::parse_from_rfc2822(captures[1].trim()) else {
        return true;
    };
    if let Some(length) = captures.get(3) {
        match length.as_str().parse::<u64>() {
            Ok(length) if length == size => {}
            _ => return true,
        }
    }
    mtime > header_date.timestamp()
}

/// Format an epoch-seconds timestamp as an HTTP date
/// (`Sat, 29 Oct 1994 19:43:31 GMT`).
pub fn http_date(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
        .unwrap_or_default()
}
