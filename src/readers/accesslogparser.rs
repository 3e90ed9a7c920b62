// src/readers/accesslogparser.rs

//! Matches one reassembled text line against the fixed access-log grammar
//! and converts it to an [`AccessLogEntry`].
//!
//! The grammar is the "combined" Nginx access-log format:
//!
//! ```text
//! <ip> - - [<timestamp>] "<request>" <status> <size> "<referer>" "<user_agent>"
//! ```
//!
//! The compiled pattern is process-wide read-only state initialized once;
//! it is safe to share across concurrent invocations without locking.
//!
//! Malformed lines are an expected, frequent case, not an error:
//! [`parse_entry`] returns `None` and the caller skips the line.
//!
//! [`AccessLogEntry`]: crate::data::accesslog::AccessLogEntry
//! [`parse_entry`]: self::parse_entry

use crate::data::accesslog::AccessLogEntry;
use crate::data::datetime::{datetime_parse_from_str, DateTimeL, DATETIME_PATTERN_ACCESS_LOG};

use ::lazy_static::lazy_static;
use ::regex::{Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Regular expression pattern for one access-log line.
///
/// Anchored at line start only; trailing data after the user-agent field
/// does not reject the line.
const ACCESS_LOG_PATTERN: &str = concat!(
    r#"^(?P<ip>\S+)\s+-\s+-\s+"#,          // source address
    r#"\[(?P<timestamp>[^\]]+)\]\s+"#,     // timestamp field
    r#""(?P<request>[^"]+)"\s+"#,          // quoted request field
    r#"(?P<status>\d+)\s+"#,               // status field
    r#"(?P<size>\d+|-)\s+"#,               // size field
    r#""(?P<referer>[^"]*)"\s+"#,          // quoted referer field
    r#""(?P<user_agent>[^"]*)""#,          // quoted user-agent field
);

lazy_static! {
    /// Compiled grammar, shared by all invocations.
    static ref ACCESS_LOG_REGEX: Regex = Regex::new(ACCESS_LOG_PATTERN).unwrap();
}

/// A literal `-` field value maps to absent.
fn field_to_opt(field: &str) -> Option<String> {
    match field {
        "-" => None,
        _ => Some(String::from(field)),
    }
}

/// Decompose the quoted request field into exactly three space-separated
/// tokens `(method, path, query, protocol)`, the path further split from
/// its query on the first `?`. An empty query is normalized to `None`.
///
/// Any other token count is a malformed request field; `None`, and the
/// whole line is rejected (no partial entry).
fn split_request(request: &str) -> Option<(String, String, Option<String>, String)> {
    let tokens: Vec<&str> = request
        .splitn(3, ' ')
        .collect();
    if tokens.len() != 3 {
        defñ!("malformed request field {:?}", request);
        return None;
    }
    let method: &str = tokens[0];
    let path_query: &str = tokens[1];
    let protocol: &str = tokens[2];
    let (path, query): (&str, Option<&str>) = match path_query.split_once('?') {
        Some((p, q)) if !q.is_empty() => (p, Some(q)),
        Some((p, _empty)) => (p, None),
        None => (path_query, None),
    };
    Some((
        String::from(method),
        String::from(path),
        query.map(String::from),
        String::from(protocol),
    ))
}

/// Match one trimmed text line against the access-log grammar.
///
/// `Some(AccessLogEntry)` only if the timestamp field, the status field,
/// and the request field decomposition all succeed. A size field that is
/// `-` or fails to parse degrades to `0` and keeps the line; this
/// asymmetry with status handling is deliberate.
///
/// Blank lines, corrupted lines, and lines of a different format return
/// `None`; never an error.
pub fn parse_entry(line: &str) -> Option<AccessLogEntry> {
    let captures: Captures = match ACCESS_LOG_REGEX.captures(line) {
        Some(captures) => captures,
        None => {
            defñ!("no grammar match {:?}", line);
            return None;
        }
    };
    // all named groups are mandatory within a match
    let ip: &str = captures.name("ip")?.as_str();
    let timestamp: &str = captures
        .name("timestamp")?
        .as_str();
    let request: &str = captures
        .name("request")?
        .as_str();
    let status: &str = captures
        .name("status")?
        .as_str();
    let size: &str = captures.name("size")?.as_str();
    let referer: &str = captures
        .name("referer")?
        .as_str();
    let user_agent: &str = captures
        .name("user_agent")?
        .as_str();

    // timestamp parse failure rejects the line entirely
    let dt: DateTimeL = datetime_parse_from_str(timestamp, DATETIME_PATTERN_ACCESS_LOG)?;
    // status parse failure rejects the line entirely
    // (the pattern passes any digit run; overflow must still reject)
    let status_code: u16 = status
        .parse::<u16>()
        .ok()?;
    // request decomposition failure rejects the line entirely
    let (method, path, query, protocol) = split_request(request)?;
    // size parse failure degrades to 0, does not reject
    let response_size: u64 = match size {
        "-" => 0,
        _ => size
            .parse::<u64>()
            .unwrap_or(0),
    };

    Some(AccessLogEntry {
        dt,
        ip: String::from(ip),
        method: Some(method),
        path: Some(path),
        query,
        protocol: Some(protocol),
        status_code,
        response_size,
        referer: field_to_opt(referer),
        user_agent: field_to_opt(user_agent),
    })
}
