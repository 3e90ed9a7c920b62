// src/data/accesslog.rs

//! Implements an [`AccessLogEntry`], the structured form of one access-log
//! line.
//!
//! An `AccessLogEntry` is produced only by
//! [`accesslogparser::parse_entry`]; it exists only if the timestamp field
//! and the status field of the source line both parsed.
//!
//! [`AccessLogEntry`]: self::AccessLogEntry
//! [`accesslogparser::parse_entry`]: crate::readers::accesslogparser::parse_entry

use crate::data::datetime::DateTimeL;

use std::fmt;

use ::serde::ser::{Serialize, SerializeStruct, Serializer};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// AccessLogEntry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One parsed access-log line.
///
/// The request fields `method`, `path`, `query`, `protocol` are present only
/// when the quoted request field of the line decomposed into exactly three
/// space-separated tokens; `query` is additionally `None` when empty.
/// A literal `-` in the `referer` or `user_agent` field maps to `None`.
///
/// Serializes as a flat record with exactly eleven fields:
/// `timestamp`, `date`, `ip`, `method`, `path`, `query`, `protocol`,
/// `status_code`, `response_size`, `referer`, `user_agent`.
/// `timestamp` and `date` are derived from [`dt`] at serialization time,
/// not independently stored.
///
/// [`dt`]: AccessLogEntry#structfield.dt
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessLogEntry {
    /// Instant of the logged request, with the timezone offset recorded
    /// in the line.
    pub dt: DateTimeL,
    /// Source address field. Non-empty.
    pub ip: String,
    /// HTTP method token of the request field.
    pub method: Option<String>,
    /// Path component of the request target.
    pub path: Option<String>,
    /// Query component of the request target, without the leading `?`.
    pub query: Option<String>,
    /// Protocol token of the request field, e.g. `HTTP/1.1`.
    pub protocol: Option<String>,
    /// Status field of the line.
    pub status_code: u16,
    /// Size field of the line; a literal `-` or an unparsable value is `0`.
    pub response_size: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
}

impl AccessLogEntry {
    /// The instant of the logged request.
    #[inline(always)]
    pub const fn dt(&self) -> &DateTimeL {
        &self.dt
    }

    /// Canonical ISO-8601 rendering of [`dt`] with timezone offset,
    /// e.g. `2023-10-10T13:55:36+00:00`.
    ///
    /// [`dt`]: AccessLogEntry#structfield.dt
    pub fn timestamp(&self) -> String {
        self.dt.to_rfc3339()
    }

    /// ISO-8601 calendar date component of [`dt`], e.g. `2023-10-10`.
    ///
    /// [`dt`]: AccessLogEntry#structfield.dt
    pub fn date(&self) -> String {
        self.dt
            .format("%Y-%m-%d")
            .to_string()
    }
}

impl fmt::Display for AccessLogEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {} {}",
            self.timestamp(),
            self.ip,
            self.method
                .as_deref()
                .unwrap_or("-"),
            self.path
                .as_deref()
                .unwrap_or("-"),
            self.status_code,
        )
    }
}

impl Serialize for AccessLogEntry {
    /// Emit the flat eleven-field record consumed by the surrounding
    /// HTTP layer.
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("AccessLogEntry", 11)?;
        state.serialize_field("timestamp", &self.timestamp())?;
        state.serialize_field("date", &self.date())?;
        state.serialize_field("ip", &self.ip)?;
        state.serialize_field("method", &self.method)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("query", &self.query)?;
        state.serialize_field("protocol", &self.protocol)?;
        state.serialize_field("status_code", &self.status_code)?;
        state.serialize_field("response_size", &self.response_size)?;
        state.serialize_field("referer", &self.referer)?;
        state.serialize_field("user_agent", &self.user_agent)?;
        state.end()
    }
}
