// src/data/datetime.rs

//! Datetime helpers for access-log timestamp fields.
//!
//! An access-log timestamp carries an explicit timezone offset,
//! e.g. `10/Oct/2023:13:55:36 +0000`, so the parsed representation is a
//! [`DateTime`] over a [`FixedOffset`].
//!
//! [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
//! [`FixedOffset`]: https://docs.rs/chrono/0.4.40/chrono/offset/struct.FixedOffset.html

use ::chrono::{DateTime, FixedOffset};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The chosen "_L_og" DateTime type: an instant with a fixed timezone offset.
pub type DateTimeL = DateTime<FixedOffset>;

/// Optional [`DateTimeL`].
pub type DateTimeLOpt = Option<DateTimeL>;

/// [strftime] pattern of an access-log timestamp field,
/// e.g. `10/Oct/2023:13:55:36 +0000`.
///
/// [strftime]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
pub const DATETIME_PATTERN_ACCESS_LOG: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Clean wrapper around [`chrono::DateTime::parse_from_str`].
///
/// A failed parse is an expected, frequent case (malformed log lines) so it
/// returns `None`, not an error.
///
/// [`chrono::DateTime::parse_from_str`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html#method.parse_from_str
pub fn datetime_parse_from_str(
    data: &str,
    pattern: &str,
) -> DateTimeLOpt {
    match DateTime::parse_from_str(data, pattern) {
        Ok(dt) => {
            defñ!("datetime_parse_from_str({:?}) Ok", data);
            Some(dt)
        }
        Err(_err) => {
            defñ!("datetime_parse_from_str({:?}) Err {}", data, _err);
            None
        }
    }
}
