// src/readers/mod.rs

//! The `readers` module is the reading and processing stages of the
//! access-log tail pipeline, leaf-first:
//!
//! * [`windowreader`] — stat the file, compute the trailing window offset,
//!   read the window sequentially in fixed-size chunks.
//! * [`linereassembler`] — reconstruct complete text lines from arbitrary
//!   chunk boundaries, bounded retention.
//! * [`accesslogparser`] — match one line against the access-log grammar
//!   and convert it to an [`AccessLogEntry`].
//! * [`tailprocessor`] — drive the stages and return the sorted, capped
//!   entry list.
//!
//! Data flows one direction: file size → window offset → byte stream →
//! line stream → entry stream → sorted bounded list. No stage holds a
//! reference back to its caller.
//!
//! [`AccessLogEntry`]: crate::data::accesslog::AccessLogEntry

pub mod accesslogparser;
pub mod linereassembler;
pub mod tailprocessor;
pub mod windowreader;
