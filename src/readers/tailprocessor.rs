// src/readers/tailprocessor.rs

//! Implements a [`TailProcessor`], the driver of the processing stages for
//! one access-log tail extraction:
//!
//! 1. stat the file (absent file is "nothing to show yet", not an error)
//! 2. compute the trailing window offset
//! 3. stream the window in chunks through a [`LineReassembler`]
//! 4. walk the reassembled lines newest to oldest through
//!    [`parse_entry`], collecting up to [`MAX_ENTRIES`] entries
//! 5. stable sort by parsed timestamp, descending
//!
//! Every failure internal to the pipeline is absorbed and converted into
//! "fewer or zero entries" plus an out-of-band note; nothing propagates an
//! error across this boundary. Log viewing is diagnostic tooling; degrading
//! to "no data" beats failing the whole request.
//!
//! [`TailProcessor`]: self::TailProcessor
//! [`LineReassembler`]: crate::readers::linereassembler::LineReassembler
//! [`parse_entry`]: crate::readers::accesslogparser::parse_entry
//! [`MAX_ENTRIES`]: self::MAX_ENTRIES

use crate::common::{Count, FPath, FileSz, ResultS3};
use crate::data::accesslog::AccessLogEntry;
use crate::readers::accesslogparser::parse_entry;
use crate::readers::linereassembler::{LineReassembler, RetainedLines, MAX_RETAINED_LINES};
use crate::readers::windowreader::{WindowReader, CHUNKSZ_DEF, WINDOW_SZ_DEF};
use crate::{de_wrn, e_err};

use std::fmt;
use std::io::{ErrorKind, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use ::crossbeam_channel;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Maximum count of entries returned by one extraction.
pub const MAX_ENTRIES: usize = 1000;

/// Shared cancellation flag, checked between chunk reads. A cancelled run
/// yields "no result", never a truncated one.
pub type CancelToken = Arc<AtomicBool>;

/// Sorted, capped entries from one extraction. Owned by the caller.
pub type AccessLogEntries = Vec<AccessLogEntry>;

/// Receiver side of [`TailProcessor::process_spawned`].
///
/// [`TailProcessor::process_spawned`]: TailProcessor#method.process_spawned
pub type RecvAccessLogEntries = crossbeam_channel::Receiver<AccessLogEntries>;

/// The driver of one access-log tail extraction.
///
/// One `TailProcessor` per invocation; it opens its own file handle and
/// builds its own buffers. Concurrent invocations for the same or
/// different files are independent and require no locking.
pub struct TailProcessor {
    /// Path to the access log.
    path: FPath,
    /// Trailing window cap in bytes.
    window_cap: FileSz,
    /// Optional cancellation flag shared with the caller.
    cancel: Option<CancelToken>,
    /// `Count` of reassembled lines fed to the parser.
    count_lines_scanned: Count,
    /// `Count` of scanned lines the grammar rejected.
    count_lines_rejected: Count,
    /// `Count` of retained lines evicted by the reassembler cap.
    count_lines_evicted: Count,
    /// `Count` of bytes read from the file.
    count_bytes_read: Count,
}

impl fmt::Debug for TailProcessor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("TailProcessor")
            .field("path", &self.path)
            .field("window_cap", &self.window_cap)
            .field("lines scanned", &self.count_lines_scanned)
            .field("lines rejected", &self.count_lines_rejected)
            .finish()
    }
}

impl TailProcessor {
    /// Create a new `TailProcessor` with the default window cap
    /// ([`WINDOW_SZ_DEF`], 10 MiB).
    ///
    /// [`WINDOW_SZ_DEF`]: crate::readers::windowreader::WINDOW_SZ_DEF
    pub fn new(path: FPath) -> TailProcessor {
        TailProcessor::with_window_cap(path, WINDOW_SZ_DEF)
    }

    /// Create a new `TailProcessor` with an explicit window cap.
    pub fn with_window_cap(
        path: FPath,
        window_cap: FileSz,
    ) -> TailProcessor {
        defñ!("TailProcessor::with_window_cap({:?}, {})", path, window_cap);
        TailProcessor {
            path,
            window_cap,
            cancel: None,
            count_lines_scanned: 0,
            count_lines_rejected: 0,
            count_lines_evicted: 0,
            count_bytes_read: 0,
        }
    }

    /// Share a cancellation flag with the caller. Checked between chunk
    /// reads; worst-case abort latency is one chunk read.
    pub fn set_cancel_token(
        &mut self,
        cancel: CancelToken,
    ) {
        self.cancel = Some(cancel);
    }

    /// Path to the access log.
    #[inline(always)]
    pub const fn path(&self) -> &FPath {
        &self.path
    }

    /// `Count` of reassembled lines fed to the parser.
    #[inline(always)]
    pub const fn count_lines_scanned(&self) -> Count {
        self.count_lines_scanned
    }

    /// `Count` of scanned lines the grammar rejected.
    #[inline(always)]
    pub const fn count_lines_rejected(&self) -> Count {
        self.count_lines_rejected
    }

    /// `Count` of retained lines evicted by the reassembler cap.
    #[inline(always)]
    pub const fn count_lines_evicted(&self) -> Count {
        self.count_lines_evicted
    }

    /// `Count` of bytes read from the file.
    #[inline(always)]
    pub const fn count_bytes_read(&self) -> Count {
        self.count_bytes_read
    }

    fn is_cancelled(&self) -> bool {
        match &self.cancel {
            Some(cancel) => cancel.load(Ordering::Relaxed),
            None => false,
        }
    }

    /// Run the extraction: the most recent entries of the access log,
    /// sorted by parsed timestamp descending, at most [`MAX_ENTRIES`].
    ///
    /// Never fails: an absent file, an unreadable file, or a mid-read I/O
    /// failure degrades to an empty result with a logged cause.
    ///
    /// [`MAX_ENTRIES`]: self::MAX_ENTRIES
    pub fn process(&mut self) -> AccessLogEntries {
        defn!("({:?})", self.path);
        let entries: AccessLogEntries = match self.process_window() {
            Ok(entries) => entries,
            Err(err) => {
                e_err!("failed to process {:?}: {}", self.path, err);
                AccessLogEntries::new()
            }
        };
        defx!("return {} entries", entries.len());
        entries
    }

    /// The fallible pipeline behind [`process`].
    ///
    /// [`process`]: TailProcessor#method.process
    fn process_window(&mut self) -> Result<AccessLogEntries> {
        // stat + locate + open + seek
        let mut windowreader: WindowReader =
            match WindowReader::new(self.path.clone(), self.window_cap, CHUNKSZ_DEF) {
                Ok(windowreader) => windowreader,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    de_wrn!("access log not found {:?}", self.path);
                    return Ok(AccessLogEntries::new());
                }
                Err(err) => return Err(err),
            };
        defo!(
            "filesz {}, window_offset {}, mid-file start {}",
            windowreader.filesz(),
            windowreader.window_offset(),
            windowreader.is_mid_file_start(),
        );

        // stream + reassemble
        let mut reassembler: LineReassembler =
            LineReassembler::new(windowreader.is_mid_file_start(), MAX_RETAINED_LINES);
        loop {
            if self.is_cancelled() {
                defx!("cancelled; return no result");
                return Ok(AccessLogEntries::new());
            }
            match windowreader.read_chunk() {
                ResultS3::Found(chunk) => {
                    reassembler.ingest(&chunk);
                }
                ResultS3::Done => break,
                ResultS3::Err(err) => return Err(err),
            }
        }
        reassembler.flush();
        self.count_bytes_read = windowreader.count_bytes_read();
        self.count_lines_evicted = reassembler.count_lines_evicted();

        // collect newest to oldest, stop at the cap; early exit, not
        // post-hoc truncation
        let lines: RetainedLines = reassembler.into_lines();
        let mut entries: AccessLogEntries = AccessLogEntries::new();
        for line in lines.iter().rev() {
            if entries.len() >= MAX_ENTRIES {
                defo!("collected {} entries; stop scanning", MAX_ENTRIES);
                break;
            }
            self.count_lines_scanned += 1;
            match parse_entry(line) {
                Some(entry) => entries.push(entry),
                None => {
                    self.count_lines_rejected += 1;
                }
            }
        }

        // stable sort by parsed instant, descending; ties keep scan order
        // (newest file position first)
        entries.sort_by(|a, b| b.dt().cmp(a.dt()));

        Ok(entries)
    }

    /// Run [`process`] on its own named thread so the read stays off the
    /// critical path of the caller's other in-flight operations.
    ///
    /// The result arrives once on the returned bounded channel. A spawn
    /// failure delivers the empty result.
    ///
    /// [`process`]: TailProcessor#method.process
    pub fn process_spawned(
        path: FPath,
        cancel: Option<CancelToken>,
    ) -> RecvAccessLogEntries {
        defñ!("TailProcessor::process_spawned({:?})", path);
        let (chan_send, chan_recv): (
            crossbeam_channel::Sender<AccessLogEntries>,
            RecvAccessLogEntries,
        ) = crossbeam_channel::bounded(1);
        let chan_send_ = chan_send.clone();
        let path_ = path.clone();
        match thread::Builder::new()
            .name(String::from("access-log-tail"))
            .spawn(move || {
                let mut processor = TailProcessor::new(path_);
                if let Some(cancel) = cancel {
                    processor.set_cancel_token(cancel);
                }
                let entries: AccessLogEntries = processor.process();
                // the caller may have dropped the receiver; nothing to do
                let _ = chan_send.send(entries);
            }) {
            Ok(_join_handle) => {}
            Err(err) => {
                e_err!("thread spawn failed for {:?}: {}", path, err);
                let _ = chan_send_.send(AccessLogEntries::new());
            }
        }

        chan_recv
    }
}
