// src/readers/linereassembler.rs

//! Implements a [`LineReassembler`], the driver of deriving complete text
//! lines from the byte chunks yielded by a [`WindowReader`].
//!
//! Chunk boundaries are arbitrary; a line may span any number of chunks.
//! The reassembler holds the trailing partial bytes of each chunk in a
//! pending buffer, emits every complete line in file order, and retains at
//! most [`MAX_RETAINED_LINES`] lines, evicting the oldest first. The
//! retention cap bounds memory independent of the window size; on windows
//! holding more raw lines than the cap, the oldest candidates are lost
//! before parsing is attempted. Accepted approximation.
//!
//! [`LineReassembler`]: self::LineReassembler
//! [`WindowReader`]: crate::readers::windowreader::WindowReader
//! [`MAX_RETAINED_LINES`]: self::MAX_RETAINED_LINES

use crate::common::{Count, NLu8};

use std::collections::VecDeque;
use std::fmt;

use ::memchr::memchr;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Default maximum count of retained lines.
pub const MAX_RETAINED_LINES: usize = 2000;

/// Sequence of retained lines, oldest at the front.
pub type RetainedLines = VecDeque<String>;

/// A small state machine that reconstructs logical text lines from
/// arbitrary byte-chunk boundaries.
///
/// Feed with successive [`ingest`] calls, finalize with [`flush`], then
/// consume via [`into_lines`].
///
/// Decoding is best-effort: byte sequences that are not valid UTF-8 are
/// replaced at decode time and never abort the chunk or the file.
///
/// [`ingest`]: LineReassembler#method.ingest
/// [`flush`]: LineReassembler#method.flush
/// [`into_lines`]: LineReassembler#method.into_lines
pub struct LineReassembler {
    /// Trailing partial line bytes carried across `ingest` calls.
    pending: Vec<u8>,
    /// Complete lines in file order, oldest at the front, newest at the
    /// back. Holds at most `max_retained` entries.
    lines: RetainedLines,
    /// When the read began mid-file the first produced line is potentially
    /// truncated at its head; it is discarded unconditionally, never
    /// retained or counted.
    discard_partial_head: bool,
    /// Maximum count of retained lines.
    max_retained: usize,
    /// `Count` of complete lines produced (after any head discard).
    count_lines_produced: Count,
    /// `Count` of retained lines evicted by the retention cap.
    count_lines_evicted: Count,
    /// `Count` of bytes ingested.
    count_bytes_ingested: Count,
}

impl fmt::Debug for LineReassembler {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LineReassembler")
            .field("pending bytes", &self.pending.len())
            .field("retained lines", &self.lines.len())
            .field("discard_partial_head", &self.discard_partial_head)
            .field("max_retained", &self.max_retained)
            .finish()
    }
}

impl LineReassembler {
    /// Create a new `LineReassembler`.
    ///
    /// Pass `discard_partial_head` `true` when the read began at a non-zero
    /// file offset.
    pub fn new(
        discard_partial_head: bool,
        max_retained: usize,
    ) -> LineReassembler {
        defñ!("LineReassembler::new({}, {})", discard_partial_head, max_retained);
        assert_ne!(max_retained, 0, "max_retained is zero");
        LineReassembler {
            pending: Vec::new(),
            lines: RetainedLines::with_capacity(std::cmp::min(max_retained, 64)),
            discard_partial_head,
            max_retained,
            count_lines_produced: 0,
            count_lines_evicted: 0,
            count_bytes_ingested: 0,
        }
    }

    /// Consume one chunk of raw bytes; extract every complete line now in
    /// the accumulation buffer, leave trailing partial data pending for
    /// the next chunk.
    pub fn ingest(
        &mut self,
        chunk: &[u8],
    ) {
        defn!("{} bytes", chunk.len());
        self.count_bytes_ingested += chunk.len() as Count;
        self.pending
            .extend_from_slice(chunk);
        let mut at: usize = 0;
        while let Some(index) = memchr(NLu8, &self.pending[at..]) {
            let end: usize = at + index;
            // XXX: cannot pass `&self.pending[at..end]` to a `&mut self`
            //      helper while borrowing `self.pending`; decode first
            let line: String = Self::decode(&self.pending[at..end]);
            self.push_line(line);
            at = end + 1;
        }
        if at != 0 {
            self.pending
                .drain(..at);
        }
        defx!("pending {} bytes, retained {} lines", self.pending.len(), self.lines.len());
    }

    /// End of input: emit any non-empty remainder as a final line.
    pub fn flush(&mut self) {
        defñ!("pending {} bytes", self.pending.len());
        if self
            .pending
            .is_empty()
        {
            return;
        }
        let remainder: Vec<u8> = std::mem::take(&mut self.pending);
        let line: String = Self::decode(&remainder);
        self.push_line(line);
    }

    /// Count of currently retained lines.
    #[inline(always)]
    pub fn count_lines_retained(&self) -> usize {
        self.lines.len()
    }

    /// `Count` of complete lines produced (after any head discard).
    #[inline(always)]
    pub const fn count_lines_produced(&self) -> Count {
        self.count_lines_produced
    }

    /// `Count` of retained lines evicted by the retention cap.
    #[inline(always)]
    pub const fn count_lines_evicted(&self) -> Count {
        self.count_lines_evicted
    }

    /// `Count` of bytes ingested.
    #[inline(always)]
    pub const fn count_bytes_ingested(&self) -> Count {
        self.count_bytes_ingested
    }

    /// Consume `self`; the retained lines in file order, oldest at the
    /// front. Callers wanting newest-first iterate in reverse.
    pub fn into_lines(self) -> RetainedLines {
        defñ!("{} lines", self.lines.len());
        self.lines
    }

    /// Best-effort decode; invalid sequences are replaced, not fatal.
    /// Lines are handed onward trimmed (`\r` of a `\r\n` terminator
    /// included).
    fn decode(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes)
            .trim()
            .to_string()
    }

    /// Retain one produced line, honoring the head discard and the
    /// retention cap.
    fn push_line(
        &mut self,
        line: String,
    ) {
        if self.discard_partial_head {
            defo!("discard potentially truncated head line {:?}", line);
            self.discard_partial_head = false;
            return;
        }
        self.lines
            .push_back(line);
        self.count_lines_produced += 1;
        if self.lines.len() > self.max_retained {
            self.lines
                .pop_front();
            self.count_lines_evicted += 1;
        }
    }
}
