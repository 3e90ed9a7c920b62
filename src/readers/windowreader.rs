// src/readers/windowreader.rs

//! Implements a [`WindowReader`], the driver of reading bytes from the
//! trailing window of an access-log file.
//!
//! A `WindowReader` opens one file read-only, computes the window start
//! offset from the file size (see [`window_start_offset`]), seeks there,
//! and yields sequential fixed-size chunks until end of file. Each
//! invocation of the pipeline owns its own `WindowReader`; there is no
//! shared mutable state between concurrent invocations.
//!
//! [`WindowReader`]: self::WindowReader
//! [`window_start_offset`]: WindowReader::window_start_offset

use crate::common::{Bytes, Count, FPath, File, FileMetadata, FileOffset, FileOpenOptions, FileSz, ResultS3};

use std::fmt;
use std::io::{Error, Read, Result, Seek, SeekFrom};
use std::path::Path;

#[allow(unused_imports)]
use ::more_asserts::{debug_assert_ge, debug_assert_le};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Size of one sequential read in bytes.
pub type ChunkSz = usize;

/// Absolute minimum chunk size in bytes (inclusive).
pub const CHUNKSZ_MIN: ChunkSz = 1;

/// Default chunk size in bytes; 8 KiB.
pub const CHUNKSZ_DEF: ChunkSz = 0x2000;

/// Default trailing window cap in bytes; 10 MiB.
///
/// Files at most this size are processed whole; larger files are processed
/// from `filesz - WINDOW_SZ_DEF` to the end.
pub const WINDOW_SZ_DEF: FileSz = 10 * 1024 * 1024;

/// A typed [`ResultS3`] for function [`WindowReader::read_chunk`].
///
/// [`ResultS3`]: crate::common::ResultS3
/// [`WindowReader::read_chunk`]: WindowReader#method.read_chunk
pub type ResultS3ReadChunk = ResultS3<Bytes, Error>;

/// A reader of the trailing window of one file.
///
/// _XXX: not a rust "Reader"; does not implement trait [`Read`]._
///
/// [`Read`]: std::io::Read
pub struct WindowReader {
    /// Path to the file.
    path: FPath,
    /// Open file handle.
    file: File,
    /// File size in bytes as of `open`, from [`fs::Metadata`].
    ///
    /// [`fs::Metadata`]: std::fs::Metadata
    filesz: FileSz,
    /// First byte offset of the processing window.
    /// `0` for files not larger than the window cap.
    window_offset: FileOffset,
    /// Offset of the next byte to read. Begins at `window_offset`.
    fileoffset: FileOffset,
    /// Size of one sequential read.
    chunksz: ChunkSz,
    /// `Count` of bytes read by this `WindowReader`.
    count_bytes_read: Count,
    /// `Count` of chunks returned by [`read_chunk`].
    ///
    /// [`read_chunk`]: WindowReader#method.read_chunk
    count_chunks_read: Count,
}

impl fmt::Debug for WindowReader {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("WindowReader")
            .field("path", &self.path)
            .field("filesz", &self.filesz)
            .field("window_offset", &self.window_offset)
            .field("fileoffset", &self.fileoffset)
            .field("chunksz", &self.chunksz)
            .finish()
    }
}

impl WindowReader {
    /// First byte offset of the processing window for a file of
    /// `filesz` bytes under `window_cap`.
    ///
    /// `0` when the entire file fits the window, else `filesz - window_cap`.
    /// Pure; never fails for any input.
    pub const fn window_start_offset(
        filesz: FileSz,
        window_cap: FileSz,
    ) -> FileOffset {
        if filesz <= window_cap {
            0
        } else {
            filesz - window_cap
        }
    }

    /// Create a new `WindowReader`, open the file, stat it, and seek to
    /// the window start.
    ///
    /// An absent file is returned as the `Err` from [`File::open`]
    /// (`ErrorKind::NotFound`); the caller decides how to degrade.
    ///
    /// [`File::open`]: std::fs::File#method.open
    pub fn new(
        path: FPath,
        window_cap: FileSz,
        chunksz: ChunkSz,
    ) -> Result<WindowReader> {
        defn!("({:?}, {}, {})", path, window_cap, chunksz);
        debug_assert_ge!(chunksz, CHUNKSZ_MIN, "ChunkSz {} is too small", chunksz);

        let mut open_options = FileOpenOptions::new();
        let mut file: File = open_options
            .read(true)
            .open(Path::new(&path))?;
        let metadata: FileMetadata = file.metadata()?;
        let filesz: FileSz = metadata.len();
        let window_offset: FileOffset = WindowReader::window_start_offset(filesz, window_cap);
        file.seek(SeekFrom::Start(window_offset))?;
        defx!("filesz {}, window_offset {}", filesz, window_offset);

        Ok(WindowReader {
            path,
            file,
            filesz,
            window_offset,
            fileoffset: window_offset,
            chunksz,
            count_bytes_read: 0,
            count_chunks_read: 0,
        })
    }

    /// Path of the file being read.
    #[inline(always)]
    pub const fn path(&self) -> &FPath {
        &self.path
    }

    /// File size in bytes as of `open`.
    #[inline(always)]
    pub const fn filesz(&self) -> FileSz {
        self.filesz
    }

    /// First byte offset of the processing window.
    #[inline(always)]
    pub const fn window_offset(&self) -> FileOffset {
        self.window_offset
    }

    /// Did the window begin past the start of the file?
    ///
    /// When `true` the first reassembled line is potentially head-truncated
    /// and must be discarded.
    #[inline(always)]
    pub const fn is_mid_file_start(&self) -> bool {
        self.window_offset != 0
    }

    /// `Count` of bytes read so far.
    #[inline(always)]
    pub const fn count_bytes_read(&self) -> Count {
        self.count_bytes_read
    }

    /// `Count` of chunks returned so far.
    #[inline(always)]
    pub const fn count_chunks_read(&self) -> Count {
        self.count_chunks_read
    }

    /// Read the next sequential chunk of the window.
    ///
    /// Returns:
    /// - `Found(bytes)` with `1..=chunksz` bytes,
    /// - `Done` when the window is exhausted (reads stop at the file size
    ///   recorded at `open`; bytes appended afterward belong to the next
    ///   invocation),
    /// - `Err` on an I/O failure mid-read. Not retried.
    pub fn read_chunk(&mut self) -> ResultS3ReadChunk {
        defn!("fileoffset {}", self.fileoffset);
        debug_assert_le!(self.fileoffset, self.filesz);
        if self.fileoffset >= self.filesz {
            defx!("return Done");
            return ResultS3ReadChunk::Done;
        }
        let remaining: FileSz = self.filesz - self.fileoffset;
        let readsz: usize = std::cmp::min(self.chunksz as FileSz, remaining) as usize;
        let mut buffer: Bytes = vec![0; readsz];
        match self
            .file
            .read(&mut buffer)
        {
            Ok(0) => {
                // the file shrank since `open`
                defx!("read 0 bytes at fileoffset {}; return Done", self.fileoffset);
                ResultS3ReadChunk::Done
            }
            Ok(n) => {
                buffer.truncate(n);
                self.fileoffset += n as FileOffset;
                self.count_bytes_read += n as Count;
                self.count_chunks_read += 1;
                defx!("return Found, {} bytes", n);
                ResultS3ReadChunk::Found(buffer)
            }
            Err(err) => {
                defx!("return Err {}", err);
                ResultS3ReadChunk::Err(err)
            }
        }
    }
}
