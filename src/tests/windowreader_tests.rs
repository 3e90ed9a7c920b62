// src/tests/windowreader_tests.rs

use crate::common::{Bytes, FPath, FileSz, ResultS3};
use crate::tests::common::{create_temp_file, create_temp_file_bytes, ntf_fpath};
use crate::readers::windowreader::{WindowReader, CHUNKSZ_DEF, WINDOW_SZ_DEF};

use std::io::ErrorKind;

use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// read the entire window of the file at `path`
fn read_window(
    path: &FPath,
    window_cap: FileSz,
    chunksz: usize,
) -> Bytes {
    let mut windowreader = WindowReader::new(path.clone(), window_cap, chunksz).unwrap();
    let mut data = Bytes::new();
    loop {
        match windowreader.read_chunk() {
            ResultS3::Found(chunk) => data.extend_from_slice(&chunk),
            ResultS3::Done => break,
            ResultS3::Err(err) => panic!("read_chunk return Err {}", err),
        }
    }
    data
}

#[test_case(0, WINDOW_SZ_DEF, 0; "empty file")]
#[test_case(1, WINDOW_SZ_DEF, 0; "one byte")]
#[test_case(WINDOW_SZ_DEF, WINDOW_SZ_DEF, 0; "exactly window cap")]
#[test_case(WINDOW_SZ_DEF + 1, WINDOW_SZ_DEF, 1; "one byte over")]
#[test_case(WINDOW_SZ_DEF * 10, WINDOW_SZ_DEF, WINDOW_SZ_DEF * 9; "ten windows")]
#[test_case(100, 10, 90; "small cap")]
fn test_window_start_offset(
    filesz: FileSz,
    window_cap: FileSz,
    expect: FileSz,
) {
    assert_eq!(WindowReader::window_start_offset(filesz, window_cap), expect);
}

#[test]
fn test_new_file_not_found() {
    let result = WindowReader::new(FPath::from("/no/such/path/access.log"), WINDOW_SZ_DEF, CHUNKSZ_DEF);
    match result {
        Ok(_) => panic!("expected Err"),
        Err(err) => assert_eq!(err.kind(), ErrorKind::NotFound),
    }
}

#[test]
fn test_read_whole_small_file() {
    let content = "line one\nline two\nline three\n";
    let ntf = create_temp_file(content);
    let path = ntf_fpath(&ntf);
    let data = read_window(&path, WINDOW_SZ_DEF, 8);
    assert_eq!(data, content.as_bytes());
}

#[test]
fn test_read_empty_file_is_done_immediately() {
    let ntf = create_temp_file("");
    let path = ntf_fpath(&ntf);
    let mut windowreader = WindowReader::new(path, WINDOW_SZ_DEF, CHUNKSZ_DEF).unwrap();
    assert_eq!(windowreader.filesz(), 0);
    assert!(windowreader.read_chunk().is_done());
}

/// a file larger than the cap reads only the trailing `window_cap` bytes
#[test]
fn test_read_trailing_window_only() {
    let data: Bytes = (0..=255u8)
        .cycle()
        .take(1000)
        .collect();
    let ntf = create_temp_file_bytes(&data);
    let path = ntf_fpath(&ntf);
    let window_cap: FileSz = 256;
    let mut windowreader = WindowReader::new(path, window_cap, 64).unwrap();
    assert_eq!(windowreader.filesz(), 1000);
    assert_eq!(windowreader.window_offset(), 1000 - 256);
    assert!(windowreader.is_mid_file_start());
    let mut read: Bytes = Bytes::new();
    loop {
        match windowreader.read_chunk() {
            ResultS3::Found(chunk) => read.extend_from_slice(&chunk),
            ResultS3::Done => break,
            ResultS3::Err(err) => panic!("read_chunk return Err {}", err),
        }
    }
    assert_eq!(windowreader.count_bytes_read(), 256);
    assert_eq!(read, data[1000 - 256..]);
}

#[test]
fn test_small_file_starts_at_zero() {
    let ntf = create_temp_file("tiny\n");
    let path = ntf_fpath(&ntf);
    let windowreader = WindowReader::new(path, WINDOW_SZ_DEF, CHUNKSZ_DEF).unwrap();
    assert_eq!(windowreader.window_offset(), 0);
    assert!(!windowreader.is_mid_file_start());
}

/// chunk size does not change the bytes read
#[test_case(1)]
#[test_case(3)]
#[test_case(16)]
#[test_case(4096)]
fn test_chunk_size_invariance(chunksz: usize) {
    let content = "alpha\nbeta\ngamma\n";
    let ntf = create_temp_file(content);
    let path = ntf_fpath(&ntf);
    let data = read_window(&path, WINDOW_SZ_DEF, chunksz);
    assert_eq!(data, content.as_bytes());
}

#[test]
fn test_count_chunks_read() {
    let ntf = create_temp_file("0123456789");
    let path = ntf_fpath(&ntf);
    let mut windowreader = WindowReader::new(path, WINDOW_SZ_DEF, 4).unwrap();
    while let ResultS3::Found(_) = windowreader.read_chunk() {}
    assert_eq!(windowreader.count_chunks_read(), 3);
    assert_eq!(windowreader.count_bytes_read(), 10);
}
