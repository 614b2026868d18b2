use std::io::{Cursor, Write};

use tempfile::NamedTempFile;

use super::*;

#[test]
fn detects_null_byte_as_binary() {
    let mut reader = Cursor::new(b"hello\x00world".to_vec());
    assert!(is_binary_reader(&mut reader).unwrap());
}

#[test]
fn plain_text_is_not_binary() {
    let mut reader = Cursor::new(b"plain text".to_vec());
    assert!(!is_binary_reader(&mut reader).unwrap());
    // Position was reset for the subsequent full read.
    assert_eq!(reader.position(), 0);
}

#[test]
fn read_source_normalizes_crlf() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"a\r\nb\r\n").unwrap();
    tmp.flush().unwrap();

    let source = read_source(tmp.path()).unwrap().unwrap();
    assert_eq!(source, "a\nb\n");
}

#[test]
fn read_source_skips_binary() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"bin\x00data").unwrap();
    tmp.flush().unwrap();

    assert!(read_source(tmp.path()).unwrap().is_none());
}
