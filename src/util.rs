//! Shared utilities: binary file detection and source reading.
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Check whether a reader points to a binary file by looking for null
/// bytes in the first 512 bytes. Resets the reader position afterward.
pub fn is_binary_reader<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let mut header = [0u8; 512];
    let n = reader.read(&mut header)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(header[..n].contains(&0))
}

/// Read a source file as UTF-8 with CRLF normalized to LF. Returns
/// `None` for binary files. Byte offsets in clones index into the
/// returned string, so normalization happens here, before detection.
pub fn read_source(path: &Path) -> io::Result<Option<String>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    if is_binary_reader(&mut reader)? {
        return Ok(None);
    }

    let content = io::read_to_string(reader)?;
    Ok(Some(content.replace("\r\n", "\n")))
}

#[cfg(test)]
#[path = "util_test.rs"]
mod tests;
