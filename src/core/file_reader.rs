//! File reading for line counting
//!
//! Provides consistent handling for:
//! - Binary files (first bytes do not decode as UTF-8)
//! - Unreadable files (open/read errors)
//! - Stray invalid bytes later in a text file (dropped)

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected to decide text vs binary
pub const BINARY_PROBE_SIZE: usize = 1024;

/// How a read attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    /// Content was decoded as text
    Text,
    /// Leading bytes are not valid UTF-8
    Binary,
    /// The file could not be opened or read
    Unreadable,
}

impl ReadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadStatus::Text => "TEXT",
            ReadStatus::Binary => "BINARY_FILE",
            ReadStatus::Unreadable => "UNREADABLE_FILE",
        }
    }
}

/// Result of reading a file
#[derive(Debug, Clone)]
pub struct FileReadResult {
    /// Decoded content, present only for [`ReadStatus::Text`]
    pub content: Option<String>,
    pub status: ReadStatus,
    /// Error detail for unreadable files
    pub reason: Option<String>,
}

impl FileReadResult {
    pub fn text(content: String) -> Self {
        Self {
            content: Some(content),
            status: ReadStatus::Text,
            reason: None,
        }
    }

    pub fn binary() -> Self {
        Self {
            content: None,
            status: ReadStatus::Binary,
            reason: None,
        }
    }

    pub fn unreadable(err: &io::Error) -> Self {
        Self {
            content: None,
            status: ReadStatus::Unreadable,
            reason: Some(err.to_string()),
        }
    }
}

/// Whether `probe` decodes as UTF-8.
///
/// A multi-byte sequence cut off at the end of the probe window still counts
/// as text; only a genuinely invalid byte sequence marks the data as binary.
pub fn looks_like_text(probe: &[u8]) -> bool {
    match std::str::from_utf8(probe) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

/// Decode UTF-8, silently dropping invalid bytes
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Read a file as text, classifying it as binary from its first
/// [`BINARY_PROBE_SIZE`] bytes. Binary files are never read past the probe.
/// The handle is dropped before returning.
pub fn read_text_file(path: &Path) -> FileReadResult {
    let mut reader = match File::open(path) {
        Ok(file) => io::BufReader::new(file),
        Err(e) => return FileReadResult::unreadable(&e),
    };

    let mut bytes = Vec::new();
    if let Err(e) = read_probe(&mut reader, &mut bytes) {
        return FileReadResult::unreadable(&e);
    }
    if !looks_like_text(&bytes) {
        return FileReadResult::binary();
    }

    if let Err(e) = reader.read_to_end(&mut bytes) {
        return FileReadResult::unreadable(&e);
    }
    FileReadResult::text(decode_ignoring_invalid(&bytes))
}

/// Append at most [`BINARY_PROBE_SIZE`] bytes from `reader` to `buffer`
fn read_probe<R: Read>(reader: &mut R, buffer: &mut Vec<u8>) -> io::Result<usize> {
    reader
        .by_ref()
        .take(BINARY_PROBE_SIZE as u64)
        .read_to_end(buffer)
}
