//! Line-delimited JSON reading
//!
//! Accepts plain JSON lines as well as the framing of full dumps, which wrap
//! one entity per line in a JSON array (`[`, `entity,`, ..., `]`).

use crate::error::IngestError;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One non-blank input line
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// The line parsed as JSON
    Value {
        /// 1-based line number
        number: usize,
        /// Parsed content
        value: Value,
    },

    /// The line is not valid JSON
    Malformed {
        /// 1-based line number
        number: usize,
        /// Parser message
        error: String,
    },
}

/// Iterator over the JSON lines of a reader
///
/// I/O errors are yielded as `Err`; parse failures, including bytes that
/// are not UTF-8, are yielded as [`Line::Malformed`] so the caller can
/// carry on.
pub struct JsonLines<R> {
    reader: R,
    buf: Vec<u8>,
    number: usize,
}

impl<R: BufRead> JsonLines<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            number: 0,
        }
    }

    /// Number of lines read so far
    pub fn lines_read(&self) -> usize {
        self.number
    }
}

impl<R: BufRead> Iterator for JsonLines<R> {
    type Item = Result<Line, std::io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.number += 1;

            let Some(content) = strip_framing(&self.buf) else {
                continue;
            };

            let line = match serde_json::from_slice(content) {
                Ok(value) => Line::Value {
                    number: self.number,
                    value,
                },
                Err(e) => Line::Malformed {
                    number: self.number,
                    error: e.to_string(),
                },
            };
            return Some(Ok(line));
        }
    }
}

// Blank lines and the array brackets of full dumps carry nothing.
fn strip_framing(line: &[u8]) -> Option<&[u8]> {
    let trimmed = line.trim_ascii();
    if trimmed.is_empty() || trimmed == b"[" || trimmed == b"]" {
        return None;
    }
    Some(trimmed.strip_suffix(b",").unwrap_or(trimmed))
}

/// Open a dump file for line-wise reading
pub fn open_dump<P: AsRef<Path>>(path: P) -> Result<JsonLines<BufReader<File>>, IngestError> {
    let file = File::open(path)?;
    Ok(JsonLines::new(BufReader::new(file)))
}
