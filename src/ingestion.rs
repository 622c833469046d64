//! # Input Ingestion
//!
//! Splits newline-delimited input into raw lines and filters out lines that
//! cannot hold a record. Lines are raw bytes; decoding happens in the workers.

use std::io::{self, BufRead};

use crate::constants::RECORD_OPEN;

/// A line is only worth dispatching if it can contain an object
pub fn is_candidate(line: &[u8]) -> bool {
    line.contains(&RECORD_OPEN)
}

/// Reads raw lines from a buffered source, without line terminators
#[derive(Debug)]
pub struct RecordReader<R> {
    reader: R,
    buffer: Vec<u8>,
    lines_read: u64,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(1024),
            lines_read: 0,
        }
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Read the next line into the internal buffer
    ///
    /// Returns `Ok(None)` at end of input. The slice is valid until the next call.
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.lines_read += 1;

        let mut line: &[u8] = &self.buffer;
        if let Some(stripped) = line.strip_suffix(b"\n") {
            line = stripped;
        }
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_candidate_filter() {
        assert!(is_candidate(br#"{"company":"A"}"#));
        assert!(is_candidate(br#"  {"debt":1},"#));
        assert!(!is_candidate(b"["));
        assert!(!is_candidate(b""));
    }

    #[test]
    fn test_lines_without_terminators() {
        let mut reader = RecordReader::new(Cursor::new(b"[\r\n{\"a\":1},\n\n]".to_vec()));

        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            lines.push(line.to_vec());
        }

        assert_eq!(
            lines,
            vec![b"[".to_vec(), b"{\"a\":1},".to_vec(), Vec::new(), b"]".to_vec()]
        );
        assert_eq!(reader.lines_read(), 4);
    }
}
