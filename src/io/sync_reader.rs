//! Synchronous request reader with iterator interface
//!
//! Provides a streaming iterator over load requests from a line-delimited JSON
//! file. Delegates format concerns to the json_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<LoadRequest, VelocityError>` for each non-blank line:
//!
//! ```no_run
//! use velocity_limits::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::open(Path::new("input.txt")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(request) => println!("Deciding request: {:?}", request),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Failing to open the file is returned from `open()`
//! - Read and parse errors are yielded as Err variants, with line numbers
//! - Callers are expected to stop at the first error; the reader itself does
//!   not, so it can be reused in diagnostics tooling

use crate::io::json_format::{is_blank, parse_request_line, MAX_LINE_LENGTH};
use crate::types::{LoadRequest, VelocityError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Synchronous line-delimited JSON reader
///
/// Maintains streaming behavior: at most `MAX_LINE_LENGTH + 1` bytes of one
/// line in memory at a time.
#[derive(Debug)]
pub struct SyncReader<R: BufRead = BufReader<File>> {
    reader: R,
    buf: Vec<u8>,
    line_num: u64,
}

/// One framed line, before decoding
enum Frame {
    Line(String),
    TooLong,
}

impl SyncReader {
    /// Open a file for streaming iteration
    ///
    /// Uses an 8KB read buffer.
    pub fn open(path: &Path) -> Result<Self, VelocityError> {
        let file = File::open(path).map_err(|e| VelocityError::open_failed(path, e))?;
        Ok(Self::new(BufReader::with_capacity(8 * 1024, file)))
    }
}

impl<R: BufRead> SyncReader<R> {
    /// Wrap any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_num: 0,
        }
    }

    /// Read the next line, terminator stripped
    ///
    /// A line is too long when more than `MAX_LINE_LENGTH` bytes precede its
    /// `\n`, counting a `\r` of a CRLF ending. The rest of an oversized line
    /// is discarded.
    fn read_frame(&mut self) -> io::Result<Option<Frame>> {
        self.buf.clear();
        let limit = MAX_LINE_LENGTH as u64 + 1;
        let read = (&mut self.reader).take(limit).read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        } else if self.buf.len() > MAX_LINE_LENGTH {
            self.discard_line()?;
            return Ok(Some(Frame::TooLong));
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        let line = String::from_utf8(std::mem::take(&mut self.buf))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(Frame::Line(line)))
    }

    fn discard_line(&mut self) -> io::Result<()> {
        loop {
            self.buf.clear();
            let limit = MAX_LINE_LENGTH as u64 + 1;
            let read = (&mut self.reader).take(limit).read_until(b'\n', &mut self.buf)?;
            if read == 0 || self.buf.last() == Some(&b'\n') {
                return Ok(());
            }
        }
    }
}

impl<R: BufRead> Iterator for SyncReader<R> {
    type Item = Result<LoadRequest, VelocityError>;

    /// Get the next load request
    ///
    /// Blank lines are skipped without producing an item.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.read_frame().transpose()?;
            self.line_num += 1;

            let line = match frame {
                Ok(Frame::Line(line)) => line,
                Ok(Frame::TooLong) => {
                    return Some(Err(VelocityError::malformed_request(
                        self.line_num,
                        format!("line longer than {} bytes", MAX_LINE_LENGTH),
                    )))
                }
                Err(e) => {
                    return Some(Err(VelocityError::Io {
                        message: format!("Failed to read line {}: {}", self.line_num, e),
                    }))
                }
            };

            if is_blank(&line) {
                continue;
            }

            return Some(parse_request_line(&line, self.line_num));
        }
    }
}
