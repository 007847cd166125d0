//! Asynchronous request reader with stream interface
//!
//! Provides a streaming interface over load requests from a line-delimited
//! JSON source, for use by the pipeline's producer stage.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - tokio-util's `LinesCodec` over a `FramedRead` for line framing
//! - futures' `StreamExt` to pull one frame at a time
//! - the json_format module for decoding each line
//!
//! # Architecture
//!
//! ```text
//! AsyncRead → FramedRead<LinesCodec> → AsyncReader → LoadRequest
//!                                           ↓
//!                                   json_format module
//! ```

use crate::io::json_format::{is_blank, parse_request_line, MAX_LINE_LENGTH};
use crate::types::{LoadRequest, VelocityError};
use futures::stream::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

/// Asynchronous line-delimited JSON reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    lines: FramedRead<R, LinesCodec>,
    line_num: u64,
}

impl<R: AsyncRead + Unpin> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH)),
            line_num: 0,
        }
    }

    /// Read the next load request
    ///
    /// Blank lines are skipped.
    ///
    /// # Returns
    ///
    /// * `Some(Ok(LoadRequest))` - The next request
    /// * `Some(Err(VelocityError))` - A read or parse error, with line number
    /// * `None` - End of input
    pub async fn next_request(&mut self) -> Option<Result<LoadRequest, VelocityError>> {
        loop {
            let frame = self.lines.next().await?;
            self.line_num += 1;

            let line = match frame {
                Ok(line) => line,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    return Some(Err(VelocityError::malformed_request(
                        self.line_num,
                        format!("line longer than {} bytes", MAX_LINE_LENGTH),
                    )))
                }
                Err(LinesCodecError::Io(e)) => {
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
