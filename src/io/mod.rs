//! I/O module
//!
//! Handles request parsing and decision output.
//!
//! # Components
//!
//! - `json_format` - Line format handling (request decoding, decision encoding)
//! - `sync_reader` - Synchronous reader with iterator interface
//! - `async_reader` - Asynchronous reader for the pipeline producer
//! - `output` - Decision sink selection (file or stdout)

pub mod async_reader;
pub mod json_format;
pub mod output;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use json_format::{encode_decision, parse_request_line, write_decision, JsonRequest};
pub use output::open_output;
pub use sync_reader::SyncReader;
