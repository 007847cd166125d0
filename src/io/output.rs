//! Decision sink selection
//!
//! Decisions go to a file when one is configured, otherwise to stdout. Both
//! sinks are buffered; strategies flush them once the last decision is
//! written.

use crate::types::VelocityError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Open the decision sink for a run reading `input`
///
/// The input is opened first: a missing or unreadable input never truncates
/// an existing output file.
pub fn open_output(input: &Path, output: Option<&Path>) -> Result<Box<dyn Write>, VelocityError> {
    File::open(input).map_err(|e| VelocityError::open_failed(input, e))?;

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                VelocityError::write_failed(format!("Failed to create '{}': {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
