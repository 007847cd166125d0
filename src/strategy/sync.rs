//! Synchronous processing strategy
//!
//! This module provides a single-threaded implementation of the
//! ProcessingStrategy trait. The three pipeline stages run fused in one loop:
//! read a request from `SyncReader`, decide it with `VelocityEngine`, write the
//! decision with `json_format::write_decision`.
//!
//! Memory usage is O(customers + admitted requests), never O(input size).

use crate::core::{RunSummary, VelocityEngine};
use crate::io::json_format::write_decision;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{log_summary, ProcessingStrategy};
use crate::config::VelocityLimits;
use crate::types::VelocityError;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use velocity_limits::config::VelocityLimits;
/// use velocity_limits::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(VelocityLimits::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("input.txt"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    limits: VelocityLimits,
}

impl SyncProcessingStrategy {
    /// Create a strategy applying `limits`
    pub fn new(limits: VelocityLimits) -> Self {
        Self { limits }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process requests from input file and write decisions to output
    ///
    /// Stops at the first unreadable or malformed line and returns its error.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<RunSummary, VelocityError> {
        let reader = SyncReader::open(input_path)?;
        let mut engine = VelocityEngine::new(self.limits.clone());
        info!(input = %input_path.display(), strategy = "sync", "processing load requests");

        for result in reader {
            let request = result?;
            let decision = engine.process(request);
            write_decision(&decision, output)?;
        }
        output.flush().map_err(VelocityError::write_failed)?;

        let summary = engine.summary();
        log_summary("sync", &summary);
        Ok(summary)
    }
}
