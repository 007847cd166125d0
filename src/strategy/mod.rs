//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete processing runs,
//! encompassing input parsing, the velocity engine and decision output. This
//! allows different pipeline implementations (single-threaded loop, staged
//! async pipeline) to be selected at runtime. Both produce identical output.

use crate::cli::StrategyType;
use crate::config::VelocityLimits;
use crate::core::RunSummary;
use crate::types::VelocityError;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, PipelineConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete runs
///
/// Each strategy reads load requests from a line-delimited JSON file, decides
/// them through a fresh velocity engine, and writes one decision line per
/// request to `output`, in input order.
pub trait ProcessingStrategy: Send + Sync {
    /// Process all requests from `input_path`, writing decisions to `output`
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` once every request has been decided and written
    /// * `Err(VelocityError)` on the first fatal error
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened or read
    /// - A line cannot be parsed into a load request
    /// - The output rejects a write
    ///
    /// Decisions written before the failure stay written; nothing after it
    /// is processed. Duplicates and limit breaches are not errors.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<RunSummary, VelocityError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `limits` - Velocity thresholds for the run
/// * `config` - Optional pipeline configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    limits: VelocityLimits,
    config: Option<PipelineConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(limits)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(limits, config))
        }
    }
}

fn log_summary(strategy: &str, summary: &RunSummary) {
    tracing::info!(
        strategy,
        received = summary.received,
        accepted = summary.accepted,
        rejected = summary.rejected,
        duplicates = summary.duplicates,
        customers = summary.customers,
        "finished processing load requests"
    );
}
