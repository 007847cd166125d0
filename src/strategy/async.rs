//! Asynchronous pipeline processing strategy
//!
//! This module provides a staged, concurrent implementation of the
//! ProcessingStrategy trait: three tasks connected by two bounded channels.
//!
//! # Architecture
//!
//! ```text
//! producer task ──LoadRequest──▶ processor task ──Decision──▶ consumer
//!  AsyncReader      (mpsc)       VelocityEngine     (mpsc)    write_decision
//! ```
//!
//! # Ordering and Shared State
//!
//! Each channel is FIFO and each stage handles one message at a time, so
//! decisions leave in exactly the order requests were read. The processor task
//! owns the `VelocityEngine` (and with it every account and every seen request
//! id); no other task can reach that state, so it needs no locks.
//!
//! # Failure Handling
//!
//! A failing stage returns early and drops its channel ends:
//! - producer fails (bad line, read error): the processor drains what was
//!   already sent, then the consumer writes those decisions and finishes
//! - consumer fails (write error): the processor's next send fails, it stops
//!   and drops its receiver, which in turn stops the producer
//!
//! The error reported is the consumer's, else the producer's, else the
//! processor's.

use crate::config::VelocityLimits;
use crate::core::{RunSummary, VelocityEngine};
use crate::io::async_reader::AsyncReader;
use crate::io::json_format::write_decision;
use crate::strategy::{log_summary, ProcessingStrategy};
use crate::types::{Decision, LoadRequest, VelocityError};
use std::io::Write;
use std::path::Path;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Configuration for the staged pipeline
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Capacity of each inter-stage channel
    pub channel_capacity: usize,
    /// Tokio runtime worker threads
    pub worker_threads: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1,
            // one per stage is all the pipeline can use
            worker_threads: num_cpus::get().min(3),
        }
    }
}

impl PipelineConfig {
    /// Create a PipelineConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(channel_capacity: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let channel_capacity = if channel_capacity == 0 {
            warn!(
                requested = channel_capacity,
                using = default.channel_capacity,
                "invalid channel capacity, using default"
            );
            default.channel_capacity
        } else {
            channel_capacity
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                requested = worker_threads,
                using = default.worker_threads,
                "invalid worker thread count, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            channel_capacity,
            worker_threads,
        }
    }
}

/// Asynchronous pipeline processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    limits: VelocityLimits,
    config: PipelineConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(limits: VelocityLimits, config: PipelineConfig) -> Self {
        Self { limits, config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Run the three-stage pipeline to exhaustion of the input
    ///
    /// The producer and processor are spawned onto a dedicated multi-threaded
    /// runtime; the consumer runs as the runtime's root future so it can write
    /// to the borrowed `output`.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<RunSummary, VelocityError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .build()
            .map_err(|e| VelocityError::pipeline(format!("Failed to create tokio runtime: {}", e)))?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| VelocityError::open_failed(input_path, e))?;
            info!(
                input = %input_path.display(),
                strategy = "async",
                channel_capacity = self.config.channel_capacity,
                "processing load requests"
            );

            let (request_tx, request_rx) = mpsc::channel(self.config.channel_capacity);
            let (decision_tx, decision_rx) = mpsc::channel(self.config.channel_capacity);

            let producer = tokio::spawn(produce(AsyncReader::new(file), request_tx));
            let processor = tokio::spawn(decide(
                VelocityEngine::new(self.limits.clone()),
                request_rx,
                decision_tx,
            ));
            let written = consume(decision_rx, output).await;

            let produced = join_stage("producer", producer).await;
            let summary = join_stage("processor", processor).await;

            let written = written?;
            let produced = produced??;
            let summary = summary?;
            debug!(produced, written, "pipeline drained");

            log_summary("async", &summary);
            Ok(summary)
        })
    }
}

/// Producer stage: parse lines and publish requests in arrival order
///
/// Returns the number of requests published. A closed downstream ends the
/// stage quietly; the downstream failure is reported on its own.
async fn produce<R>(
    mut reader: AsyncReader<R>,
    requests: mpsc::Sender<LoadRequest>,
) -> Result<u64, VelocityError>
where
    R: AsyncRead + Unpin,
{
    let mut sent = 0;
    while let Some(result) = reader.next_request().await {
        let request = result?;
        if requests.send(request).await.is_err() {
            debug!(sent, "processing stage closed, producer stopping");
            break;
        }
        sent += 1;
    }
    Ok(sent)
}

/// Processor stage: the single owner of the engine
async fn decide(
    mut engine: VelocityEngine,
    mut requests: mpsc::Receiver<LoadRequest>,
    decisions: mpsc::Sender<Decision>,
) -> RunSummary {
    while let Some(request) = requests.recv().await {
        let decision = engine.process(request);
        if decisions.send(decision).await.is_err() {
            debug!("output stage closed, processor stopping");
            break;
        }
    }
    engine.summary()
}

/// Consumer stage: write decisions in the order received
async fn consume(
    mut decisions: mpsc::Receiver<Decision>,
    output: &mut dyn Write,
) -> Result<u64, VelocityError> {
    let mut written = 0;
    while let Some(decision) = decisions.recv().await {
        write_decision(&decision, output)?;
        written += 1;
    }
    output.flush().map_err(VelocityError::write_failed)?;
    Ok(written)
}

async fn join_stage<T>(stage: &str, handle: JoinHandle<T>) -> Result<T, VelocityError> {
    handle
        .await
        .map_err(|e| VelocityError::pipeline(format!("{} task failed: {}", stage, e)))
}
