//! Velocity Limits Library
//! # Overview
//!
//! This library decides fund-load requests against per-customer velocity
//! limits, streaming line-delimited JSON in and out with either a sync loop or
//! a staged async pipeline.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (LoadRequest, Decision, Account, errors)
//! - [`config`] - Velocity thresholds and TOML configuration
//! - [`cli`] - CLI arguments parsing and settings resolution
//! - [`core`] - Business logic components:
//!   - [`core::decision`] - Pure accept/reject decision over an account
//!   - [`core::engine`] - Request processing orchestration
//!   - [`core::account_store`] - Per-customer window state
//!   - [`core::duplicate_tracker`] - Admitted (request id, customer id) pairs
//! - [`io`] - Request parsing and decision encoding
//! - [`strategy`] - Complete processing runs (sync and async)
//!
//! # Velocity Limits
//!
//! A request is accepted only if all three hold after adding it:
//!
//! - **Daily amount**: loads per UTC calendar day stay within the daily maximum
//! - **Daily count**: accepted loads per UTC day stay within the count maximum
//! - **Weekly amount**: loads per week (Monday 00:00 UTC start) stay within the weekly maximum
//!
//! A request whose id was already seen for the same customer is rejected as a
//! duplicate and does not touch the account.
//!
//! # Example
//!
//! ```
//! use velocity_limits::{LoadRequest, VelocityEngine, VelocityLimits};
//! use chrono::{TimeZone, Utc};
//! use rust_decimal::Decimal;
//!
//! let mut engine = VelocityEngine::new(VelocityLimits::default());
//! let decision = engine.process(LoadRequest {
//!     id: "15887".to_string(),
//!     customer_id: "528".to_string(),
//!     amount: Decimal::new(343942, 2),
//!     timestamp: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
//! });
//! assert!(decision.accepted);
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use config::{Config, VelocityLimits};
pub use core::{evaluate, Evaluation, RunSummary, VelocityEngine};
pub use io::{encode_decision, parse_request_line};
pub use types::{
    Account, CustomerId, Decision, LimitBreach, LoadRequest, RequestId, VelocityError,
};
