//! Core business logic module
//!
//! This module contains the velocity decision components:
//! - `traits` - Trait abstractions for interchangeable store implementations
//! - `decision` - The pure accept/reject function over an account
//! - `engine` - Request processing: duplicate filtering, account lookup, decision
//! - `account_store` - Per-customer account state
//! - `duplicate_tracker` - Admitted (request id, customer id) pairs

pub mod account_store;
pub mod decision;
pub mod duplicate_tracker;
pub mod engine;
pub mod traits;

pub use account_store::InMemoryAccountStore;
pub use decision::{evaluate, Evaluation};
pub use duplicate_tracker::SeenRequests;
pub use engine::{RunSummary, VelocityEngine};
pub use traits::{AccountStore, DuplicateTracker};
