//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and velocity windows
//! - `request`: Load requests and decisions
//! - `error`: Error types for the velocity limits engine

pub mod account;
pub mod error;
pub mod request;

pub use account::{beginning_of_day, beginning_of_week, Account, DailyLimit, LimitBreach, WeeklyLimit};
pub use error::VelocityError;
pub use request::{CustomerId, Decision, LoadRequest, RequestId};
