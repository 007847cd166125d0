//! Load request and decision records
//!
//! A [`LoadRequest`] flows into the engine, a [`Decision`] flows out. Both are
//! plain values moved along the pipeline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Customer identifier as it appears in the input
pub type CustomerId = String;

/// Request identifier as it appears in the input
///
/// Only unique per customer: the same id may legitimately appear for two
/// different customers.
pub type RequestId = String;

/// A validated instruction to load funds into a customer's account
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    /// Request identifier
    pub id: RequestId,

    /// Customer the funds are loaded for
    pub customer_id: CustomerId,

    /// Non-negative load amount, `$` prefix already stripped
    pub amount: Decimal,

    /// Instant the load was requested at
    ///
    /// Velocity windows are derived from this timestamp, never from wall-clock time.
    pub timestamp: DateTime<Utc>,
}

/// The accept/reject outcome for one load request
///
/// Field order matches the output line format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub id: RequestId,
    pub customer_id: CustomerId,
    pub accepted: bool,
}

impl Decision {
    /// Build the decision for a request, consuming it
    pub fn for_request(request: LoadRequest, accepted: bool) -> Self {
        Decision {
            id: request.id,
            customer_id: request.customer_id,
            accepted,
        }
    }

    /// Build a rejected decision for a request, consuming it
    pub fn rejected(request: LoadRequest) -> Self {
        Self::for_request(request, false)
    }
}
