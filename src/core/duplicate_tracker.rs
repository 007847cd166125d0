//! Duplicate request detection
//!
//! A request is a duplicate when a request with the same id was already
//! admitted for the same customer. The pair is stored as a nested
//! customer → request-id set rather than a concatenated string, so ids that
//! straddle the boundary (`"1" + "23"` vs `"12" + "3"`) never alias.

use crate::core::traits::DuplicateTracker;
use crate::types::{CustomerId, RequestId};
use std::collections::{HashMap, HashSet};

/// In-memory [`DuplicateTracker`]
#[derive(Debug, Default)]
pub struct SeenRequests {
    /// Request ids already admitted, per customer
    seen: HashMap<CustomerId, HashSet<RequestId>>,
    count: usize,
}

impl SeenRequests {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }
}

impl DuplicateTracker for SeenRequests {
    fn is_duplicate(&self, id: &str, customer_id: &str) -> bool {
        self.seen
            .get(customer_id)
            .is_some_and(|ids| ids.contains(id))
    }

    fn record(&mut self, id: &str, customer_id: &str) {
        let inserted = self
            .seen
            .entry(customer_id.to_string())
            .or_default()
            .insert(id.to_string());
        if inserted {
            self.count += 1;
        }
    }

    fn len(&self) -> usize {
        self.count
    }
}
