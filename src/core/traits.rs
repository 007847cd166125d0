//! Core traits for account storage and duplicate detection
//!
//! The engine is generic over these so that the backing collections can be
//! swapped without touching the decision logic. Both are owned by exactly one
//! processing stage, so neither needs interior synchronization.

use crate::types::Account;

/// Trait for storing per-customer account state
///
/// Upsert-only: accounts are never removed during a run.
pub trait AccountStore {
    /// Look up the account for a customer
    fn get(&self, customer_id: &str) -> Option<&Account>;

    /// Insert or replace the account keyed by `account.customer_id`
    fn put(&mut self, account: Account) -> &Account;

    /// Number of accounts held
    fn len(&self) -> usize;

    /// Whether no account has been stored yet
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All accounts, sorted by customer id
    fn accounts(&self) -> Vec<&Account>;
}

/// Trait for remembering which requests were already admitted
///
/// Identity is the pair (request id, customer id). No eviction.
pub trait DuplicateTracker {
    /// Whether this (request id, customer id) pair was recorded before
    fn is_duplicate(&self, id: &str, customer_id: &str) -> bool;

    /// Remember a (request id, customer id) pair
    fn record(&mut self, id: &str, customer_id: &str);

    /// Number of pairs recorded
    fn len(&self) -> usize;

    /// Whether nothing has been recorded yet
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
