//! Velocity processing engine
//!
//! This module provides the VelocityEngine that decides load requests by
//! coordinating between the DuplicateTracker, the AccountStore and the
//! [`evaluate`] decision function.
//!
//! The engine enforces:
//! - Duplicate rejection: a (request id, customer id) pair is admitted once
//! - Lazy account creation on a customer's first admitted request
//! - Exactly one account update per admitted request
//!
//! It is the sole owner of its stores. Whichever stage owns the engine is the
//! single writer of all account state.

use crate::config::VelocityLimits;
use crate::core::account_store::InMemoryAccountStore;
use crate::core::decision::evaluate;
use crate::core::duplicate_tracker::SeenRequests;
use crate::core::traits::{AccountStore, DuplicateTracker};
use crate::types::{Account, Decision, LoadRequest};
use tracing::debug;

/// Counters describing one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Requests seen, duplicates included
    pub received: u64,
    /// Requests accepted
    pub accepted: u64,
    /// Admitted requests rejected by a velocity limit
    pub rejected: u64,
    /// Requests rejected as duplicates
    pub duplicates: u64,
    /// Distinct customers with an account
    pub customers: usize,
}

/// Velocity limit engine
///
/// Generic over its stores; [`VelocityEngine::new`] uses the in-memory ones.
#[derive(Debug)]
pub struct VelocityEngine<A = InMemoryAccountStore, D = SeenRequests>
where
    A: AccountStore,
    D: DuplicateTracker,
{
    limits: VelocityLimits,
    accounts: A,
    seen: D,
    summary: RunSummary,
}

impl VelocityEngine {
    /// Create an engine with empty in-memory stores
    pub fn new(limits: VelocityLimits) -> Self {
        Self::with_stores(limits, InMemoryAccountStore::new(), SeenRequests::new())
    }
}

impl<A, D> VelocityEngine<A, D>
where
    A: AccountStore,
    D: DuplicateTracker,
{
    /// Create an engine over caller-supplied stores
    pub fn with_stores(limits: VelocityLimits, accounts: A, seen: D) -> Self {
        VelocityEngine {
            limits,
            accounts,
            seen,
            summary: RunSummary::default(),
        }
    }

    /// Decide a single load request
    ///
    /// Duplicates are rejected without touching the account store. Any other
    /// request is recorded as seen before it is evaluated, so a rejected
    /// request still blocks later resubmissions of the same id.
    pub fn process(&mut self, request: LoadRequest) -> Decision {
        self.summary.received += 1;

        if self.seen.is_duplicate(&request.id, &request.customer_id) {
            self.summary.duplicates += 1;
            debug!(
                id = %request.id,
                customer_id = %request.customer_id,
                "duplicate load request rejected"
            );
            return Decision::rejected(request);
        }
        self.seen.record(&request.id, &request.customer_id);

        let existing = self.accounts.get(&request.customer_id).cloned();
        let evaluation = evaluate(&request, existing, &self.limits);

        match evaluation.breach {
            Some(breach) => {
                self.summary.rejected += 1;
                debug!(
                    id = %request.id,
                    customer_id = %request.customer_id,
                    amount = %request.amount,
                    reason = %breach,
                    "load request rejected"
                );
            }
            None => {
                self.summary.accepted += 1;
                debug!(
                    id = %request.id,
                    customer_id = %request.customer_id,
                    amount = %request.amount,
                    "load request accepted"
                );
            }
        }

        self.accounts.put(evaluation.account);
        Decision::for_request(request, evaluation.accepted)
    }

    /// Current account state for a customer
    pub fn account(&self, customer_id: &str) -> Option<&Account> {
        self.accounts.get(customer_id)
    }

    /// All accounts, sorted by customer id
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.accounts()
    }

    /// Counters so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            customers: self.accounts.len(),
            ..self.summary
        }
    }
}
