//! In-memory account store
//!
//! Maps customer ids to their [`Account`]. Accounts are created lazily by the
//! decision engine and upserted here after every admitted request. Nothing is
//! ever removed: the store lives as long as the run.

use crate::core::traits::AccountStore;
use crate::types::{Account, CustomerId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// HashMap-backed [`AccountStore`]
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    /// Map of customer ids to account states
    accounts: HashMap<CustomerId, Account>,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        InMemoryAccountStore {
            accounts: HashMap::new(),
        }
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, customer_id: &str) -> Option<&Account> {
        self.accounts.get(customer_id)
    }

    fn put(&mut self, account: Account) -> &Account {
        match self.accounts.entry(account.customer_id.clone()) {
            Entry::Occupied(mut slot) => {
                slot.insert(account);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(account),
        }
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }

    fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.customer_id.cmp(&b.customer_id));
        accounts
    }
}
