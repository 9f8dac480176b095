//! In-memory account store backed by `DashMap`.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use fitauth_core::error::AppError;
use fitauth_core::result::AppResult;
use fitauth_core::traits::{Clock, SystemClock};
use fitauth_core::types::AccountId;
use fitauth_entity::account::{Account, AccountUpdate};

use crate::store::AccountStore;

/// Account store keyed by email, with a secondary id index.
#[derive(Debug, Clone)]
pub struct MemoryAccountStore {
    /// email -> account
    by_email: Arc<DashMap<String, Account>>,
    /// id -> email
    emails: Arc<DashMap<AccountId, String>>,
    /// Stamps `updated_at` on updates.
    clock: Arc<dyn Clock>,
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl MemoryAccountStore {
    /// Create an empty store on wall-clock time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that reads time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            by_email: Arc::new(DashMap::new()),
            emails: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self.by_email.get(email).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        let Some(email) = self.emails.get(&id).map(|e| e.value().clone()) else {
            return Ok(None);
        };
        self.find_by_email(&email).await
    }

    async fn insert(&self, account: &Account) -> AppResult<AccountId> {
        // The entry guard holds the shard lock, so check-and-insert is atomic per email.
        match self.by_email.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already registered")),
            Entry::Vacant(slot) => {
                self.emails.insert(account.id, account.email.clone());
                slot.insert(account.clone());
                Ok(account.id)
            }
        }
    }

    async fn update(&self, id: AccountId, update: &AccountUpdate) -> AppResult<Account> {
        let email = self
            .emails
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

        let mut entry = self
            .by_email
            .get_mut(&email)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        entry.apply(update, self.clock.now());
        Ok(entry.clone())
    }
}
