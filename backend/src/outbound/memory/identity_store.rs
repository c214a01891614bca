//! In-memory identity provider.
//!
//! Deliberately behind its own mutex, separate from the relational
//! tables: the real provider is a remote system with its own failure
//! domain and no participation in relational transactions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use secrecy::SecretString;
use uuid::Uuid;

use crate::domain::identity::{Email, Identity, IdentityId};
use crate::domain::ports::{IdentityStore, IdentityStoreError};

#[derive(Debug, Default)]
struct Records {
    by_id: HashMap<IdentityId, Identity>,
}

/// Identity store holding records in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityStore {
    records: Arc<Mutex<Records>>,
}

impl InMemoryIdentityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, IdentityStoreError> {
        self.records
            .lock()
            .map_err(|_| IdentityStoreError::connection("identity store mutex poisoned"))
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create(
        &self,
        email: &Email,
        _secret: &SecretString,
    ) -> Result<Identity, IdentityStoreError> {
        let mut records = self.lock()?;
        if records.by_id.values().any(|record| &record.email == email) {
            return Err(IdentityStoreError::already_exists(email.as_str()));
        }
        let id = IdentityId::new(format!("idp_{}", Uuid::new_v4()))
            .map_err(|err| IdentityStoreError::provider(err.to_string()))?;
        let identity = Identity {
            id: id.clone(),
            email: email.clone(),
        };
        records.by_id.insert(id, identity.clone());
        Ok(identity)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Identity>, IdentityStoreError> {
        let records = self.lock()?;
        Ok(records
            .by_id
            .values()
            .find(|record| &record.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityStoreError> {
        let records = self.lock()?;
        Ok(records.by_id.get(id).cloned())
    }

    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityStoreError> {
        let mut records = self.lock()?;
        // Already-gone is success: unlink retries delete blindly.
        records.by_id.remove(id);
        Ok(())
    }
}
