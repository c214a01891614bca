//! In-memory storefront rows.

use async_trait::async_trait;

use crate::domain::ids::{ProfileId, StorefrontId};
use crate::domain::ports::{
    StorefrontPersistenceError, StorefrontRepository, TransactionHandle,
};
use crate::domain::storefront::{NewStorefront, Storefront, StorefrontChanges};

use super::store::InMemoryDatabase;

/// Storefront repository over [`InMemoryDatabase`].
#[derive(Debug, Clone)]
pub struct InMemoryStorefrontRepository {
    db: InMemoryDatabase,
}

impl InMemoryStorefrontRepository {
    /// Create a repository over `db`.
    #[must_use]
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StorefrontRepository for InMemoryStorefrontRepository {
    async fn create(
        &self,
        storefront: &NewStorefront,
        tx: Option<TransactionHandle>,
    ) -> Result<Storefront, StorefrontPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                if tables
                    .storefronts
                    .values()
                    .any(|row| row.owner_profile_id == storefront.owner_profile_id)
                {
                    return Err(StorefrontPersistenceError::duplicate_owner(
                        storefront.owner_profile_id,
                    ));
                }
                let id = tables.next_id();
                let now = InMemoryDatabase::now();
                let row = Storefront {
                    id: StorefrontId::new(id),
                    name: storefront.name.clone(),
                    owner_profile_id: storefront.owner_profile_id,
                    created_at: now,
                    updated_at: now,
                };
                tables.storefronts.insert(id, row.clone());
                Ok(row)
            })
            .map_err(StorefrontPersistenceError::connection)?
    }

    async fn update(
        &self,
        id: StorefrontId,
        changes: &StorefrontChanges,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Storefront>, StorefrontPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                let Some(row) = tables.storefronts.get_mut(&id.get()) else {
                    return None;
                };
                if let Some(name) = &changes.name {
                    row.name.clone_from(name);
                }
                row.updated_at = InMemoryDatabase::now();
                Some(row.clone())
            })
            .map_err(StorefrontPersistenceError::connection)
    }

    async fn delete(
        &self,
        id: StorefrontId,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, StorefrontPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                let existed = tables.storefronts.contains_key(&id.get());
                if existed {
                    tables.cascade_storefront(id.get());
                }
                existed
            })
            .map_err(StorefrontPersistenceError::connection)
    }

    async fn find_by_owner(
        &self,
        owner: ProfileId,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Storefront>, StorefrontPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                tables
                    .storefronts
                    .values()
                    .find(|row| row.owner_profile_id == owner)
                    .cloned()
            })
            .map_err(StorefrontPersistenceError::connection)
    }
}
