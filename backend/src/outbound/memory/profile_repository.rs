//! In-memory profile rows.

use async_trait::async_trait;

use crate::domain::identity::IdentityId;
use crate::domain::ids::ProfileId;
use crate::domain::ports::{
    ProfilePersistenceError, ProfileRepository, TransactionHandle,
};
use crate::domain::profile::{NewProfile, Profile};

use super::store::InMemoryDatabase;

/// Profile repository over [`InMemoryDatabase`].
#[derive(Debug, Clone)]
pub struct InMemoryProfileRepository {
    db: InMemoryDatabase,
}

impl InMemoryProfileRepository {
    /// Create a repository over `db`.
    #[must_use]
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(
        &self,
        profile: &NewProfile,
        tx: Option<TransactionHandle>,
    ) -> Result<Profile, ProfilePersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                if tables
                    .profiles
                    .values()
                    .any(|row| row.identity_id == profile.identity_id)
                {
                    return Err(ProfilePersistenceError::duplicate_identity(
                        profile.identity_id.as_str(),
                    ));
                }
                let id = tables.next_id();
                let now = InMemoryDatabase::now();
                let row = Profile {
                    id: ProfileId::new(id),
                    identity_id: profile.identity_id.clone(),
                    first_name: profile.first_name.clone(),
                    last_name: profile.last_name.clone(),
                    created_at: now,
                    updated_at: now,
                };
                tables.profiles.insert(id, row.clone());
                Ok(row)
            })
            .map_err(ProfilePersistenceError::connection)?
    }

    async fn delete(
        &self,
        id: ProfileId,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, ProfilePersistenceError> {
        self.db
            .with_tables(tx, |tables| tables.profiles.remove(&id.get()).is_some())
            .map_err(ProfilePersistenceError::connection)
    }

    async fn find_by_identity_id(
        &self,
        identity_id: &IdentityId,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Profile>, ProfilePersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                tables
                    .profiles
                    .values()
                    .find(|row| &row.identity_id == identity_id)
                    .cloned()
            })
            .map_err(ProfilePersistenceError::connection)
    }
}
