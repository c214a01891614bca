//! Port for storefront persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ids::{ProfileId, StorefrontId};
use crate::domain::storefront::{NewStorefront, Storefront, StorefrontChanges};

use super::transaction::TransactionHandle;

/// Errors raised by storefront repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorefrontPersistenceError {
    /// Repository connection could not be established.
    #[error("storefront repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("storefront repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
    /// The unique owner column rejected the insert.
    #[error("profile {profile_id} already owns a storefront")]
    DuplicateOwner {
        /// Profile already owning a storefront.
        profile_id: ProfileId,
    },
}

impl StorefrontPersistenceError {
    /// Helper for connectivity failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-constraint violations on the owner column.
    #[must_use]
    pub fn duplicate_owner(profile_id: ProfileId) -> Self {
        Self::DuplicateOwner { profile_id }
    }
}

/// Port for storefront rows keyed by id and by owning profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontRepository: Send + Sync {
    /// Insert a storefront row.
    ///
    /// The unique `owner_profile_id` constraint is the authoritative
    /// enforcement of one-storefront-per-profile; a losing racer gets
    /// [`StorefrontPersistenceError::DuplicateOwner`].
    async fn create(
        &self,
        storefront: &NewStorefront,
        tx: Option<TransactionHandle>,
    ) -> Result<Storefront, StorefrontPersistenceError>;

    /// Apply `changes` to a row; `None` when it no longer exists.
    async fn update(
        &self,
        id: StorefrontId,
        changes: &StorefrontChanges,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Storefront>, StorefrontPersistenceError>;

    /// Delete a row, cascading to its products and their photo rows
    /// exactly as the relational schema would; `false` when it did not
    /// exist.
    async fn delete(
        &self,
        id: StorefrontId,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, StorefrontPersistenceError>;

    /// Fetch the storefront owned by `owner`, `None` when the profile has
    /// none yet — a perfectly normal state, unlike a missing profile.
    async fn find_by_owner(
        &self,
        owner: ProfileId,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Storefront>, StorefrontPersistenceError>;
}
