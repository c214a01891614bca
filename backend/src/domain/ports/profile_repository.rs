//! Port for profile persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::identity::IdentityId;
use crate::domain::ids::ProfileId;
use crate::domain::profile::{NewProfile, Profile};

use super::transaction::TransactionHandle;

/// Errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfilePersistenceError {
    /// Repository connection could not be established.
    #[error("profile repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("profile repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
    /// The unique identity-id column rejected the insert.
    #[error("a profile already exists for identity {identity_id}")]
    DuplicateIdentity {
        /// Identity already holding a profile.
        identity_id: String,
    },
}

impl ProfilePersistenceError {
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

    /// Helper for unique-constraint violations on the identity column.
    pub fn duplicate_identity(identity_id: impl Into<String>) -> Self {
        Self::DuplicateIdentity {
            identity_id: identity_id.into(),
        }
    }
}

/// Port for profile rows keyed by numeric id and by identity id.
///
/// The store enforces uniqueness on the identity-id column; a concurrent
/// double-insert surfaces as
/// [`ProfilePersistenceError::DuplicateIdentity`], which services treat
/// exactly like the pre-check duplicate outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a profile row.
    async fn create(
        &self,
        profile: &NewProfile,
        tx: Option<TransactionHandle>,
    ) -> Result<Profile, ProfilePersistenceError>;

    /// Delete a profile row; `false` when it did not exist.
    async fn delete(
        &self,
        id: ProfileId,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, ProfilePersistenceError>;

    /// Fetch the profile linked to `identity_id`, `None` when absent.
    async fn find_by_identity_id(
        &self,
        identity_id: &IdentityId,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Profile>, ProfilePersistenceError>;
}
