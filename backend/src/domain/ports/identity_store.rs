//! Port for the external identity provider.
//!
//! The provider is an independently failing system with no shared
//! transaction scope; its errors map onto this small taxonomy and nothing
//! else. Creation is keyed by email, which is what makes the
//! reconciliation protocol's get-or-create step idempotent.

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

use crate::domain::identity::{Email, Identity, IdentityId};

/// Errors raised by identity store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityStoreError {
    /// An identity with this email already exists.
    #[error("identity already exists for {email}")]
    AlreadyExists {
        /// The conflicting address.
        email: String,
    },
    /// The provider could not be reached.
    #[error("identity provider unreachable: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// The provider rejected or failed the call.
    #[error("identity provider error: {message}")]
    Provider {
        /// Adapter-level failure description.
        message: String,
    },
}

impl IdentityStoreError {
    /// Helper for duplicate-email failures.
    pub fn already_exists(email: impl Into<String>) -> Self {
        Self::AlreadyExists {
            email: email.into(),
        }
    }

    /// Helper for connectivity failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for provider-side failures.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

/// Port for identity creation, lookup, and deletion at the provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Create an identity for `email` holding `secret` as its credential.
    ///
    /// Fails with [`IdentityStoreError::AlreadyExists`] when the email is
    /// taken; callers racing on the same email treat that as "someone
    /// else's create won" and re-resolve by lookup.
    async fn create(
        &self,
        email: &Email,
        secret: &SecretString,
    ) -> Result<Identity, IdentityStoreError>;

    /// Fetch an identity by email, `None` when absent.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Identity>, IdentityStoreError>;

    /// Fetch an identity by id, `None` when absent.
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityStoreError>;

    /// Delete an identity. Succeeds when the record is already gone, so a
    /// crashed unlink can be retried blindly.
    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityStoreError>;
}
