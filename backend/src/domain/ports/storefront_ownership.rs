//! Driving port for storefront ownership.

use async_trait::async_trait;

use crate::domain::error::DomainResult;
use crate::domain::ids::ProfileId;
use crate::domain::storefront::{
    Storefront, STOREFRONT_NAME_MAX_LEN, STOREFRONT_NAME_MIN_LEN,
};
use crate::domain::validation::require_len;

use super::transaction::TransactionHandle;

/// Input for [`StorefrontOwnership::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontDraft {
    /// Display name for the new storefront.
    pub name: String,
}

impl StorefrontDraft {
    /// Check field shapes.
    pub fn validate(&self) -> DomainResult<()> {
        require_len(
            "name",
            &self.name,
            STOREFRONT_NAME_MIN_LEN,
            STOREFRONT_NAME_MAX_LEN,
        )
    }
}

/// Input for [`StorefrontOwnership::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontPatch {
    /// Replacement display name, when present.
    pub name: Option<String>,
}

impl StorefrontPatch {
    /// Check field shapes of the present fields.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require_len(
                "name",
                name,
                STOREFRONT_NAME_MIN_LEN,
                STOREFRONT_NAME_MAX_LEN,
            )?;
        }
        Ok(())
    }
}

/// Driving port guarding the one-storefront-per-profile invariant.
///
/// [`owned_by`] doubles as the authorization primitive for the catalog:
/// every product mutation starts by resolving the caller's storefront
/// through it.
///
/// [`owned_by`]: StorefrontOwnership::owned_by
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontOwnership: Send + Sync {
    /// Fetch the storefront owned by `profile_id`, `None` when the
    /// profile has none yet. Pure lookup, no side effects.
    async fn owned_by(
        &self,
        profile_id: ProfileId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Option<Storefront>>;

    /// Create the profile's storefront.
    ///
    /// A profile that already owns one fails with
    /// `Duplicate { field: "ownerProfileId" }`, whether caught by the
    /// pre-check or by the store's unique constraint mid-insert.
    async fn create(
        &self,
        profile_id: ProfileId,
        draft: StorefrontDraft,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Storefront>;

    /// Update the profile's storefront; `NotFound` when it has none.
    async fn update(
        &self,
        profile_id: ProfileId,
        patch: StorefrontPatch,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Storefront>;

    /// Delete the profile's storefront (cascading its catalog);
    /// `NotFound` when it has none.
    async fn delete(
        &self,
        profile_id: ProfileId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()>;
}
