//! Storefront ownership service.
//!
//! Guards the one-storefront-per-profile rule and acts as the catalog's
//! authorization root: the owned storefront is resolved here before any
//! product mutation proceeds.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::error::{DomainResult, Error};
use crate::domain::ids::ProfileId;
use crate::domain::ports::{
    StorefrontDraft, StorefrontOwnership, StorefrontPatch, StorefrontPersistenceError,
    StorefrontRepository, TransactionHandle,
};
use crate::domain::storefront::{NewStorefront, Storefront, StorefrontChanges};

/// Service implementing [`StorefrontOwnership`].
#[derive(Clone)]
pub struct OwnershipService<R> {
    storefronts: Arc<R>,
}

impl<R> OwnershipService<R> {
    /// Create a new service over the given repository.
    pub fn new(storefronts: Arc<R>) -> Self {
        Self { storefronts }
    }
}

impl<R> OwnershipService<R>
where
    R: StorefrontRepository,
{
    fn map_storefront_error(error: StorefrontPersistenceError) -> Error {
        match error {
            StorefrontPersistenceError::DuplicateOwner { .. } => {
                Error::duplicate("ownerProfileId")
            }
            StorefrontPersistenceError::Connection { message }
            | StorefrontPersistenceError::Query { message } => Error::fatal(message),
        }
    }
}

#[async_trait]
impl<R> StorefrontOwnership for OwnershipService<R>
where
    R: StorefrontRepository,
{
    async fn owned_by(
        &self,
        profile_id: ProfileId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Option<Storefront>> {
        self.storefronts
            .find_by_owner(profile_id, tx)
            .await
            .map_err(Self::map_storefront_error)
    }

    async fn create(
        &self,
        profile_id: ProfileId,
        draft: StorefrontDraft,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Storefront> {
        draft.validate()?;

        // Pre-check for the friendly error; the unique owner constraint
        // remains the authoritative guard against racing creates.
        if self.owned_by(profile_id, tx).await?.is_some() {
            debug!(%profile_id, "profile already owns a storefront");
            return Err(Error::duplicate("ownerProfileId"));
        }

        let storefront = self
            .storefronts
            .create(
                &NewStorefront {
                    name: draft.name,
                    owner_profile_id: profile_id,
                },
                tx,
            )
            .await
            .map_err(Self::map_storefront_error)?;

        debug!(%profile_id, storefront_id = %storefront.id, "storefront created");
        Ok(storefront)
    }

    async fn update(
        &self,
        profile_id: ProfileId,
        patch: StorefrontPatch,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Storefront> {
        patch.validate()?;

        let owned = self
            .owned_by(profile_id, tx)
            .await?
            .ok_or_else(|| Error::not_found("storefront"))?;

        self.storefronts
            .update(owned.id, &StorefrontChanges { name: patch.name }, tx)
            .await
            .map_err(Self::map_storefront_error)?
            .ok_or_else(|| Error::not_found("storefront"))
    }

    async fn delete(
        &self,
        profile_id: ProfileId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()> {
        let owned = self
            .owned_by(profile_id, tx)
            .await?
            .ok_or_else(|| Error::not_found("storefront"))?;

        let deleted = self
            .storefronts
            .delete(owned.id, tx)
            .await
            .map_err(Self::map_storefront_error)?;
        if !deleted {
            return Err(Error::not_found("storefront"));
        }

        debug!(%profile_id, storefront_id = %owned.id, "storefront deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "ownership_service_tests.rs"]
mod ownership_service_tests;
