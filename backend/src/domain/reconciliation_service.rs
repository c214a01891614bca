//! Identity reconciliation service.
//!
//! Owns the get-or-create-then-attach protocol between the external
//! identity provider and the local profile store. The two stores fail
//! independently and share no transaction, so the protocol leans on an
//! idempotent first step and read-time integrity checks instead of any
//! form of distributed commit.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tracing::{debug, error};

use crate::domain::error::{DomainResult, Error};
use crate::domain::identity::{Email, Identity, IdentityId};
use crate::domain::ports::{
    IdentityReconciliation, IdentityStore, IdentityStoreError, LinkRequest, ProfilePersistenceError,
    ProfileRepository, TransactionHandle,
};
use crate::domain::profile::{LinkedAccount, NewProfile};

/// Service implementing [`IdentityReconciliation`].
#[derive(Clone)]
pub struct ReconciliationService<S, P> {
    identities: Arc<S>,
    profiles: Arc<P>,
}

impl<S, P> ReconciliationService<S, P> {
    /// Create a new service over the given stores.
    pub fn new(identities: Arc<S>, profiles: Arc<P>) -> Self {
        Self {
            identities,
            profiles,
        }
    }
}

impl<S, P> ReconciliationService<S, P>
where
    S: IdentityStore,
    P: ProfileRepository,
{
    fn map_identity_error(error: IdentityStoreError) -> Error {
        match error {
            // Only reachable when a racing create slips past the
            // re-resolution path; semantically still a duplicate link.
            IdentityStoreError::AlreadyExists { .. } => Error::duplicate("email"),
            IdentityStoreError::Connection { message } | IdentityStoreError::Provider { message } => {
                Error::fatal(message)
            }
        }
    }

    fn map_profile_error(error: ProfilePersistenceError) -> Error {
        match error {
            ProfilePersistenceError::DuplicateIdentity { .. } => Error::duplicate("email"),
            ProfilePersistenceError::Connection { message }
            | ProfilePersistenceError::Query { message } => Error::fatal(message),
        }
    }

    /// Resolve the identity for `email`, creating it when absent.
    ///
    /// Idempotent by construction: a retry after a crash re-resolves to
    /// the same identity. A lost create race is folded into the lookup
    /// path — the winner's record is the one to link against.
    async fn get_or_create_identity(
        &self,
        email: &Email,
        secret: &SecretString,
    ) -> DomainResult<Identity> {
        if let Some(identity) = self
            .identities
            .find_by_email(email)
            .await
            .map_err(Self::map_identity_error)?
        {
            debug!(identity_id = %identity.id, "identity already present for email");
            return Ok(identity);
        }

        debug!("no identity for email, creating one");
        match self.identities.create(email, secret).await {
            Ok(identity) => Ok(identity),
            Err(IdentityStoreError::AlreadyExists { .. }) => {
                debug!("lost identity create race, re-resolving by email");
                self.identities
                    .find_by_email(email)
                    .await
                    .map_err(Self::map_identity_error)?
                    .ok_or_else(|| {
                        Error::fatal("identity provider reported a duplicate but lookup found nothing")
                    })
            }
            Err(err) => Err(Self::map_identity_error(err)),
        }
    }
}

#[async_trait]
impl<S, P> IdentityReconciliation for ReconciliationService<S, P>
where
    S: IdentityStore,
    P: ProfileRepository,
{
    async fn link(
        &self,
        request: LinkRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<LinkedAccount> {
        request.validate()?;
        let email = Email::new(&request.email)
            .map_err(|err| Error::validation("email", err.to_string()))?;

        let identity = self.get_or_create_identity(&email, &request.secret).await?;

        debug!(identity_id = %identity.id, "checking for an existing profile");
        if self
            .profiles
            .find_by_identity_id(&identity.id, tx)
            .await
            .map_err(Self::map_profile_error)?
            .is_some()
        {
            debug!(identity_id = %identity.id, "identity is already fully onboarded");
            return Err(Error::duplicate("email"));
        }

        // If this insert fails after the identity was created, the
        // identity is left without a profile; the next link call for the
        // same email re-resolves it above and retries only this step.
        // That retry is the recovery mechanism — no identity rollback.
        let profile = self
            .profiles
            .create(
                &NewProfile {
                    identity_id: identity.id.clone(),
                    first_name: request.first_name,
                    last_name: request.last_name,
                },
                tx,
            )
            .await
            .map_err(Self::map_profile_error)?;

        debug!(identity_id = %identity.id, profile_id = %profile.id, "identity linked to profile");
        Ok(LinkedAccount { identity, profile })
    }

    async fn resolve(
        &self,
        identity_id: &IdentityId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<LinkedAccount> {
        let identity = self
            .identities
            .find_by_id(identity_id)
            .await
            .map_err(Self::map_identity_error)?;
        let profile = self
            .profiles
            .find_by_identity_id(identity_id, tx)
            .await
            .map_err(Self::map_profile_error)?;

        match (identity, profile) {
            (Some(identity), Some(profile)) => Ok(LinkedAccount { identity, profile }),
            (None, None) => Err(Error::not_found("account")),
            (Some(_), None) => {
                // Recoverable: a link retry for this email will attach
                // the missing profile.
                error!(
                    %identity_id,
                    missing_side = "profile",
                    "identity has no profile"
                );
                Err(Error::integrity("account", "profile missing for identity"))
            }
            (None, Some(profile)) => {
                // Not recoverable without provider access: nobody can
                // present credentials for this profile any more.
                error!(
                    %identity_id,
                    profile_id = %profile.id,
                    missing_side = "identity",
                    "profile has no identity"
                );
                Err(Error::integrity("account", "identity missing for profile"))
            }
        }
    }

    async fn unlink(
        &self,
        identity_id: &IdentityId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()> {
        let account = self.resolve(identity_id, tx).await?;

        // Profile first: a crash here strands an inert identity, which a
        // later cleanup or re-link can absorb. The reverse order could
        // strand a profile with credentials nobody can present.
        debug!(%identity_id, profile_id = %account.profile.id, "deleting profile");
        let deleted = self
            .profiles
            .delete(account.profile.id, tx)
            .await
            .map_err(Self::map_profile_error)?;
        if !deleted {
            // Lost a concurrent unlink between resolve and delete.
            return Err(Error::not_found("account"));
        }

        debug!(%identity_id, "deleting identity");
        self.identities
            .delete(identity_id)
            .await
            .map_err(Self::map_identity_error)?;

        debug!(%identity_id, "account unlinked");
        Ok(())
    }
}

#[cfg(test)]
#[path = "reconciliation_service_tests.rs"]
mod reconciliation_service_tests;
