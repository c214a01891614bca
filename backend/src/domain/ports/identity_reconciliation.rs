//! Driving port for the identity reconciliation protocol.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::error::{DomainResult, Error};
use crate::domain::identity::IdentityId;
use crate::domain::profile::{LinkedAccount, PERSON_NAME_MAX_LEN};
use crate::domain::validation::require_len;

use super::transaction::TransactionHandle;

/// Input for [`IdentityReconciliation::link`].
///
/// `Debug` is safe to log: the secret redacts itself.
#[derive(Debug, Clone)]
pub struct LinkRequest {
    /// Address to register or re-resolve.
    pub email: String,
    /// Credential handed to the identity provider; never stored locally.
    pub secret: SecretString,
    /// Given name for the profile.
    pub first_name: String,
    /// Family name for the profile.
    pub last_name: String,
}

impl LinkRequest {
    /// Check everything except the email shape, which the service parses
    /// into a canonical [`crate::domain::identity::Email`] itself.
    pub fn validate(&self) -> DomainResult<()> {
        require_len("firstName", &self.first_name, 1, PERSON_NAME_MAX_LEN)?;
        require_len("lastName", &self.last_name, 1, PERSON_NAME_MAX_LEN)?;
        if self.secret.expose_secret().is_empty() {
            return Err(Error::validation("secret", "must not be empty"));
        }
        Ok(())
    }
}

/// Driving port reconciling provider identities with local profiles.
///
/// The two stores fail independently and share no transaction; the
/// protocol is therefore built from an idempotent first step plus
/// read-time integrity checks rather than any distributed commit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityReconciliation: Send + Sync {
    /// Register a caller end to end: get-or-create the identity by email,
    /// then attach a fresh profile.
    ///
    /// Retrying after a mid-flight crash re-resolves the identity and
    /// only repeats the profile insert — the designed self-healing path.
    /// An identity that already has a profile fails with
    /// `Duplicate { field: "email" }`: the caller is registering twice,
    /// not recovering.
    async fn link(
        &self,
        request: LinkRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<LinkedAccount>;

    /// Fetch both sides of an account.
    ///
    /// Both absent is `NotFound`; exactly one present is `Integrity`,
    /// never a plain absence — it means `link` has not converged or a
    /// deletion was partial.
    async fn resolve(
        &self,
        identity_id: &IdentityId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<LinkedAccount>;

    /// Delete both sides of an account, profile first.
    ///
    /// The ordering is deliberate: a crash in between leaves an inert
    /// orphaned identity, which is recoverable, instead of a profile
    /// whose credentials nobody can present, which is not.
    async fn unlink(
        &self,
        identity_id: &IdentityId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()>;
}
