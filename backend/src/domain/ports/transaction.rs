//! Transaction scope port for the relational store.
//!
//! The handle is an explicit, optionally-absent parameter threaded through
//! every relational repository call — never thread-local or ambient — so a
//! single logical operation can make all of its relational writes atomic.
//! The external identity provider is a separate system and is never part
//! of a handle's scope; reconciliation copes with that through idempotent
//! retries instead.

use std::future::Future;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::error::{DomainResult, Error};

/// Opaque token naming one open transaction.
///
/// Issued by [`TransactionScope::begin`]; repositories treat it as a key,
/// never inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionHandle(Uuid);

impl TransactionHandle {
    /// Issue a fresh token. Only scope implementations should call this.
    #[must_use]
    pub fn issue() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Errors raised by transaction scope adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// A new transaction could not be opened.
    #[error("failed to begin transaction: {message}")]
    Begin {
        /// Adapter-level failure description.
        message: String,
    },
    /// The transaction could not be committed.
    #[error("failed to commit transaction: {message}")]
    Commit {
        /// Adapter-level failure description.
        message: String,
    },
    /// The transaction could not be rolled back.
    #[error("failed to roll back transaction: {message}")]
    Rollback {
        /// Adapter-level failure description.
        message: String,
    },
    /// The handle does not name an open transaction.
    #[error("unknown transaction handle")]
    UnknownHandle,
}

impl TransactionError {
    /// Helper for begin failures.
    pub fn begin(message: impl Into<String>) -> Self {
        Self::Begin {
            message: message.into(),
        }
    }

    /// Helper for commit failures.
    pub fn commit(message: impl Into<String>) -> Self {
        Self::Commit {
            message: message.into(),
        }
    }

    /// Helper for rollback failures.
    pub fn rollback(message: impl Into<String>) -> Self {
        Self::Rollback {
            message: message.into(),
        }
    }
}

/// Port guaranteeing commit-or-rollback over the relational store.
///
/// All repository calls made with the handle between [`begin`] and
/// [`commit`]/[`rollback`] take effect together or not at all.
///
/// [`begin`]: TransactionScope::begin
/// [`commit`]: TransactionScope::commit
/// [`rollback`]: TransactionScope::rollback
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionScope: Send + Sync {
    /// Open a transaction and return its handle.
    async fn begin(&self) -> Result<TransactionHandle, TransactionError>;

    /// Make every write under `handle` durable.
    async fn commit(&self, handle: TransactionHandle) -> Result<(), TransactionError>;

    /// Discard every write under `handle`.
    async fn rollback(&self, handle: TransactionHandle) -> Result<(), TransactionError>;
}

/// Run `op` inside a transaction, committing on success and rolling back
/// on error.
///
/// A rollback failure is logged and swallowed — the operation's own error
/// is the one the caller needs to see; a commit failure is fatal.
pub async fn run_in_transaction<S, T, F, Fut>(scope: &S, op: F) -> DomainResult<T>
where
    S: TransactionScope + ?Sized,
    F: FnOnce(TransactionHandle) -> Fut + Send,
    Fut: Future<Output = DomainResult<T>> + Send,
{
    let handle = scope
        .begin()
        .await
        .map_err(|err| Error::fatal(err.to_string()))?;

    match op(handle).await {
        Ok(value) => {
            scope
                .commit(handle)
                .await
                .map_err(|err| Error::fatal(err.to_string()))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = scope.rollback(handle).await {
                tracing::error!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
