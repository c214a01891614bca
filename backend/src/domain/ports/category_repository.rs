//! Port for category persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::{Category, CategoryChanges, NewCategory};
use crate::domain::ids::CategoryId;
use crate::domain::page::{Page, PageRequest};

use super::transaction::TransactionHandle;

/// Errors raised by category repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryPersistenceError {
    /// Repository connection could not be established.
    #[error("category repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("category repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
    /// Products still reference the row.
    #[error("category {category_id} is still referenced by products")]
    Referenced {
        /// Category whose deletion was refused.
        category_id: CategoryId,
    },
}

impl CategoryPersistenceError {
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

    /// Helper for restricted deletes.
    #[must_use]
    pub fn referenced(category_id: CategoryId) -> Self {
        Self::Referenced { category_id }
    }
}

/// Port for category rows.
///
/// Deletion is restricted at this level: while any product references a
/// category, `delete` fails with
/// [`CategoryPersistenceError::Referenced`] — never a silent no-op.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category row.
    async fn create(
        &self,
        category: &NewCategory,
        tx: Option<TransactionHandle>,
    ) -> Result<Category, CategoryPersistenceError>;

    /// Apply `changes` to a row; `None` when it no longer exists.
    async fn update(
        &self,
        id: CategoryId,
        changes: &CategoryChanges,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Category>, CategoryPersistenceError>;

    /// Delete an unreferenced row; `false` when it did not exist.
    async fn delete(
        &self,
        id: CategoryId,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, CategoryPersistenceError>;

    /// Fetch a category by id, `None` when absent.
    async fn find_by_id(
        &self,
        id: CategoryId,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Category>, CategoryPersistenceError>;

    /// List categories ordered by name.
    async fn list(
        &self,
        page: PageRequest,
        tx: Option<TransactionHandle>,
    ) -> Result<Page<Category>, CategoryPersistenceError>;
}
