//! Port for product persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::{NewProduct, Product, ProductChanges};
use crate::domain::ids::{CategoryId, ProductId, StorefrontId};
use crate::domain::page::{Page, PageRequest};

use super::transaction::TransactionHandle;

/// Errors raised by product repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductPersistenceError {
    /// Repository connection could not be established.
    #[error("product repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("product repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
    /// The per-storefront unique code constraint rejected the write.
    #[error("code `{code}` already used within storefront {storefront_id}")]
    DuplicateCode {
        /// Storefront scoping the constraint.
        storefront_id: StorefrontId,
        /// The conflicting code.
        code: String,
    },
    /// The referenced category row does not exist.
    #[error("category {category_id} does not exist")]
    MissingCategory {
        /// The dangling reference.
        category_id: CategoryId,
    },
}

impl ProductPersistenceError {
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

    /// Helper for per-storefront code collisions.
    pub fn duplicate_code(storefront_id: StorefrontId, code: impl Into<String>) -> Self {
        Self::DuplicateCode {
            storefront_id,
            code: code.into(),
        }
    }

    /// Helper for dangling category references.
    #[must_use]
    pub fn missing_category(category_id: CategoryId) -> Self {
        Self::MissingCategory { category_id }
    }
}

/// Port for product rows.
///
/// Code uniqueness is scoped per storefront: the store enforces it as a
/// composite constraint over `(storefront_id, code)` and surfaces a
/// violation as [`ProductPersistenceError::DuplicateCode`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product row.
    async fn create(
        &self,
        product: &NewProduct,
        tx: Option<TransactionHandle>,
    ) -> Result<Product, ProductPersistenceError>;

    /// Apply `changes` to a row; `None` when it no longer exists.
    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Product>, ProductPersistenceError>;

    /// Delete a row, cascading its photo rows; `false` when it did not
    /// exist.
    async fn delete(
        &self,
        id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, ProductPersistenceError>;

    /// Fetch a product by id *and* owning storefront in a single query.
    ///
    /// A product that exists but belongs to another storefront reads as
    /// `None`, exactly like a product that does not exist — the lookup is
    /// the tenant-isolation primitive and must never distinguish the two.
    async fn find_scoped(
        &self,
        id: ProductId,
        storefront_id: StorefrontId,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Product>, ProductPersistenceError>;

    /// List a storefront's products ordered by creation time.
    async fn list_by_storefront(
        &self,
        storefront_id: StorefrontId,
        page: PageRequest,
        tx: Option<TransactionHandle>,
    ) -> Result<Page<Product>, ProductPersistenceError>;
}
