//! Port for product photo row persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::{NewPhoto, Photo};
use crate::domain::ids::ProductId;

use super::transaction::TransactionHandle;

/// Errors raised by photo repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoPersistenceError {
    /// Repository connection could not be established.
    #[error("photo repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("photo repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
    /// The unique image-id column rejected the insert.
    #[error("image {image_id} is already linked to a product")]
    DuplicateImage {
        /// The conflicting image-store handle.
        image_id: String,
    },
    /// The referenced product row does not exist.
    #[error("product {product_id} does not exist")]
    MissingProduct {
        /// The dangling reference.
        product_id: ProductId,
    },
}

impl PhotoPersistenceError {
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

    /// Helper for unique-constraint violations on the image column.
    pub fn duplicate_image(image_id: impl Into<String>) -> Self {
        Self::DuplicateImage {
            image_id: image_id.into(),
        }
    }

    /// Helper for dangling product references.
    #[must_use]
    pub fn missing_product(product_id: ProductId) -> Self {
        Self::MissingProduct { product_id }
    }
}

/// Port for photo rows keyed by image-store handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Insert a photo row linking a stored binary to a product.
    async fn create(
        &self,
        photo: &NewPhoto,
        tx: Option<TransactionHandle>,
    ) -> Result<Photo, PhotoPersistenceError>;

    /// Delete the row linking `image_id`; `false` when no row linked it.
    async fn delete_by_image_id(
        &self,
        image_id: &str,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, PhotoPersistenceError>;

    /// Fetch the row linking `image_id`, `None` when absent.
    async fn find_by_image_id(
        &self,
        image_id: &str,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Photo>, PhotoPersistenceError>;

    /// List a product's photo rows ordered by creation time.
    async fn list_by_product(
        &self,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> Result<Vec<Photo>, PhotoPersistenceError>;
}
