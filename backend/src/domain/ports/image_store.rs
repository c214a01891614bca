//! Port for the external image binary store.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::StoredImage;

/// Errors raised by image store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageStoreError {
    /// The store could not be reached or failed the call.
    #[error("image store failure: {message}")]
    Backend {
        /// Adapter-level failure description.
        message: String,
    },
    /// The payload was rejected by the store.
    #[error("image rejected: {message}")]
    Rejected {
        /// Why the store refused the payload.
        message: String,
    },
}

impl ImageStoreError {
    /// Helper for backend failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Helper for rejected payloads.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Port for saving and deleting image binaries.
///
/// The store is outside the relational transaction scope; callers order
/// their operations so a crash leaves at worst an orphaned binary, never
/// a row pointing at nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist a binary and return its handle and public URL.
    async fn save(&self, bytes: &[u8]) -> Result<StoredImage, ImageStoreError>;

    /// Delete a binary. Succeeds when it is already gone.
    async fn delete(&self, image_id: &str) -> Result<(), ImageStoreError>;
}
