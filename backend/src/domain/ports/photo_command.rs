//! Driving port for product photos.

use async_trait::async_trait;

use crate::domain::catalog::Photo;
use crate::domain::error::{DomainResult, Error};
use crate::domain::ids::{ProductId, ProfileId};

use super::transaction::TransactionHandle;

/// Input for [`PhotoCommand::attach_photo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachPhotoRequest {
    /// Product of the caller's storefront to attach to.
    pub product_id: ProductId,
    /// Image payload, base64 encoded as the upload layer delivers it.
    pub image_base64: String,
}

impl AttachPhotoRequest {
    /// Check field shapes; the payload is decoded by the service.
    pub fn validate(&self) -> DomainResult<()> {
        if self.image_base64.trim().is_empty() {
            return Err(Error::validation("image", "must not be empty"));
        }
        Ok(())
    }
}

/// Driving port for attaching and detaching product photos.
///
/// Both operations resolve the product through the caller's storefront,
/// so photos of foreign products read as `NotFound` like everything else
/// in the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoCommand: Send + Sync {
    /// Save the binary in the image store, then link it to the product.
    ///
    /// The binary is saved first: a crash between the two steps leaves an
    /// orphaned binary for offline cleanup, never a row pointing at
    /// nothing.
    async fn attach_photo(
        &self,
        profile_id: ProfileId,
        request: AttachPhotoRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Photo>;

    /// Delete the binary from the image store, then remove the row.
    async fn detach_photo(
        &self,
        profile_id: ProfileId,
        image_id: &str,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()>;

    /// List the photos of a product in the caller's storefront.
    async fn list_photos(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Vec<Photo>>;
}
