//! Product photo service.
//!
//! Photos span two stores: the binary lives in the external image store,
//! the link row in the relational store. The image store is outside any
//! transaction, so both mutations are ordered binary-first — a crash in
//! between leaves at worst an orphaned binary for offline cleanup, never
//! a row pointing at a missing binary.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::domain::catalog::{NewPhoto, Photo, Product};
use crate::domain::error::{DomainResult, Error};
use crate::domain::ids::{ProductId, ProfileId};
use crate::domain::ports::{
    AttachPhotoRequest, ImageStore, ImageStoreError, PhotoCommand, PhotoPersistenceError,
    PhotoRepository, ProductPersistenceError, ProductRepository, StorefrontOwnership,
    TransactionHandle,
};

/// Service implementing [`PhotoCommand`].
#[derive(Clone)]
pub struct PhotoService<O, P, R, S> {
    ownership: Arc<O>,
    products: Arc<P>,
    photos: Arc<R>,
    images: Arc<S>,
}

impl<O, P, R, S> PhotoService<O, P, R, S> {
    /// Create a new service over the given ports.
    pub fn new(ownership: Arc<O>, products: Arc<P>, photos: Arc<R>, images: Arc<S>) -> Self {
        Self {
            ownership,
            products,
            photos,
            images,
        }
    }
}

impl<O, P, R, S> PhotoService<O, P, R, S>
where
    O: StorefrontOwnership,
    P: ProductRepository,
    R: PhotoRepository,
    S: ImageStore,
{
    fn map_photo_error(error: PhotoPersistenceError) -> Error {
        match error {
            PhotoPersistenceError::DuplicateImage { .. } => Error::duplicate("imageId"),
            PhotoPersistenceError::MissingProduct { .. } => Error::not_found("product"),
            PhotoPersistenceError::Connection { message }
            | PhotoPersistenceError::Query { message } => Error::fatal(message),
        }
    }

    fn map_product_error(error: ProductPersistenceError) -> Error {
        match error {
            ProductPersistenceError::DuplicateCode { .. } => Error::duplicate("code"),
            ProductPersistenceError::MissingCategory { .. } => Error::not_found("category"),
            ProductPersistenceError::Connection { message }
            | ProductPersistenceError::Query { message } => Error::fatal(message),
        }
    }

    fn map_image_error(error: ImageStoreError) -> Error {
        match error {
            ImageStoreError::Rejected { message } => Error::validation("image", message),
            ImageStoreError::Backend { message } => Error::fatal(message),
        }
    }

    /// Fetch `product_id` through the caller's storefront; foreign and
    /// missing products are both `NotFound`.
    async fn own_product(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Product> {
        let storefront = self
            .ownership
            .owned_by(profile_id, tx)
            .await?
            .ok_or_else(|| Error::not_found("storefront"))?;
        self.products
            .find_scoped(product_id, storefront.id, tx)
            .await
            .map_err(Self::map_product_error)?
            .ok_or_else(|| Error::not_found("product"))
    }
}

#[async_trait]
impl<O, P, R, S> PhotoCommand for PhotoService<O, P, R, S>
where
    O: StorefrontOwnership,
    P: ProductRepository,
    R: PhotoRepository,
    S: ImageStore,
{
    async fn attach_photo(
        &self,
        profile_id: ProfileId,
        request: AttachPhotoRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Photo> {
        request.validate()?;
        let product = self.own_product(profile_id, request.product_id, tx).await?;

        let bytes = STANDARD
            .decode(request.image_base64.trim())
            .map_err(|_| Error::validation("image", "must be valid base64"))?;

        // Binary first. If the row insert below fails, the binary stays
        // behind as an orphan; offline cleanup reclaims it.
        let stored = self
            .images
            .save(&bytes)
            .await
            .map_err(Self::map_image_error)?;
        debug!(image_id = %stored.image_id, product_id = %product.id, "image saved");

        let photo = self
            .photos
            .create(
                &NewPhoto {
                    image_id: stored.image_id,
                    url: stored.url,
                    product_id: product.id,
                },
                tx,
            )
            .await
            .map_err(Self::map_photo_error)?;

        debug!(photo_id = %photo.id, product_id = %product.id, "photo attached");
        Ok(photo)
    }

    async fn detach_photo(
        &self,
        profile_id: ProfileId,
        image_id: &str,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()> {
        let photo = self
            .photos
            .find_by_image_id(image_id, tx)
            .await
            .map_err(Self::map_photo_error)?
            .ok_or_else(|| Error::not_found("photo"))?;

        // Resolving the linked product through the caller's storefront
        // makes a foreign photo read exactly like a missing one.
        match self.own_product(profile_id, photo.product_id, tx).await {
            Ok(_) => {}
            Err(Error::NotFound { .. }) => return Err(Error::not_found("photo")),
            Err(err) => return Err(err),
        }

        // Binary first, mirroring attach: the image store delete is
        // idempotent, so a crash before the row removal leaves a retryable
        // state rather than a row pointing at nothing.
        self.images
            .delete(image_id)
            .await
            .map_err(Self::map_image_error)?;

        let removed = self
            .photos
            .delete_by_image_id(image_id, tx)
            .await
            .map_err(Self::map_photo_error)?;
        if !removed {
            return Err(Error::not_found("photo"));
        }

        debug!(%image_id, "photo detached");
        Ok(())
    }

    async fn list_photos(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Vec<Photo>> {
        let product = self.own_product(profile_id, product_id, tx).await?;
        self.photos
            .list_by_product(product.id, tx)
            .await
            .map_err(Self::map_photo_error)
    }
}

#[cfg(test)]
#[path = "photo_service_tests.rs"]
mod photo_service_tests;
