//! In-memory photo link rows.

use async_trait::async_trait;

use crate::domain::catalog::{NewPhoto, Photo};
use crate::domain::ids::{PhotoId, ProductId};
use crate::domain::ports::{
    PhotoPersistenceError, PhotoRepository, TransactionHandle,
};

use super::store::InMemoryDatabase;

/// Photo repository over [`InMemoryDatabase`].
#[derive(Debug, Clone)]
pub struct InMemoryPhotoRepository {
    db: InMemoryDatabase,
}

impl InMemoryPhotoRepository {
    /// Create a repository over `db`.
    #[must_use]
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PhotoRepository for InMemoryPhotoRepository {
    async fn create(
        &self,
        photo: &NewPhoto,
        tx: Option<TransactionHandle>,
    ) -> Result<Photo, PhotoPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                if !tables.products.contains_key(&photo.product_id.get()) {
                    return Err(PhotoPersistenceError::missing_product(photo.product_id));
                }
                if tables
                    .photos
                    .values()
                    .any(|row| row.image_id == photo.image_id)
                {
                    return Err(PhotoPersistenceError::duplicate_image(
                        photo.image_id.clone(),
                    ));
                }
                let id = tables.next_id();
                let row = Photo {
                    id: PhotoId::new(id),
                    image_id: photo.image_id.clone(),
                    url: photo.url.clone(),
                    product_id: photo.product_id,
                    created_at: InMemoryDatabase::now(),
                };
                tables.photos.insert(id, row.clone());
                Ok(row)
            })
            .map_err(PhotoPersistenceError::connection)?
    }

    async fn delete_by_image_id(
        &self,
        image_id: &str,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, PhotoPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                let before = tables.photos.len();
                tables.photos.retain(|_, row| row.image_id != image_id);
                tables.photos.len() < before
            })
            .map_err(PhotoPersistenceError::connection)
    }

    async fn find_by_image_id(
        &self,
        image_id: &str,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Photo>, PhotoPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                tables
                    .photos
                    .values()
                    .find(|row| row.image_id == image_id)
                    .cloned()
            })
            .map_err(PhotoPersistenceError::connection)
    }

    async fn list_by_product(
        &self,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> Result<Vec<Photo>, PhotoPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                tables
                    .photos
                    .values()
                    .filter(|row| row.product_id == product_id)
                    .cloned()
                    .collect()
            })
            .map_err(PhotoPersistenceError::connection)
    }
}
