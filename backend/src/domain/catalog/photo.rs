//! Product photo rows linking stored binaries to products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{PhotoId, ProductId};

/// Photo row held by the relational store.
///
/// The binary itself lives in the external image store under `image_id`;
/// this row only links it to a product. Rows cascade away with their
/// product, which can leave the binary orphaned in the image store — the
/// accepted trade-off is offline cleanup rather than distributed deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Row id assigned by the store.
    pub id: PhotoId,
    /// Image-store handle; globally unique.
    pub image_id: String,
    /// Public URL served by the image store.
    pub url: String,
    /// Owning product.
    pub product_id: ProductId,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
}

/// Insertable photo link data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
    /// Image-store handle of the saved binary.
    pub image_id: String,
    /// Public URL served by the image store.
    pub url: String,
    /// Product to link the binary to.
    pub product_id: ProductId,
}

/// Binary saved in the external image store, not yet linked to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    /// Image-store handle.
    pub image_id: String,
    /// Public URL served by the image store.
    pub url: String,
}
