//! Product rows owned by a storefront.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{CategoryId, ProductId, StorefrontId};

/// Minimum accepted product name length.
pub const PRODUCT_NAME_MIN_LEN: usize = 2;
/// Maximum accepted product name length.
pub const PRODUCT_NAME_MAX_LEN: usize = 130;
/// Maximum accepted product code length.
pub const PRODUCT_CODE_MAX_LEN: usize = 50;
/// Maximum accepted product description length.
pub const PRODUCT_DESCRIPTION_MAX_LEN: usize = 1000;

/// Product row held by the relational store.
///
/// `code` is unique *within* the owning storefront, not globally: two
/// tenants may both sell a `"SKU1"`. The row belongs only to its creating
/// storefront; cross-tenant reads must go through a lookup scoped by both
/// product id and storefront id so foreign rows read as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Row id assigned by the store.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Merchant-facing stock code, unique per storefront.
    pub code: String,
    /// Optional long description.
    pub description: String,
    /// Unit price; strictly positive.
    pub price: Decimal,
    /// Owning storefront.
    pub storefront_id: StorefrontId,
    /// Referenced category; never owned by the product.
    pub category_id: CategoryId,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last row update time.
    pub updated_at: DateTime<Utc>,
}

/// Insertable product data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Merchant-facing stock code.
    pub code: String,
    /// Optional long description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Owning storefront.
    pub storefront_id: StorefrontId,
    /// Referenced category.
    pub category_id: CategoryId,
}

/// Column-level changes applied to an existing product row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    /// Replacement display name, when present.
    pub name: Option<String>,
    /// Replacement stock code, when present.
    pub code: Option<String>,
    /// Replacement description, when present.
    pub description: Option<String>,
    /// Replacement price, when present.
    pub price: Option<Decimal>,
    /// Replacement category, when present.
    pub category_id: Option<CategoryId>,
}
