//! Driving port for product and category lifecycle.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::catalog::{
    Category, Product, CATEGORY_DESCRIPTION_MAX_LEN, CATEGORY_NAME_MAX_LEN, CATEGORY_NAME_MIN_LEN,
    PRODUCT_CODE_MAX_LEN, PRODUCT_DESCRIPTION_MAX_LEN, PRODUCT_NAME_MAX_LEN, PRODUCT_NAME_MIN_LEN,
};
use crate::domain::error::DomainResult;
use crate::domain::ids::{CategoryId, ProductId, ProfileId, StorefrontId};
use crate::domain::page::{Page, PageRequest};
use crate::domain::validation::{require_len, require_max_len, require_positive};

use super::transaction::TransactionHandle;

/// Input for [`CatalogCommand::create_product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductRequest {
    /// Display name.
    pub name: String,
    /// Merchant-facing stock code.
    pub code: String,
    /// Optional long description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Storefront the caller claims to create under; checked against the
    /// caller's actual ownership.
    pub storefront_id: StorefrontId,
    /// Referenced category.
    pub category_id: CategoryId,
}

impl NewProductRequest {
    /// Check field shapes.
    pub fn validate(&self) -> DomainResult<()> {
        require_len("name", &self.name, PRODUCT_NAME_MIN_LEN, PRODUCT_NAME_MAX_LEN)?;
        require_len("code", &self.code, 1, PRODUCT_CODE_MAX_LEN)?;
        require_max_len("description", &self.description, PRODUCT_DESCRIPTION_MAX_LEN)?;
        require_positive("price", self.price)
    }
}

/// Input for [`CatalogCommand::update_product`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    /// Replacement display name, when present.
    pub name: Option<String>,
    /// Replacement stock code, when present.
    pub code: Option<String>,
    /// Replacement description, when present.
    pub description: Option<String>,
    /// Replacement price, when present.
    pub price: Option<Decimal>,
    /// Replacement category, when present; its existence is verified
    /// before the patch is applied.
    pub category_id: Option<CategoryId>,
}

impl ProductPatch {
    /// Check field shapes of the present fields.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require_len("name", name, PRODUCT_NAME_MIN_LEN, PRODUCT_NAME_MAX_LEN)?;
        }
        if let Some(code) = &self.code {
            require_len("code", code, 1, PRODUCT_CODE_MAX_LEN)?;
        }
        if let Some(description) = &self.description {
            require_max_len("description", description, PRODUCT_DESCRIPTION_MAX_LEN)?;
        }
        if let Some(price) = self.price {
            require_positive("price", price)?;
        }
        Ok(())
    }
}

/// Input for [`CatalogCommand::create_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategoryRequest {
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
}

impl NewCategoryRequest {
    /// Check field shapes.
    pub fn validate(&self) -> DomainResult<()> {
        require_len("name", &self.name, CATEGORY_NAME_MIN_LEN, CATEGORY_NAME_MAX_LEN)?;
        require_max_len("description", &self.description, CATEGORY_DESCRIPTION_MAX_LEN)
    }
}

/// Input for [`CatalogCommand::update_category`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    /// Replacement display name, when present.
    pub name: Option<String>,
    /// Replacement description, when present.
    pub description: Option<String>,
}

impl CategoryPatch {
    /// Check field shapes of the present fields.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require_len("name", name, CATEGORY_NAME_MIN_LEN, CATEGORY_NAME_MAX_LEN)?;
        }
        if let Some(description) = &self.description {
            require_max_len("description", description, CATEGORY_DESCRIPTION_MAX_LEN)?;
        }
        Ok(())
    }
}

/// Driving port for the catalog.
///
/// Every product operation takes the caller's profile and resolves their
/// storefront before touching a row; products of other storefronts are
/// indistinguishable from absent ones on every path. Categories are
/// shared across tenants and carry no ownership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Create a product inside the caller's own storefront.
    ///
    /// A payload naming any other storefront — even a valid one — fails
    /// `Forbidden`; a code collision within the storefront fails
    /// `Duplicate { field: "code" }`.
    async fn create_product(
        &self,
        profile_id: ProfileId,
        request: NewProductRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Product>;

    /// Patch a product of the caller's storefront; foreign or missing
    /// products are both `NotFound`.
    async fn update_product(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        patch: ProductPatch,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Product>;

    /// Delete a product of the caller's storefront; foreign or missing
    /// products are both `NotFound`.
    async fn delete_product(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()>;

    /// Fetch a product of the caller's storefront; foreign or missing
    /// products are both `NotFound`.
    async fn get_product(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Product>;

    /// List the caller's products.
    async fn list_products(
        &self,
        profile_id: ProfileId,
        page: PageRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Page<Product>>;

    /// Create a shared category.
    async fn create_category(
        &self,
        request: NewCategoryRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Category>;

    /// Patch a category; `NotFound` when absent.
    async fn update_category(
        &self,
        category_id: CategoryId,
        patch: CategoryPatch,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Category>;

    /// Delete a category; `Restricted` while products reference it,
    /// `NotFound` when absent.
    async fn delete_category(
        &self,
        category_id: CategoryId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()>;

    /// List categories.
    async fn list_categories(
        &self,
        page: PageRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Page<Category>>;
}
