//! Catalog service.
//!
//! Every product operation authorizes through the caller's owned
//! storefront and reads rows through the storefront-scoped lookup, so a
//! foreign product is indistinguishable from an absent one on every path.
//! Categories are shared across tenants and skip the ownership step.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::catalog::{
    Category, CategoryChanges, NewCategory, NewProduct, Product, ProductChanges,
};
use crate::domain::error::{DomainResult, Error};
use crate::domain::ids::{CategoryId, ProductId, ProfileId};
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::{
    CatalogCommand, CategoryPatch, CategoryPersistenceError, CategoryRepository,
    NewCategoryRequest, NewProductRequest, ProductPatch, ProductPersistenceError,
    ProductRepository, StorefrontOwnership, TransactionHandle,
};
use crate::domain::storefront::Storefront;

/// Service implementing [`CatalogCommand`].
#[derive(Clone)]
pub struct CatalogService<O, P, C> {
    ownership: Arc<O>,
    products: Arc<P>,
    categories: Arc<C>,
}

impl<O, P, C> CatalogService<O, P, C> {
    /// Create a new service over the given ownership port and repositories.
    pub fn new(ownership: Arc<O>, products: Arc<P>, categories: Arc<C>) -> Self {
        Self {
            ownership,
            products,
            categories,
        }
    }
}

impl<O, P, C> CatalogService<O, P, C>
where
    O: StorefrontOwnership,
    P: ProductRepository,
    C: CategoryRepository,
{
    fn map_product_error(error: ProductPersistenceError) -> Error {
        match error {
            ProductPersistenceError::DuplicateCode { .. } => Error::duplicate("code"),
            ProductPersistenceError::MissingCategory { .. } => Error::not_found("category"),
            ProductPersistenceError::Connection { message }
            | ProductPersistenceError::Query { message } => Error::fatal(message),
        }
    }

    fn map_category_error(error: CategoryPersistenceError) -> Error {
        match error {
            CategoryPersistenceError::Referenced { .. } => Error::restricted("category"),
            CategoryPersistenceError::Connection { message }
            | CategoryPersistenceError::Query { message } => Error::fatal(message),
        }
    }

    /// Resolve the caller's storefront; a caller without one holds no
    /// catalog, so the storefront itself reads as absent.
    async fn own_storefront(
        &self,
        profile_id: ProfileId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Storefront> {
        self.ownership
            .owned_by(profile_id, tx)
            .await?
            .ok_or_else(|| Error::not_found("storefront"))
    }

    async fn require_category(
        &self,
        category_id: CategoryId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()> {
        self.categories
            .find_by_id(category_id, tx)
            .await
            .map_err(Self::map_category_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("category"))
    }

    /// Fetch `product_id` through the storefront-scoped lookup. Foreign
    /// and missing rows both come back as `NotFound`.
    async fn own_product(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Product> {
        let storefront = self.own_storefront(profile_id, tx).await?;
        self.products
            .find_scoped(product_id, storefront.id, tx)
            .await
            .map_err(Self::map_product_error)?
            .ok_or_else(|| Error::not_found("product"))
    }
}

#[async_trait]
impl<O, P, C> CatalogCommand for CatalogService<O, P, C>
where
    O: StorefrontOwnership,
    P: ProductRepository,
    C: CategoryRepository,
{
    async fn create_product(
        &self,
        profile_id: ProfileId,
        request: NewProductRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Product> {
        request.validate()?;

        let storefront = self.own_storefront(profile_id, tx).await?;
        if request.storefront_id != storefront.id {
            // Unlike reads, the claimed storefront is explicit in the
            // payload here, so the mismatch is an authorization failure,
            // not an absence.
            debug!(
                %profile_id,
                claimed = %request.storefront_id,
                owned = %storefront.id,
                "product create claimed a foreign storefront"
            );
            return Err(Error::forbidden(
                "cannot create products in another storefront",
            ));
        }

        self.require_category(request.category_id, tx).await?;

        let product = self
            .products
            .create(
                &NewProduct {
                    name: request.name,
                    code: request.code,
                    description: request.description,
                    price: request.price,
                    storefront_id: request.storefront_id,
                    category_id: request.category_id,
                },
                tx,
            )
            .await
            .map_err(Self::map_product_error)?;

        debug!(product_id = %product.id, storefront_id = %storefront.id, "product created");
        Ok(product)
    }

    async fn update_product(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        patch: ProductPatch,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Product> {
        patch.validate()?;

        let owned = self.own_product(profile_id, product_id, tx).await?;
        if let Some(category_id) = patch.category_id {
            self.require_category(category_id, tx).await?;
        }

        self.products
            .update(
                owned.id,
                &ProductChanges {
                    name: patch.name,
                    code: patch.code,
                    description: patch.description,
                    price: patch.price,
                    category_id: patch.category_id,
                },
                tx,
            )
            .await
            .map_err(Self::map_product_error)?
            .ok_or_else(|| Error::not_found("product"))
    }

    async fn delete_product(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()> {
        let owned = self.own_product(profile_id, product_id, tx).await?;

        let deleted = self
            .products
            .delete(owned.id, tx)
            .await
            .map_err(Self::map_product_error)?;
        if !deleted {
            return Err(Error::not_found("product"));
        }

        debug!(%product_id, "product deleted");
        Ok(())
    }

    async fn get_product(
        &self,
        profile_id: ProfileId,
        product_id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Product> {
        self.own_product(profile_id, product_id, tx).await
    }

    async fn list_products(
        &self,
        profile_id: ProfileId,
        page: PageRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Page<Product>> {
        let storefront = self.own_storefront(profile_id, tx).await?;
        self.products
            .list_by_storefront(storefront.id, page, tx)
            .await
            .map_err(Self::map_product_error)
    }

    async fn create_category(
        &self,
        request: NewCategoryRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Category> {
        request.validate()?;

        let category = self
            .categories
            .create(
                &NewCategory {
                    name: request.name,
                    description: request.description,
                },
                tx,
            )
            .await
            .map_err(Self::map_category_error)?;

        debug!(category_id = %category.id, "category created");
        Ok(category)
    }

    async fn update_category(
        &self,
        category_id: CategoryId,
        patch: CategoryPatch,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Category> {
        patch.validate()?;

        self.categories
            .update(
                category_id,
                &CategoryChanges {
                    name: patch.name,
                    description: patch.description,
                },
                tx,
            )
            .await
            .map_err(Self::map_category_error)?
            .ok_or_else(|| Error::not_found("category"))
    }

    async fn delete_category(
        &self,
        category_id: CategoryId,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<()> {
        let deleted = self
            .categories
            .delete(category_id, tx)
            .await
            .map_err(Self::map_category_error)?;
        if !deleted {
            return Err(Error::not_found("category"));
        }

        debug!(%category_id, "category deleted");
        Ok(())
    }

    async fn list_categories(
        &self,
        page: PageRequest,
        tx: Option<TransactionHandle>,
    ) -> DomainResult<Page<Category>> {
        self.categories
            .list(page, tx)
            .await
            .map_err(Self::map_category_error)
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod catalog_service_tests;
