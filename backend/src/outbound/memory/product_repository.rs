//! In-memory product rows.

use async_trait::async_trait;

use crate::domain::catalog::{NewProduct, Product, ProductChanges};
use crate::domain::ids::{ProductId, StorefrontId};
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::{
    ProductPersistenceError, ProductRepository, TransactionHandle,
};

use super::store::InMemoryDatabase;

/// Product repository over [`InMemoryDatabase`].
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    db: InMemoryDatabase,
}

impl InMemoryProductRepository {
    /// Create a repository over `db`.
    #[must_use]
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(
        &self,
        product: &NewProduct,
        tx: Option<TransactionHandle>,
    ) -> Result<Product, ProductPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                if !tables.categories.contains_key(&product.category_id.get()) {
                    return Err(ProductPersistenceError::missing_category(
                        product.category_id,
                    ));
                }
                if tables.products.values().any(|row| {
                    row.storefront_id == product.storefront_id && row.code == product.code
                }) {
                    return Err(ProductPersistenceError::duplicate_code(
                        product.storefront_id,
                        product.code.clone(),
                    ));
                }
                let id = tables.next_id();
                let now = InMemoryDatabase::now();
                let row = Product {
                    id: ProductId::new(id),
                    name: product.name.clone(),
                    code: product.code.clone(),
                    description: product.description.clone(),
                    price: product.price,
                    storefront_id: product.storefront_id,
                    category_id: product.category_id,
                    created_at: now,
                    updated_at: now,
                };
                tables.products.insert(id, row.clone());
                Ok(row)
            })
            .map_err(ProductPersistenceError::connection)?
    }

    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Product>, ProductPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                let Some(current) = tables.products.get(&id.get()).cloned() else {
                    return Ok(None);
                };
                if let Some(code) = &changes.code {
                    let taken = tables.products.values().any(|row| {
                        row.id != id
                            && row.storefront_id == current.storefront_id
                            && &row.code == code
                    });
                    if taken {
                        return Err(ProductPersistenceError::duplicate_code(
                            current.storefront_id,
                            code.clone(),
                        ));
                    }
                }
                if let Some(category_id) = changes.category_id {
                    if !tables.categories.contains_key(&category_id.get()) {
                        return Err(ProductPersistenceError::missing_category(category_id));
                    }
                }
                let Some(row) = tables.products.get_mut(&id.get()) else {
                    return Ok(None);
                };
                if let Some(name) = &changes.name {
                    row.name.clone_from(name);
                }
                if let Some(code) = &changes.code {
                    row.code.clone_from(code);
                }
                if let Some(description) = &changes.description {
                    row.description.clone_from(description);
                }
                if let Some(price) = changes.price {
                    row.price = price;
                }
                if let Some(category_id) = changes.category_id {
                    row.category_id = category_id;
                }
                row.updated_at = InMemoryDatabase::now();
                Ok(Some(row.clone()))
            })
            .map_err(ProductPersistenceError::connection)?
    }

    async fn delete(
        &self,
        id: ProductId,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, ProductPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                let existed = tables.products.contains_key(&id.get());
                if existed {
                    tables.cascade_product(id.get());
                }
                existed
            })
            .map_err(ProductPersistenceError::connection)
    }

    async fn find_scoped(
        &self,
        id: ProductId,
        storefront_id: StorefrontId,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Product>, ProductPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                tables
                    .products
                    .get(&id.get())
                    .filter(|row| row.storefront_id == storefront_id)
                    .cloned()
            })
            .map_err(ProductPersistenceError::connection)
    }

    async fn list_by_storefront(
        &self,
        storefront_id: StorefrontId,
        page: PageRequest,
        tx: Option<TransactionHandle>,
    ) -> Result<Page<Product>, ProductPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                let owned: Vec<Product> = tables
                    .products
                    .values()
                    .filter(|row| row.storefront_id == storefront_id)
                    .cloned()
                    .collect();
                let total = owned.len() as u64;
                let items = owned
                    .into_iter()
                    .skip(page.skip as usize)
                    .take(page.limit as usize)
                    .collect();
                Page { items, total }
            })
            .map_err(ProductPersistenceError::connection)
    }
}
