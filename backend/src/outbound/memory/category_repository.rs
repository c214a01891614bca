//! In-memory category rows.

use async_trait::async_trait;

use crate::domain::catalog::{Category, CategoryChanges, NewCategory};
use crate::domain::ids::CategoryId;
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::{
    CategoryPersistenceError, CategoryRepository, TransactionHandle,
};

use super::store::InMemoryDatabase;

/// Category repository over [`InMemoryDatabase`].
#[derive(Debug, Clone)]
pub struct InMemoryCategoryRepository {
    db: InMemoryDatabase,
}

impl InMemoryCategoryRepository {
    /// Create a repository over `db`.
    #[must_use]
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(
        &self,
        category: &NewCategory,
        tx: Option<TransactionHandle>,
    ) -> Result<Category, CategoryPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                let id = tables.next_id();
                let now = InMemoryDatabase::now();
                let row = Category {
                    id: CategoryId::new(id),
                    name: category.name.clone(),
                    description: category.description.clone(),
                    created_at: now,
                    updated_at: now,
                };
                tables.categories.insert(id, row.clone());
                row
            })
            .map_err(CategoryPersistenceError::connection)
    }

    async fn update(
        &self,
        id: CategoryId,
        changes: &CategoryChanges,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                let Some(row) = tables.categories.get_mut(&id.get()) else {
                    return None;
                };
                if let Some(name) = &changes.name {
                    row.name.clone_from(name);
                }
                if let Some(description) = &changes.description {
                    row.description.clone_from(description);
                }
                row.updated_at = InMemoryDatabase::now();
                Some(row.clone())
            })
            .map_err(CategoryPersistenceError::connection)
    }

    async fn delete(
        &self,
        id: CategoryId,
        tx: Option<TransactionHandle>,
    ) -> Result<bool, CategoryPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                if !tables.categories.contains_key(&id.get()) {
                    return Ok(false);
                }
                if tables.category_referenced(id.get()) {
                    return Err(CategoryPersistenceError::referenced(id));
                }
                tables.categories.remove(&id.get());
                Ok(true)
            })
            .map_err(CategoryPersistenceError::connection)?
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
        tx: Option<TransactionHandle>,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        self.db
            .with_tables(tx, |tables| tables.categories.get(&id.get()).cloned())
            .map_err(CategoryPersistenceError::connection)
    }

    async fn list(
        &self,
        page: PageRequest,
        tx: Option<TransactionHandle>,
    ) -> Result<Page<Category>, CategoryPersistenceError> {
        self.db
            .with_tables(tx, |tables| {
                let mut rows: Vec<Category> = tables.categories.values().cloned().collect();
                rows.sort_by(|a, b| a.name.cmp(&b.name));
                let total = rows.len() as u64;
                let items = rows
                    .into_iter()
                    .skip(page.skip as usize)
                    .take(page.limit as usize)
                    .collect();
                Page { items, total }
            })
            .map_err(CategoryPersistenceError::connection)
    }
}
