//! Shared relational table store and its transaction scope.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::catalog::{Category, Photo, Product};
use crate::domain::ports::{TransactionError, TransactionHandle, TransactionScope};
use crate::domain::profile::Profile;
use crate::domain::storefront::Storefront;

/// Relational tables held in memory.
///
/// `BTreeMap` keyed by the raw row id keeps iteration in insertion order,
/// which stands in for `ORDER BY created_at` in listings.
#[derive(Debug, Clone, Default)]
pub(super) struct Tables {
    pub profiles: BTreeMap<i64, Profile>,
    pub storefronts: BTreeMap<i64, Storefront>,
    pub products: BTreeMap<i64, Product>,
    pub categories: BTreeMap<i64, Category>,
    pub photos: BTreeMap<i64, Photo>,
    next_id: i64,
}

impl Tables {
    /// Advance the shared row-id sequence.
    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Whether any product still references `category_id`.
    pub fn category_referenced(&self, category_id: i64) -> bool {
        self.products
            .values()
            .any(|product| product.category_id.get() == category_id)
    }

    /// Drop a product row together with its photo rows.
    pub fn cascade_product(&mut self, product_id: i64) {
        self.products.remove(&product_id);
        self.photos
            .retain(|_, photo| photo.product_id.get() != product_id);
    }

    /// Drop a storefront row together with its products and their photos.
    pub fn cascade_storefront(&mut self, storefront_id: i64) {
        self.storefronts.remove(&storefront_id);
        let owned: Vec<i64> = self
            .products
            .values()
            .filter(|product| product.storefront_id.get() == storefront_id)
            .map(|product| product.id.get())
            .collect();
        for product_id in owned {
            self.cascade_product(product_id);
        }
    }
}

#[derive(Debug, Default)]
struct State {
    tables: Tables,
    snapshots: HashMap<TransactionHandle, Tables>,
}

/// In-memory stand-in for the relational store.
///
/// Cloning shares the same tables; every repository adapter over the same
/// instance sees the same rows, like connections to one database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<State>>,
}

impl InMemoryDatabase {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "store mutex poisoned".to_owned())
    }

    /// Run `f` against the live tables.
    ///
    /// When `tx` is present it must name an open transaction; an unknown
    /// handle is reported instead of silently writing outside any scope.
    pub(super) fn with_tables<T>(
        &self,
        tx: Option<TransactionHandle>,
        f: impl FnOnce(&mut Tables) -> T,
    ) -> Result<T, String> {
        let mut state = self.lock()?;
        if let Some(handle) = tx {
            if !state.snapshots.contains_key(&handle) {
                return Err("unknown transaction handle".to_owned());
            }
        }
        Ok(f(&mut state.tables))
    }

    /// Current wall-clock timestamp for row bookkeeping.
    pub(super) fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

#[async_trait]
impl TransactionScope for InMemoryDatabase {
    async fn begin(&self) -> Result<TransactionHandle, TransactionError> {
        let mut state = self.lock().map_err(TransactionError::begin)?;
        let handle = TransactionHandle::issue();
        let snapshot = state.tables.clone();
        state.snapshots.insert(handle, snapshot);
        Ok(handle)
    }

    async fn commit(&self, handle: TransactionHandle) -> Result<(), TransactionError> {
        let mut state = self.lock().map_err(TransactionError::commit)?;
        state
            .snapshots
            .remove(&handle)
            .map(|_| ())
            .ok_or(TransactionError::UnknownHandle)
    }

    async fn rollback(&self, handle: TransactionHandle) -> Result<(), TransactionError> {
        let mut state = self.lock().map_err(TransactionError::rollback)?;
        let snapshot = state
            .snapshots
            .remove(&handle)
            .ok_or(TransactionError::UnknownHandle)?;
        state.tables = snapshot;
        Ok(())
    }
}
