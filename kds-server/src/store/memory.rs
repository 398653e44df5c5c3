//! In-memory order store
//!
//! Process-local adapter used by the development binary and the test suite.
//! A deployment against a relational store implements [`OrderStore`] over
//! its own pool instead; nothing outside this file changes.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use shared::models::{Category, Dish, ItemStatus, Order, OrderItem, OrderStatus};

use super::{OrderStore, StoreError};

/// Catalog master-data file shape (`CATALOG_FILE`)
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    dishes: Vec<Dish>,
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Debug, Default)]
struct Inner {
    orders: HashMap<String, Order>,
    dishes: HashMap<String, Dish>,
    categories: Vec<Category>,
}

/// In-memory [`OrderStore`] implementation
///
/// Writes take the lock briefly and mutate in place — concurrent writers to
/// the same item race with last-write-wins, matching the adapter contract.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with dish/category master data
    pub fn with_catalog(dishes: Vec<Dish>, categories: Vec<Category>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            inner.dishes = dishes.into_iter().map(|d| (d.id.clone(), d)).collect();
            inner.categories = categories;
        }
        store
    }

    /// Load catalog master data from a JSON file
    pub fn from_catalog_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StoreError::Unavailable(format!("catalog file: {e}")))?;
        let catalog: CatalogFile = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupted(format!("catalog file: {e}")))?;
        Ok(Self::with_catalog(catalog.dishes, catalog.categories))
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn active_orders(&self) -> Result<Vec<Order>, StoreError> {
        let inner = self.inner.read();
        let mut orders: Vec<Order> = inner
            .orders
            .values()
            .filter(|o| o.status.is_active())
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn order(&self, id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.inner.read().orders.get(id).cloned())
    }

    async fn find_item(&self, id: &str) -> Result<Option<OrderItem>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .orders
            .values()
            .flat_map(|o| o.items.iter())
            .find(|i| i.id == id)
            .cloned())
    }

    async fn set_item_status(
        &self,
        id: &str,
        status: ItemStatus,
    ) -> Result<Option<OrderItem>, StoreError> {
        let mut inner = self.inner.write();
        for order in inner.orders.values_mut() {
            if let Some(item) = order.items.iter_mut().find(|i| i.id == id) {
                item.status = status;
                return Ok(Some(item.clone()));
            }
        }
        Ok(None)
    }

    async fn set_item_urgent(
        &self,
        id: &str,
        urgent: bool,
    ) -> Result<Option<OrderItem>, StoreError> {
        let mut inner = self.inner.write();
        for order in inner.orders.values_mut() {
            if let Some(item) = order.items.iter_mut().find(|i| i.id == id) {
                item.urgent = urgent;
                return Ok(Some(item.clone()));
            }
        }
        Ok(None)
    }

    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        match inner.orders.get_mut(id) {
            Some(order) => {
                order.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        self.inner.write().orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn dish(&self, id: &str) -> Result<Option<Dish>, StoreError> {
        Ok(self.inner.read().dishes.get(id).cloned())
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let inner = self.inner.read();
        let mut categories: Vec<Category> = inner
            .categories
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.sort_order);
        Ok(categories)
    }

    async fn course_types(&self) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read();
        let mut types: Vec<String> = inner
            .dishes
            .values()
            .map(|d| d.course_type.clone())
            .collect();
        types.sort();
        types.dedup();
        Ok(types)
    }
}
