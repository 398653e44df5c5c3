//! Order/item store adapter
//!
//! Persistence is externally owned; the kitchen core reads and writes orders
//! through this narrow repository-style contract only. Active orders come
//! back with their items, dish snapshots and table/reservation linkage
//! eagerly present — no further queries are needed to project them.
//!
//! The adapter provides no per-item locking: two nearly simultaneous writes
//! to the same item race with last-write-wins semantics, which the domain
//! accepts (human operators acting on a shared physical ticket rarely
//! collide within milliseconds).

mod memory;

pub use memory::MemoryOrderStore;

use async_trait::async_trait;
use shared::models::{Category, Dish, ItemStatus, Order, OrderItem, OrderStatus};

/// Store-level failure, wrapped into `AppError::Store` at the API boundary
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store corrupted: {0}")]
    Corrupted(String),
}

/// Repository contract the kitchen core consumes
#[async_trait]
pub trait OrderStore: Send + Sync + std::fmt::Debug {
    /// All orders in an active status (Processing or Preparing), items
    /// included. Zero-item orders may be returned; the projections exclude
    /// them.
    async fn active_orders(&self) -> Result<Vec<Order>, StoreError>;

    /// Single order by id, any status
    async fn order(&self, id: &str) -> Result<Option<Order>, StoreError>;

    /// Single item by id, searched across all orders
    async fn find_item(&self, id: &str) -> Result<Option<OrderItem>, StoreError>;

    /// Persist a new preparation status; returns the updated item, or None
    /// if the item does not exist. Re-applying the current status is a
    /// data-level no-op that still returns the item.
    async fn set_item_status(
        &self,
        id: &str,
        status: ItemStatus,
    ) -> Result<Option<OrderItem>, StoreError>;

    /// Persist the urgent flag; returns the updated item, or None if absent
    async fn set_item_urgent(&self, id: &str, urgent: bool)
        -> Result<Option<OrderItem>, StoreError>;

    /// Persist a new order status; returns false if the order is absent
    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<bool, StoreError>;

    /// Insert a freshly submitted order
    async fn insert_order(&self, order: Order) -> Result<(), StoreError>;

    /// Dish master data by id
    async fn dish(&self, id: &str) -> Result<Option<Dish>, StoreError>;

    /// Active categories, sorted for display (station filter source)
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Distinct course types across the dish catalog (filter source)
    async fn course_types(&self) -> Result<Vec<String>, StoreError>;
}
