//! Order persistence.
//!
//! Orders live behind the [`OrderStore`] trait so the service can run
//! against `PostgreSQL` in production and an in-memory map in development
//! and tests.
//!
//! # Backends
//!
//! - [`PgOrderStore`] - `orders` table, see `crates/api/migrations/`
//! - [`MemoryOrderStore`] - process-local, lost on restart

mod memory;
mod postgres;

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

use async_trait::async_trait;
use thiserror::Error;

use drive_thru_core::{Order, OrderId, OrderItem, UserId};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is invalid or corrupted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// An order that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: Option<UserId>,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    /// Sum of item quantities.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        OrderItem::total(&self.items)
    }
}

/// Storage for placed orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store a new order and return it with its assigned id and timestamp.
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Every order, oldest first.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// Orders placed by `user_id`, oldest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError>;

    /// Delete an order. Returns `false` if no order had that id.
    async fn remove(&self, id: OrderId) -> Result<bool, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
