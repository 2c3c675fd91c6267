//! `PostgreSQL` order store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use drive_thru_core::{Order, OrderId, OrderItem, UserId};

use super::{NewOrder, OrderStore, StoreError};

/// Orders stored in the `orders` table.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

/// One row of the `orders` table.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: Option<UserId>,
    items: Json<Vec<OrderItem>>,
    total_items: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let total_items = u32::try_from(row.total_items).map_err(|_| {
            StoreError::DataCorruption(format!(
                "negative total_items {} on order {}",
                row.total_items, row.id
            ))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            items: row.items.0,
            total_items,
            created_at: row.created_at,
        })
    }
}

impl PgOrderStore {
    /// Create a store backed by `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        let total_items = i32::try_from(order.total_items()).map_err(|_| {
            StoreError::DataCorruption(format!("order too large: {}", order.total_items()))
        })?;

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, items, total_items)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, items, total_items, created_at
            ",
        )
        .bind(order.user_id)
        .bind(Json(order.items))
        .bind(total_items)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, items, total_items, created_at
            FROM orders
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, items, total_items, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn remove(&self, id: OrderId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(total_items: i32) -> OrderRow {
        OrderRow {
            id: OrderId::new(7),
            user_id: None,
            items: Json(Vec::new()),
            total_items,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let order = Order::try_from(row(3)).expect("valid row");
        assert_eq!(order.id, OrderId::new(7));
        assert_eq!(order.total_items, 3);
    }

    #[test]
    fn test_negative_total_is_corruption() {
        assert!(matches!(
            Order::try_from(row(-1)),
            Err(StoreError::DataCorruption(_))
        ));
    }
}
