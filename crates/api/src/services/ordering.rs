//! Processing free-text order requests.
//!
//! ```text
//! user input ──► interpreter ──► Intent::Order  ──► menu filter ──► store.insert
//!                              └► Intent::Cancel ──► store.remove
//! ```

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use drive_thru_core::{MenuItem, Order, OrderId, OrderItem, UserId};

use crate::interpreter::{Intent, InterpreterError, OrderInterpreter, RequestedItem};
use crate::store::{NewOrder, OrderStore, StoreError};

/// Errors from processing a request.
#[derive(Debug, Error)]
pub enum OrderingError {
    #[error("could not interpret request: {0}")]
    Interpreter(#[from] InterpreterError),

    #[error("order store failed: {0}")]
    Store(#[from] StoreError),

    /// The request named nothing that is on the menu.
    #[error("no valid menu items in request")]
    NoValidItems,

    #[error("request is empty")]
    EmptyRequest,
}

/// What happened to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Placed(Order),
    Cancelled(OrderId),
    /// Cancellation named an order that does not exist.
    NotFound(OrderId),
}

/// Turns customer requests into stored orders.
#[derive(Clone)]
pub struct OrderingService {
    store: Arc<dyn OrderStore>,
    interpreter: Arc<dyn OrderInterpreter>,
}

impl OrderingService {
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, interpreter: Arc<dyn OrderInterpreter>) -> Self {
        Self { store, interpreter }
    }

    /// The underlying order store.
    #[must_use]
    pub fn store(&self) -> &dyn OrderStore {
        self.store.as_ref()
    }

    /// Interpret `user_input` and apply it.
    ///
    /// # Errors
    ///
    /// Returns `OrderingError::EmptyRequest` for blank input,
    /// `OrderingError::NoValidItems` when an order names nothing on the menu,
    /// and passes through interpreter and store failures.
    #[instrument(skip_all, fields(user_id = tracing::field::Empty))]
    pub async fn process(
        &self,
        user_input: &str,
        user_id: Option<UserId>,
    ) -> Result<Outcome, OrderingError> {
        let user_input = user_input.trim();
        if user_input.is_empty() {
            return Err(OrderingError::EmptyRequest);
        }
        if let Some(user_id) = &user_id {
            tracing::Span::current().record("user_id", user_id.as_str());
        }

        match self.interpreter.interpret(user_input).await? {
            Intent::Order { items } => {
                let items = validate_items(&items);
                if items.is_empty() {
                    return Err(OrderingError::NoValidItems);
                }

                let order = self.store.insert(NewOrder { user_id, items }).await?;
                tracing::info!(
                    order_id = %order.id,
                    total_items = order.total_items,
                    "Order placed"
                );
                Ok(Outcome::Placed(order))
            }
            Intent::Cancel { order_id } => {
                let id = OrderId::new(order_id);
                if self.store.remove(id).await? {
                    tracing::info!(order_id = %id, "Order cancelled");
                    Ok(Outcome::Cancelled(id))
                } else {
                    tracing::info!(order_id = %id, "Cancellation for unknown order");
                    Ok(Outcome::NotFound(id))
                }
            }
        }
    }
}

/// Keep only menu items with a positive quantity.
///
/// Item names are matched case-insensitively. Quantities too large for a
/// `u32` are dropped along with zero and negative ones.
#[must_use]
pub fn validate_items(requested: &[RequestedItem]) -> Vec<OrderItem> {
    requested
        .iter()
        .filter_map(|line| {
            let item = line.item.parse::<MenuItem>().ok()?;
            let quantity = u32::try_from(line.quantity).ok().filter(|q| *q > 0)?;
            Some(OrderItem { item, quantity })
        })
        .collect()
}
