//! Business logic behind the orders API routes.

mod ordering;

pub use ordering::{OrderingError, OrderingService, Outcome, validate_items};
