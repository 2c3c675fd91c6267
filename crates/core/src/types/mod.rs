//! Core types for Drive-Thru.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod menu;
pub mod order;
pub mod user;

pub use id::*;
pub use menu::{MenuItem, UnknownMenuItem};
pub use order::{Order, OrderItem};
pub use user::{UserId, UserIdError};
