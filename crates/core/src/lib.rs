//! Drive-Thru Core - Shared types library.
//!
//! This crate provides common types used across all Drive-Thru components:
//! - `storefront` - Customer-facing page server (orders landing page)
//! - `api` - Orders backend (request interpretation and order storage)
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, the menu, and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
