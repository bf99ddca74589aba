//! Trend_X Core - Shared domain types.
//!
//! This crate provides the records exchanged with the shop backend:
//! - products, customers and orders as returned by the list endpoints
//! - request bodies for the create/update endpoints
//! - the dashboard aggregate snapshot
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! rendering. Both the dashboard client and the test backend depend on it so
//! the wire format is defined in exactly one place.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for record IDs, prices, statuses, timestamps
//! - [`models`] - Records and request bodies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
