//! Core types for the shop dashboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;
pub mod timestamp;

pub use id::*;
pub use price::{Price, PriceError};
pub use status::*;
