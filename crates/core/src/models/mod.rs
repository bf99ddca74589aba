//! Records exchanged with the shop backend.
//!
//! Record types mirror the list payloads; `New*` types are the request
//! bodies of the create endpoints.

pub mod customer;
pub mod dashboard;
pub mod order;
pub mod product;

pub use customer::{Customer, NewCustomer};
pub use dashboard::DashboardSnapshot;
pub use order::{NewOrder, Order, StatusUpdate};
pub use product::{NewProduct, Product};

use serde::{Deserialize, Deserializer};

/// Decode an optional text field, mapping `null` to the empty string.
///
/// The backend stores whatever the client sent, so `null` shows up for
/// fields older clients left out.
pub(crate) fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
