//! Dashboard counter formatting.

use trendx_core::DashboardSnapshot;

use super::format::grouped_money;
use crate::surface::Counter;

/// Text for every dashboard counter.
#[must_use]
pub fn counters(snapshot: &DashboardSnapshot) -> [(Counter, String); 5] {
    [
        (Counter::Products, snapshot.total_products.to_string()),
        (Counter::Customers, snapshot.total_customers.to_string()),
        (Counter::Orders, snapshot.total_orders.to_string()),
        (Counter::Revenue, grouped_money(snapshot.total_revenue)),
        (Counter::InventoryValue, grouped_money(snapshot.inventory_value)),
    ]
}
