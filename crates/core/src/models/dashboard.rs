//! Dashboard aggregate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-wide totals computed by the backend on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub total_products: u64,
    pub total_customers: u64,
    pub total_orders: u64,
    /// Sum of all order totals.
    pub total_revenue: Decimal,
    /// Sum of `price * quantity` over all products.
    pub inventory_value: Decimal,
}
