//! HTML rendering of record lists.
//!
//! Each `render_*` function is pure: records in, [`Fragment`] out. A
//! fragment carries the markup plus the action controls embedded in it.
//! Every control captures the identifier of its record at render time, so
//! activating it later acts on exactly the record that was on screen.
//!
//! Escaping is done by askama; all record text goes through it.

mod customers;
mod dashboard;
pub mod format;
mod orders;
mod products;

use thiserror::Error;
use trendx_core::{OrderId, OrderStatus, ProductId};

pub use customers::render_customers;
pub use dashboard::counters;
pub use orders::render_orders;
pub use products::render_products;

/// Errors from template rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Mutation bound to a rendered control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Delete the product (after confirmation).
    DeleteProduct(ProductId),
    /// Move the order to a new status.
    SetOrderStatus { order: OrderId, status: OrderStatus },
}

/// An action element inside a fragment.
///
/// `id` appears in the markup as the element's `data-control` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: String,
    pub action: Action,
}

impl Control {
    fn delete_product(id: &ProductId) -> Self {
        Self {
            id: format!("delete-product-{id}"),
            action: Action::DeleteProduct(id.clone()),
        }
    }

    fn complete_order(id: &OrderId) -> Self {
        Self {
            id: format!("complete-order-{id}"),
            action: Action::SetOrderStatus {
                order: id.clone(),
                status: OrderStatus::Completed,
            },
        }
    }
}

/// Rendered markup for one list target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub html: String,
    pub controls: Vec<Control>,
}

impl Fragment {
    /// Look up a control by id.
    #[must_use]
    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }
}
