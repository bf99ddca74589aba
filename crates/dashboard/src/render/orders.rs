//! Order list rendering.

use askama::Template;
use trendx_core::Order;

use super::format::date_time;
use super::{Control, Fragment, RenderError};

struct OrderView {
    customer: String,
    status: String,
    status_class: String,
    total: String,
    payment: String,
    date: String,
    items: String,
    control: String,
}

#[derive(Template)]
#[template(path = "orders.html")]
struct OrderListTemplate<'a> {
    orders: &'a [OrderView],
}

/// Render the order list, one block per order with a "Mark as Completed"
/// control.
///
/// # Errors
///
/// Returns [`RenderError`] if the template fails to render.
pub fn render_orders(orders: &[Order]) -> Result<Fragment, RenderError> {
    let mut controls = Vec::with_capacity(orders.len());
    let views: Vec<OrderView> = orders
        .iter()
        .map(|order| {
            let control = Control::complete_order(&order.id);
            let view = OrderView {
                customer: order.customer_name.clone(),
                status: order.status.to_string(),
                status_class: order.status.css_class(),
                total: order.total_price.to_string(),
                payment: order.payment_method.to_string(),
                date: date_time(&order.created_at),
                items: order.items.join(", "),
                control: control.id.clone(),
            };
            controls.push(control);
            view
        })
        .collect();

    let html = OrderListTemplate { orders: &views }.render()?;
    Ok(Fragment { html, controls })
}
