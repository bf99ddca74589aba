//! Customer list rendering.

use askama::Template;
use trendx_core::Customer;

use super::format::{or_na, short_date};
use super::{Fragment, RenderError};

struct CustomerView {
    name: String,
    phone: String,
    email: String,
    address: String,
    registered: String,
}

#[derive(Template)]
#[template(path = "customers.html")]
struct CustomerListTemplate<'a> {
    customers: &'a [CustomerView],
}

/// Render the customer list. Customers carry no action controls.
///
/// # Errors
///
/// Returns [`RenderError`] if the template fails to render.
pub fn render_customers(customers: &[Customer]) -> Result<Fragment, RenderError> {
    let views: Vec<CustomerView> = customers
        .iter()
        .map(|customer| CustomerView {
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: or_na(&customer.email),
            address: or_na(&customer.address),
            registered: short_date(&customer.created_at),
        })
        .collect();

    let html = CustomerListTemplate { customers: &views }.render()?;
    Ok(Fragment {
        html,
        controls: Vec::new(),
    })
}
