//! One-shot record commands.
//!
//! Each command drives the same [`Dashboard`] operations the page uses, so
//! prompts and refreshed lists appear on the console exactly as they would
//! on the page.

use std::error::Error;

use trendx_core::{OrderId, OrderStatus, ProductId};
use trendx_dashboard::{
    ApiClient, CustomerForm, Dashboard, DashboardConfig, OrderForm, ProductForm, Section,
};

use crate::console::{Confirm, ConsoleSurface};

type Console = Dashboard<ApiClient, ConsoleSurface<std::io::Stdout>>;

fn dashboard(config: &DashboardConfig, confirm: Confirm) -> Console {
    Dashboard::new(
        ApiClient::new(config.api_base.clone()),
        ConsoleSurface::stdout(confirm),
    )
}

/// Print the dashboard counters and connection status.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached.
pub async fn stats(config: &DashboardConfig) -> Result<(), Box<dyn Error>> {
    dashboard(config, Confirm::Assume(false))
        .load_dashboard()
        .await?;
    Ok(())
}

/// Print one rendered record list.
///
/// # Errors
///
/// Returns an error if the list cannot be fetched or rendered.
pub async fn list(config: &DashboardConfig, section: Section) -> Result<(), Box<dyn Error>> {
    dashboard(config, Confirm::Assume(false))
        .load(section)
        .await?;
    Ok(())
}

/// # Errors
///
/// Returns an error if validation or the request fails.
pub async fn add_product(
    config: &DashboardConfig,
    form: &ProductForm,
) -> Result<(), Box<dyn Error>> {
    dashboard(config, Confirm::Assume(false))
        .submit_product(form)
        .await?;
    Ok(())
}

/// # Errors
///
/// Returns an error if validation or the request fails.
pub async fn add_customer(
    config: &DashboardConfig,
    form: &CustomerForm,
) -> Result<(), Box<dyn Error>> {
    dashboard(config, Confirm::Assume(false))
        .submit_customer(form)
        .await?;
    Ok(())
}

/// # Errors
///
/// Returns an error if validation or the request fails.
pub async fn add_order(config: &DashboardConfig, form: &OrderForm) -> Result<(), Box<dyn Error>> {
    dashboard(config, Confirm::Assume(false))
        .submit_order(form)
        .await?;
    Ok(())
}

/// Delete a product, asking first unless `yes` is set.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn delete_product(
    config: &DashboardConfig,
    id: &str,
    yes: bool,
) -> Result<(), Box<dyn Error>> {
    let confirm = if yes { Confirm::Assume(true) } else { Confirm::Ask };
    dashboard(config, confirm)
        .delete_product(&ProductId::new(id))
        .await?;
    Ok(())
}

/// # Errors
///
/// Returns an error if the request fails.
pub async fn complete_order(config: &DashboardConfig, id: &str) -> Result<(), Box<dyn Error>> {
    dashboard(config, Confirm::Assume(false))
        .update_order_status(&OrderId::new(id), OrderStatus::Completed)
        .await?;
    Ok(())
}
