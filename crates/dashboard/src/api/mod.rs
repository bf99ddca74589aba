//! Shop REST API access.
//!
//! [`ShopApi`] is the seam the dashboard controller depends on;
//! [`ApiClient`] implements it over HTTP.

mod client;
mod envelope;
mod error;

#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;

use trendx_core::{
    Customer, DashboardSnapshot, NewCustomer, NewOrder, NewProduct, Order, OrderId, OrderStatus,
    Product, ProductId,
};

pub use client::ApiClient;
pub use envelope::Envelope;
pub use error::ApiError;

/// Operations offered by the shop backend.
///
/// One method per endpoint. Every call is a single attempt: no timeout, no
/// retry. Mutations return the backend's confirmation or created record.
pub trait ShopApi {
    /// `GET /dashboard`
    fn dashboard(&self) -> impl Future<Output = Result<DashboardSnapshot, ApiError>> + Send;

    /// `GET /products`
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// `POST /products`
    fn create_product(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// `DELETE /products/{id}`
    fn delete_product(&self, id: &ProductId)
    -> impl Future<Output = Result<String, ApiError>> + Send;

    /// `GET /customers`
    fn list_customers(&self) -> impl Future<Output = Result<Vec<Customer>, ApiError>> + Send;

    /// `POST /customers`
    fn create_customer(
        &self,
        customer: &NewCustomer,
    ) -> impl Future<Output = Result<Customer, ApiError>> + Send;

    /// `GET /orders`
    fn list_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    /// `POST /orders`
    fn create_order(&self, order: &NewOrder)
    -> impl Future<Output = Result<Order, ApiError>> + Send;

    /// `PUT /orders/{id}`
    fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;
}
