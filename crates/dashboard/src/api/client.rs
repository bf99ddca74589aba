//! Shop REST API client.
//!
//! Sends one request per call and decodes the `{success, ...}` envelope.
//! The body is decoded whatever the HTTP status, since the backend reports
//! application errors with 4xx/5xx codes and an envelope.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

use trendx_core::{
    Customer, DashboardSnapshot, NewCustomer, NewOrder, NewProduct, Order, OrderId, OrderStatus,
    Product, ProductId, StatusUpdate,
};

use super::ShopApi;
use super::envelope::Envelope;
use super::error::ApiError;

/// HTTP client for the shop backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client.
    client: Client,
    /// API root without trailing slash.
    base_url: String,
}

impl ApiClient {
    /// Create a new client rooted at `base_url` (e.g. `http://host:5000/api`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and return its decoded envelope.
    async fn send(&self, request: RequestBuilder) -> Result<Envelope, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Envelope::parse(&body).inspect_err(|e| {
            error!(status = %status, error = %e, "Backend returned a non-envelope body");
        })
    }

    async fn fetch_field<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        field: &str,
    ) -> Result<T, ApiError> {
        let result = self
            .send(request)
            .await
            .and_then(|envelope| envelope.into_field(field));
        log_outcome(field, &result);
        result
    }

    async fn fetch_records<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        field: &str,
    ) -> Result<Vec<T>, ApiError> {
        let result = self
            .send(request)
            .await
            .and_then(|envelope| envelope.into_records(field));
        log_outcome(field, &result);
        result
    }
}

/// Log a decoded call result: application errors at `warn`, transport
/// errors at `error`.
fn log_outcome<T>(what: &str, result: &Result<T, ApiError>) {
    match result {
        Ok(_) => debug!(payload = what, "Backend call succeeded"),
        Err(e @ ApiError::Api(_)) => warn!(payload = what, error = %e, "Backend reported an error"),
        Err(e) => error!(payload = what, error = %e, "Backend call failed"),
    }
}

impl ShopApi for ApiClient {
    #[instrument(skip(self))]
    async fn dashboard(&self) -> Result<DashboardSnapshot, ApiError> {
        let request = self.client.get(self.url("/dashboard"));
        let result = self
            .send(request)
            .await
            .and_then(Envelope::into_payload);
        log_outcome("dashboard", &result);
        result
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.fetch_records(self.client.get(self.url("/products")), "products")
            .await
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let request = self.client.post(self.url("/products")).json(product);
        self.fetch_field(request, "product").await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_product(&self, id: &ProductId) -> Result<String, ApiError> {
        let request = self.client.delete(self.url(&format!("/products/{id}")));
        self.fetch_field(request, "message").await
    }

    #[instrument(skip(self))]
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.fetch_records(self.client.get(self.url("/customers")), "customers")
            .await
    }

    #[instrument(skip(self, customer), fields(name = %customer.name))]
    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ApiError> {
        let request = self.client.post(self.url("/customers")).json(customer);
        self.fetch_field(request, "customer").await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.fetch_records(self.client.get(self.url("/orders")), "orders")
            .await
    }

    #[instrument(skip(self, order), fields(customer = %order.customer_name, items = order.items.len()))]
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let request = self.client.post(self.url("/orders")).json(order);
        self.fetch_field(request, "order").await
    }

    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<String, ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/orders/{id}")))
            .json(&StatusUpdate { status });
        self.fetch_field(request, "message").await
    }
}
