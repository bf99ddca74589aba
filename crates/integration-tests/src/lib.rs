//! End-to-end tests for the Trend_X dashboard.
//!
//! [`MockBackend`] is an in-memory stand-in for the shop's REST backend. It
//! speaks the same envelope format, status codes and messages, and counts
//! the requests it serves so tests can assert on traffic.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p trendx-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

use trendx_core::types::timestamp;
use trendx_core::{
    Customer, CustomerId, Order, OrderId, OrderStatus, PaymentMethod, Price, Product, ProductId,
};

type Reply = (StatusCode, Json<Value>);

#[derive(Debug, Default)]
struct BackendState {
    products: Vec<Product>,
    customers: Vec<Customer>,
    orders: Vec<Order>,
    hits: HashMap<&'static str, usize>,
    failing: bool,
}

#[derive(Debug, Clone, Default)]
struct Shared(Arc<Mutex<BackendState>>);

impl Shared {
    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count a hit on `route` and hand out the state, or the 500 reply
    /// while failure mode is on.
    fn enter(&self, route: &'static str) -> Result<MutexGuard<'_, BackendState>, Reply> {
        let mut state = self.lock();
        *state.hits.entry(route).or_insert(0) += 1;
        debug!(route, "Mock backend hit");
        if state.failing {
            return Err(failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error"));
        }
        Ok(state)
    }
}

/// A running mock backend bound to a random local port.
///
/// The server task is aborted on drop.
#[derive(Debug)]
pub struct MockBackend {
    base_url: String,
    state: Shared,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Start a server on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    #[allow(clippy::expect_used)]
    pub async fn start() -> Self {
        let state = Shared::default();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener
            .local_addr()
            .expect("Failed to read mock backend address");

        let app = router(state.clone());
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock backend stopped");
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
            server,
        }
    }

    /// API root, e.g. `http://127.0.0.1:41234/api`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests served for `route` (e.g. `"GET /orders"`).
    #[must_use]
    pub fn hits(&self, route: &str) -> usize {
        self.state.lock().hits.get(route).copied().unwrap_or(0)
    }

    /// Requests served across all routes.
    #[must_use]
    pub fn total_hits(&self) -> usize {
        self.state.lock().hits.values().sum()
    }

    pub fn reset_hits(&self) {
        self.state.lock().hits.clear();
    }

    /// While on, every route answers 500 with a failure envelope.
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().failing = failing;
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state.lock().products.clone()
    }

    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.state.lock().orders.clone()
    }

    /// Change an order behind the dashboard's back, as another client would.
    pub fn set_order_status(&self, id: &OrderId, status: OrderStatus) {
        if let Some(order) = self.state.lock().orders.iter_mut().find(|o| &o.id == id) {
            order.status = status;
        }
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A base URL nothing listens on.
///
/// # Panics
///
/// Panics if no local port can be bound.
#[allow(clippy::expect_used)]
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    format!("http://{addr}/api")
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/{id}", delete(delete_product))
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/{id}", put(update_order))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn success(status: StatusCode, payload: Value) -> Reply {
    let mut body = match payload {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    body.insert("success".to_string(), Value::Bool(true));
    (status, Json(Value::Object(body)))
}

fn failure(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({"success": false, "error": message})))
}

fn number(value: Decimal) -> Value {
    value.to_f64().map_or(Value::Null, |n| json!(n))
}

fn product_json(product: &Product) -> Value {
    json!({
        "_id": product.id.as_str(),
        "name": product.name,
        "category": product.category,
        "price": number(product.price.amount()),
        "quantity": product.quantity,
        "size": product.size,
        "color": product.color,
        "description": product.description,
        "created_at": timestamp::format(&product.created_at),
    })
}

fn customer_json(customer: &Customer) -> Value {
    json!({
        "_id": customer.id.as_str(),
        "name": customer.name,
        "phone": customer.phone,
        "email": customer.email,
        "address": customer.address,
        "created_at": timestamp::format(&customer.created_at),
    })
}

fn order_json(order: &Order) -> Value {
    json!({
        "_id": order.id.as_str(),
        "customer_name": order.customer_name,
        "items": order.items,
        "total_price": number(order.total_price.amount()),
        "status": order.status.as_str(),
        "payment_method": order.payment_method.as_str(),
        "created_at": timestamp::format(&order.created_at),
    })
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn text(body: &Value, field: &str) -> String {
    body.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn price(body: &Value, field: &str) -> Option<Price> {
    body.get(field)
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

async fn dashboard(State(state): State<Shared>) -> Reply {
    let state = match state.enter("GET /dashboard") {
        Ok(state) => state,
        Err(reply) => return reply,
    };
    let revenue: Decimal = state.orders.iter().map(|o| o.total_price.amount()).sum();
    let inventory: Decimal = state.products.iter().map(Product::stock_value).sum();
    success(
        StatusCode::OK,
        json!({
            "total_products": state.products.len(),
            "total_customers": state.customers.len(),
            "total_orders": state.orders.len(),
            "total_revenue": number(revenue.round_dp(2)),
            "inventory_value": number(inventory.round_dp(2)),
        }),
    )
}

async fn list_products(State(state): State<Shared>) -> Reply {
    match state.enter("GET /products") {
        Ok(state) => {
            let products: Vec<Value> = state.products.iter().map(product_json).collect();
            success(StatusCode::OK, json!({ "products": products }))
        }
        Err(reply) => reply,
    }
}

async fn create_product(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut state = match state.enter("POST /products") {
        Ok(state) => state,
        Err(reply) => return reply,
    };
    let name = text(&body, "name");
    let category = text(&body, "category");
    let (false, false, Some(price)) = (name.is_empty(), category.is_empty(), price(&body, "price"))
    else {
        return failure(
            StatusCode::BAD_REQUEST,
            "Name, category, and price are required",
        );
    };

    let product = Product {
        id: ProductId::new(new_id()),
        name,
        category,
        price,
        quantity: body
            .get("quantity")
            .and_then(Value::as_u64)
            .and_then(|q| u32::try_from(q).ok())
            .unwrap_or(0),
        size: text(&body, "size"),
        color: text(&body, "color"),
        description: text(&body, "description"),
        created_at: Utc::now(),
    };
    let reply = json!({ "product": product_json(&product) });
    state.products.push(product);
    success(StatusCode::CREATED, reply)
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<String>) -> Reply {
    let mut state = match state.enter("DELETE /products") {
        Ok(state) => state,
        Err(reply) => return reply,
    };
    let before = state.products.len();
    state.products.retain(|p| p.id.as_str() != id);
    if state.products.len() == before {
        return failure(StatusCode::NOT_FOUND, "Product not found");
    }
    success(StatusCode::OK, json!({ "message": "Product deleted" }))
}

async fn list_customers(State(state): State<Shared>) -> Reply {
    match state.enter("GET /customers") {
        Ok(state) => {
            let customers: Vec<Value> = state.customers.iter().map(customer_json).collect();
            success(StatusCode::OK, json!({ "customers": customers }))
        }
        Err(reply) => reply,
    }
}

async fn create_customer(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut state = match state.enter("POST /customers") {
        Ok(state) => state,
        Err(reply) => return reply,
    };
    let name = text(&body, "name");
    let phone = text(&body, "phone");
    if name.is_empty() || phone.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Name and phone are required");
    }

    let customer = Customer {
        id: CustomerId::new(new_id()),
        name,
        phone,
        email: text(&body, "email"),
        address: text(&body, "address"),
        created_at: Utc::now(),
    };
    let reply = json!({ "customer": customer_json(&customer) });
    state.customers.push(customer);
    success(StatusCode::CREATED, reply)
}

async fn list_orders(State(state): State<Shared>) -> Reply {
    match state.enter("GET /orders") {
        Ok(state) => {
            let mut orders: Vec<&Order> = state.orders.iter().collect();
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let orders: Vec<Value> = orders.into_iter().map(order_json).collect();
            success(StatusCode::OK, json!({ "orders": orders }))
        }
        Err(reply) => reply,
    }
}

async fn create_order(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut state = match state.enter("POST /orders") {
        Ok(state) => state,
        Err(reply) => return reply,
    };
    let customer_name = text(&body, "customer_name");
    let items: Vec<String> = body
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let total = price(&body, "total_price").filter(|p| !p.amount().is_zero());
    let (false, false, Some(total_price)) = (customer_name.is_empty(), items.is_empty(), total)
    else {
        return failure(
            StatusCode::BAD_REQUEST,
            "Customer name, items, and total price are required",
        );
    };

    let order = Order {
        id: OrderId::new(new_id()),
        customer_name,
        items,
        total_price,
        payment_method: body
            .get("payment_method")
            .and_then(Value::as_str)
            .map_or(PaymentMethod::Cash, |m| PaymentMethod::from(m.to_owned())),
        status: body
            .get("status")
            .and_then(Value::as_str)
            .map_or(OrderStatus::Pending, |s| OrderStatus::from(s.to_owned())),
        created_at: Utc::now(),
    };
    let reply = json!({ "order": order_json(&order) });
    state.orders.insert(0, order);
    success(StatusCode::CREATED, reply)
}

async fn update_order(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = match state.enter("PUT /orders") {
        Ok(state) => state,
        Err(reply) => return reply,
    };
    let status = body
        .get("status")
        .and_then(Value::as_str)
        .map_or(OrderStatus::Pending, |s| OrderStatus::from(s.to_owned()));
    let Some(order) = state.orders.iter_mut().find(|o| o.id.as_str() == id) else {
        return failure(StatusCode::NOT_FOUND, "Order not found");
    };
    order.status = status;
    success(StatusCode::OK, json!({ "message": "Order updated" }))
}

async fn not_found() -> Reply {
    failure(StatusCode::NOT_FOUND, "Resource not found")
}
