//! In-memory [`ShopApi`] double for unit tests.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use trendx_core::{
    Customer, CustomerId, DashboardSnapshot, NewCustomer, NewOrder, NewProduct, Order, OrderId,
    OrderStatus, PaymentMethod, Price, Product, ProductId,
};

use super::{ApiError, ShopApi};

#[derive(Debug, Default)]
struct FakeState {
    products: Vec<Product>,
    customers: Vec<Customer>,
    orders: Vec<Order>,
    calls: Vec<&'static str>,
    failure: Option<ApiError>,
}

/// Records every call and serves records from memory.
#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    /// Every call fails with `error`.
    pub(crate) fn failing(error: ApiError) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().failure = Some(error);
        api
    }

    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().products = products;
        api
    }

    pub(crate) fn with_orders(orders: Vec<Order>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().orders = orders;
        api
    }

    /// Number of calls made to the named method.
    pub(crate) fn calls(&self, method: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == method)
            .count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub(crate) fn products(&self) -> Vec<Product> {
        self.state.lock().unwrap().products.clone()
    }

    pub(crate) fn orders(&self) -> Vec<Order> {
        self.state.lock().unwrap().orders.clone()
    }

    fn record(&self, method: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method);
        match &state.failure {
            Some(error) => Err(error.clone()),
            None => Ok(state),
        }
    }
}

pub(crate) fn sample_product(id: &str, name: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: "T-Shirts".to_string(),
        price: Price::from_cents(1950),
        quantity: 10,
        size: "M".to_string(),
        color: String::new(),
        description: String::new(),
        created_at: Utc.with_ymd_and_hms(2025, 10, 15, 10, 5, 0).unwrap(),
    }
}

pub(crate) fn sample_customer(id: &str, name: &str) -> Customer {
    Customer {
        id: CustomerId::new(id),
        name: name.to_string(),
        phone: "+1-555-123-4567".to_string(),
        email: String::new(),
        address: String::new(),
        created_at: Utc.with_ymd_and_hms(2025, 10, 15, 10, 5, 0).unwrap(),
    }
}

pub(crate) fn sample_order(id: &str, customer: &str) -> Order {
    Order {
        id: OrderId::new(id),
        customer_name: customer.to_string(),
        items: vec!["Shirt".to_string(), "Pants".to_string()],
        total_price: Price::from_cents(4210),
        payment_method: PaymentMethod::Card,
        status: OrderStatus::Pending,
        created_at: Utc.with_ymd_and_hms(2025, 10, 15, 14, 30, 0).unwrap(),
    }
}

impl ShopApi for FakeApi {
    async fn dashboard(&self) -> Result<DashboardSnapshot, ApiError> {
        let state = self.record("dashboard")?;
        Ok(DashboardSnapshot {
            total_products: state.products.len() as u64,
            total_customers: state.customers.len() as u64,
            total_orders: state.orders.len() as u64,
            total_revenue: state.orders.iter().map(|o| o.total_price.amount()).sum(),
            inventory_value: state.products.iter().map(Product::stock_value).sum(),
        })
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.record("list_products")?.products.clone())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let mut state = self.record("create_product")?;
        let created = Product {
            id: ProductId::new(format!("p{}", state.products.len() + 1)),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            quantity: product.quantity,
            size: product.size.clone(),
            color: product.color.clone(),
            description: product.description.clone(),
            created_at: Utc::now(),
        };
        state.products.push(created.clone());
        Ok(created)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<String, ApiError> {
        let mut state = self.record("delete_product")?;
        let before = state.products.len();
        state.products.retain(|p| &p.id != id);
        if state.products.len() == before {
            return Err(ApiError::Api("Product not found".to_string()));
        }
        Ok("Product deleted".to_string())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        Ok(self.record("list_customers")?.customers.clone())
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ApiError> {
        let mut state = self.record("create_customer")?;
        let created = Customer {
            id: CustomerId::new(format!("c{}", state.customers.len() + 1)),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            address: customer.address.clone(),
            created_at: Utc::now(),
        };
        state.customers.push(created.clone());
        Ok(created)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        Ok(self.record("list_orders")?.orders.clone())
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let mut state = self.record("create_order")?;
        let created = Order {
            id: OrderId::new(format!("o{}", state.orders.len() + 1)),
            customer_name: order.customer_name.clone(),
            items: order.items.clone(),
            total_price: order.total_price,
            payment_method: order.payment_method.clone(),
            status: order.status.clone(),
            created_at: Utc::now(),
        };
        state.orders.insert(0, created.clone());
        Ok(created)
    }

    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<String, ApiError> {
        let mut state = self.record("update_order_status")?;
        let order = state
            .orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| ApiError::Api("Order not found".to_string()))?;
        order.status = status;
        Ok("Order updated".to_string())
    }
}
