//! Creation forms and their client-side validation.
//!
//! Form structs hold the raw input strings exactly as entered. `validate`
//! trims them, checks the required set, parses numbers and builds the
//! request body. A failed validation never reaches the network.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use trendx_core::{NewCustomer, NewOrder, NewProduct, OrderStatus, PaymentMethod, Price};

/// Validation failures shown to the user as a blocking prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field is empty after trimming.
    #[error("Please fill in all required fields")]
    MissingRequired,

    /// A numeric field did not parse or is negative.
    #[error("{field} must be a non-negative number")]
    InvalidNumber {
        /// Display name of the field.
        field: &'static str,
    },
}

/// Which creation form an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Product,
    Customer,
    Order,
}

impl FormKind {
    /// Element id of the form.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Product => "addProductForm",
            Self::Customer => "addCustomerForm",
            Self::Order => "addOrderForm",
        }
    }
}

/// A submitted form with its raw values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Product(ProductForm),
    Customer(CustomerForm),
    Order(OrderForm),
}

/// Raw input of the "add product" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub size: String,
    pub color: String,
    pub description: String,
}

impl ProductForm {
    /// Build the `POST /products` body.
    ///
    /// # Errors
    ///
    /// [`FormError::MissingRequired`] if name, category, price or quantity
    /// is blank; [`FormError::InvalidNumber`] if price or quantity is not a
    /// non-negative number.
    pub fn validate(&self) -> Result<NewProduct, FormError> {
        let name = required(&self.name)?;
        let category = required(&self.category)?;
        let price = required(&self.price)?;
        let quantity = required(&self.quantity)?;

        Ok(NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            price: parse_price(price, "Price")?,
            quantity: u32::from_str(quantity)
                .map_err(|_| FormError::InvalidNumber { field: "Quantity" })?,
            size: self.size.trim().to_string(),
            color: self.color.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// Raw input of the "add customer" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl CustomerForm {
    /// Build the `POST /customers` body.
    ///
    /// # Errors
    ///
    /// [`FormError::MissingRequired`] if name or phone is blank.
    pub fn validate(&self) -> Result<NewCustomer, FormError> {
        Ok(NewCustomer {
            name: required(&self.name)?.to_string(),
            phone: required(&self.phone)?.to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

/// Raw input of the "create order" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub customer_name: String,
    /// One item per line.
    pub items: String,
    pub total_price: String,
    pub payment_method: PaymentMethod,
}

impl OrderForm {
    /// Build the `POST /orders` body. New orders start out `Pending`.
    ///
    /// # Errors
    ///
    /// [`FormError::MissingRequired`] if the customer, the items or the
    /// total is blank; [`FormError::InvalidNumber`] for a bad total.
    pub fn validate(&self) -> Result<NewOrder, FormError> {
        let customer_name = required(&self.customer_name)?;
        let items = split_items(&self.items);
        if items.is_empty() {
            return Err(FormError::MissingRequired);
        }
        let total_price = parse_price(required(&self.total_price)?, "Total price")?;

        Ok(NewOrder {
            customer_name: customer_name.to_string(),
            items,
            total_price,
            payment_method: self.payment_method.clone(),
            status: OrderStatus::Pending,
        })
    }
}

/// Split a multi-line items field into one trimmed item per non-blank line.
#[must_use]
pub fn split_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn required(value: &str) -> Result<&str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingRequired)
    } else {
        Ok(trimmed)
    }
}

fn parse_price(value: &str, field: &'static str) -> Result<Price, FormError> {
    Decimal::from_str(value)
        .ok()
        .and_then(|amount| Price::new(amount).ok())
        .ok_or(FormError::InvalidNumber { field })
}
