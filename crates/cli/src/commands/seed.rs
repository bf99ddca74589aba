//! Fill the backend with random sample records.
//!
//! Records are created through the public API one by one, so the backend
//! assigns ids and creation times itself.

use std::error::Error;
use std::io::Write;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::info;

use trendx_core::{NewCustomer, NewOrder, NewProduct, OrderStatus, PaymentMethod, Price, Product};
use trendx_dashboard::{ApiClient, DashboardConfig, ShopApi};

const CATEGORIES: [&str; 6] = ["T-Shirts", "Jeans", "Dresses", "Jackets", "Hoodies", "Accessories"];
const SIZES: [&str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];
const COLORS: [&str; 10] = [
    "Black", "White", "Blue", "Red", "Green", "Yellow", "Purple", "Pink", "Gray", "Navy",
];
const FIRST_NAMES: [&str; 30] = [
    "John", "Emma", "Michael", "Sarah", "James", "Jessica", "David", "Laura", "Robert", "Maria",
    "William", "Lisa", "Richard", "Karen", "Joseph", "Nancy", "Thomas", "Betty", "Charles",
    "Sandra", "Christopher", "Ashley", "Daniel", "Katherine", "Matthew", "Brenda", "Mark",
    "Donna", "Donald", "Carol",
];
const LAST_NAMES: [&str; 20] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];
const CITIES: [&str; 10] = [
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia", "San Antonio",
    "San Diego", "Dallas", "San Jose",
];
const STATUSES: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Completed,
    OrderStatus::Shipped,
];

fn product_names(category: &str) -> &'static [&'static str] {
    match category {
        "T-Shirts" => &[
            "Classic Cotton Tee", "Premium Blend T-Shirt", "Graphic Print Tee", "V-Neck T-Shirt",
            "Pocket T-Shirt", "Striped T-Shirt", "Oversized Tee", "Fitted T-Shirt",
            "Long Sleeve Tee", "Athletic T-Shirt",
        ],
        "Jeans" => &[
            "Classic Blue Jeans", "Slim Fit Denim", "Skinny Jeans", "Bootcut Jeans",
            "Straight Leg Jeans", "Distressed Jeans", "Black Jeans", "White Denim",
            "Ripped Jeans", "Flare Jeans",
        ],
        "Dresses" => &[
            "Summer Dress", "Cocktail Dress", "Evening Gown", "Casual Day Dress", "Party Dress",
            "Maxi Dress", "Mini Dress", "Midi Dress", "Bodycon Dress", "Sundress",
        ],
        "Jackets" => &[
            "Leather Jacket", "Denim Jacket", "Bomber Jacket", "Sports Jacket", "Winter Coat",
            "Blazer", "Rain Jacket", "Wool Jacket", "Suede Jacket", "Puffer Jacket",
        ],
        "Hoodies" => &[
            "Classic Hoodie", "Zip Hoodie", "Pullover Hoodie", "Oversized Hoodie",
            "Sports Hoodie", "Fleece Hoodie", "Lightweight Hoodie", "Graphic Hoodie",
            "Solid Hoodie", "Tech Hoodie",
        ],
        _ => &[
            "Baseball Cap", "Beanie", "Scarf", "Belt", "Sunglasses", "Watch", "Backpack", "Socks",
            "Gloves", "Hat",
        ],
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Random product; `index` is 0-based and numbers the name.
fn random_product<R: Rng + ?Sized>(rng: &mut R, index: usize) -> NewProduct {
    let category = pick(rng, &CATEGORIES);
    let name = pick(rng, product_names(category));
    NewProduct {
        name: format!("{name} #{}", index + 1),
        category: category.to_string(),
        price: Price::from_cents(rng.random_range(1_500..=15_000)),
        quantity: rng.random_range(5..=50),
        size: pick(rng, &SIZES).to_string(),
        color: pick(rng, &COLORS).to_string(),
        description: format!(
            "High-quality {} item perfect for everyday wear.",
            category.to_lowercase()
        ),
    }
}

/// Random customer; `index` keeps email addresses unique.
fn random_customer<R: Rng + ?Sized>(rng: &mut R, index: usize) -> NewCustomer {
    let first = pick(rng, &FIRST_NAMES);
    let last = pick(rng, &LAST_NAMES);
    NewCustomer {
        name: format!("{first} {last}"),
        phone: format!(
            "+1-555-{}-{}",
            rng.random_range(100..=999),
            rng.random_range(1000..=9999)
        ),
        email: format!(
            "{}.{}{index}@email.com",
            first.to_lowercase(),
            last.to_lowercase()
        ),
        address: format!(
            "{} Main St, {}",
            rng.random_range(1..=999),
            pick(rng, &CITIES)
        ),
    }
}

/// Random order of 1-5 lines drawn from `products`, billed for `customer`.
///
/// Returns `None` when there is nothing to order.
fn random_order<R: Rng + ?Sized>(
    rng: &mut R,
    products: &[Product],
    customer: &str,
) -> Option<NewOrder> {
    let lines = rng.random_range(1..=5);
    let mut items = Vec::with_capacity(lines);
    let mut total = Decimal::ZERO;
    for _ in 0..lines {
        let product = products.choose(rng)?;
        let quantity: u32 = rng.random_range(1..=3);
        let line_total = product.price.amount() * Decimal::from(quantity);
        items.push(format!(
            "{} (Qty: {quantity}, ${line_total:.2})",
            product.name
        ));
        total += line_total;
    }

    Some(NewOrder {
        customer_name: customer.to_string(),
        items,
        total_price: Price::new(total.round_dp(2)).ok()?,
        payment_method: PaymentMethod::ALL.choose(rng)?.clone(),
        status: STATUSES.choose(rng)?.clone(),
    })
}

/// Create `products` products, `customers` customers and `orders` orders.
///
/// Orders reference the products and customers created in the same run.
///
/// # Errors
///
/// Returns the first API error; records created before it are kept.
pub async fn run(
    config: &DashboardConfig,
    products: usize,
    customers: usize,
    orders: usize,
) -> Result<(), Box<dyn Error>> {
    let api = ApiClient::new(config.api_base.clone());
    let mut rng = StdRng::from_rng(&mut rand::rng());

    info!(count = products, "Creating products");
    let mut created_products = Vec::with_capacity(products);
    for index in 0..products {
        let body = random_product(&mut rng, index);
        created_products.push(api.create_product(&body).await?);
    }

    info!(count = customers, "Creating customers");
    let mut customer_names = Vec::with_capacity(customers);
    for index in 0..customers {
        let body = random_customer(&mut rng, index);
        customer_names.push(api.create_customer(&body).await?.name);
    }

    info!(count = orders, "Creating orders");
    let mut created_orders = 0_usize;
    for _ in 0..orders {
        let Some(customer) = customer_names.choose(&mut rng) else {
            break;
        };
        let Some(body) = random_order(&mut rng, &created_products, customer) else {
            break;
        };
        api.create_order(&body).await?;
        created_orders += 1;
    }

    let stats = api.dashboard().await?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "Added {} products", created_products.len())?;
    writeln!(out, "Added {} customers", customer_names.len())?;
    writeln!(out, "Added {created_orders} orders")?;
    writeln!(out, "Total Revenue:   ${:.2}", stats.total_revenue)?;
    writeln!(out, "Inventory Value: ${:.2}", stats.inventory_value)?;
    Ok(())
}
