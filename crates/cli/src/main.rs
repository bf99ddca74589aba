//! Trend_X CLI - shop dashboard in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the dashboard counters
//! trendx stats
//!
//! # Print the rendered product list
//! trendx list products
//!
//! # Create records
//! trendx add-product --name Tee --category Shirts --price 19.5 --quantity 10
//! trendx add-order --customer "Emma Smith" --items $'Shirt\nPants' --total 42.10
//!
//! # Keep the dashboard open, polling every 30s
//! trendx watch --section orders
//!
//! # Fill an empty backend with sample data
//! trendx seed
//! ```
//!
//! # Environment Variables
//!
//! - `TRENDX_API_BASE` - API root (default `http://127.0.0.1:5000/api`)
//! - `TRENDX_POLL_INTERVAL_SECS` - poll period for `watch` (default 30)
//! - `TRENDX_LOG_FORMAT` - `json` for JSON logs
//! - `RUST_LOG` - log filter

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendx_core::PaymentMethod;
use trendx_dashboard::{CustomerForm, DashboardConfig, OrderForm, ProductForm, Section};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "trendx")]
#[command(author, version, about = "Trend_X shop dashboard")]
struct Cli {
    /// API root, overrides `TRENDX_API_BASE`
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard counters
    Stats,
    /// Print a rendered record list
    List {
        #[arg(value_enum)]
        list: ListKind,
    },
    /// Add a product
    AddProduct {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quantity: String,
        #[arg(long, default_value = "")]
        size: String,
        #[arg(long, default_value = "")]
        color: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Add a customer
    AddCustomer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    /// Create an order
    AddOrder {
        /// Customer name
        #[arg(long)]
        customer: String,
        /// Items, one per line
        #[arg(long)]
        items: String,
        /// Order total
        #[arg(long)]
        total: String,
        /// Payment method (Cash, Card, Online, Check)
        #[arg(long, default_value = "Cash")]
        payment: PaymentMethod,
    },
    /// Delete a product
    DeleteProduct {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Mark an order as completed
    CompleteOrder { id: String },
    /// Keep the dashboard open and poll the active section
    Watch {
        /// Section shown after start-up
        #[arg(long, default_value = "dashboard")]
        section: Section,
    },
    /// Create random sample records through the API
    Seed {
        #[arg(long, default_value_t = 55)]
        products: usize,
        #[arg(long, default_value_t = 58)]
        customers: usize,
        #[arg(long, default_value_t = 52)]
        orders: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Products,
    Customers,
    Orders,
}

impl From<ListKind> for Section {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Products => Self::Products,
            ListKind::Customers => Self::Customers,
            ListKind::Orders => Self::Orders,
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only dashboard output.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trendx_dashboard=info,trendx_cli=info".into());

    let is_json = std::env::var("TRENDX_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(api_base) = cli.api_base.as_deref() {
        config = config.with_api_base(api_base)?;
    }

    match cli.command {
        Commands::Stats => commands::records::stats(&config).await?,
        Commands::List { list } => commands::records::list(&config, list.into()).await?,
        Commands::AddProduct {
            name,
            category,
            price,
            quantity,
            size,
            color,
            description,
        } => {
            let form = ProductForm {
                name,
                category,
                price,
                quantity,
                size,
                color,
                description,
            };
            commands::records::add_product(&config, &form).await?;
        }
        Commands::AddCustomer {
            name,
            phone,
            email,
            address,
        } => {
            let form = CustomerForm {
                name,
                phone,
                email,
                address,
            };
            commands::records::add_customer(&config, &form).await?;
        }
        Commands::AddOrder {
            customer,
            items,
            total,
            payment,
        } => {
            let form = OrderForm {
                customer_name: customer,
                items,
                total_price: total,
                payment_method: payment,
            };
            commands::records::add_order(&config, &form).await?;
        }
        Commands::DeleteProduct { id, yes } => {
            commands::records::delete_product(&config, &id, yes).await?;
        }
        Commands::CompleteOrder { id } => {
            commands::records::complete_order(&config, &id).await?;
        }
        Commands::Watch { section } => commands::watch::run(&config, section).await?,
        Commands::Seed {
            products,
            customers,
            orders,
        } => commands::seed::run(&config, products, customers, orders).await?,
    }
    Ok(())
}
