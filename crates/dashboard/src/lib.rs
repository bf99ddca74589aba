//! Trend_X dashboard library.
//!
//! Keeps the dashboard views in sync with the shop backend: fetches records
//! over the REST API, renders them into HTML fragments, and pushes the
//! fragments to a [`Surface`](surface::Surface), either on user request or
//! from the periodic poller.
//!
//! # Flow
//!
//! ```text
//! UiEvent --> Dashboard --> ShopApi --> render --> Surface
//!    ^            |
//!    +-- poll ----+
//! ```
//!
//! The UI host itself (a browser page, a terminal) is abstracted behind
//! [`Surface`](surface::Surface).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod controller;
pub mod forms;
pub mod poller;
pub mod render;
pub mod section;
pub mod surface;

pub use api::{ApiClient, ApiError, ShopApi};
pub use config::{ConfigError, DashboardConfig};
pub use controller::{Dashboard, DashboardError};
pub use forms::{CustomerForm, FormError, FormKind, FormSubmission, OrderForm, ProductForm};
pub use poller::UiEvent;
pub use render::{Action, Control, Fragment, RenderError};
pub use section::Section;
pub use surface::{ConnectionStatus, Counter, MemorySurface, Surface, Target};
