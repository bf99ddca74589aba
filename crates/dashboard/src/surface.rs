//! The UI host the dashboard renders into.
//!
//! A [`Surface`] plays the role of the page: it shows one section at a time,
//! holds the rendered list fragments and counters, and can block on
//! alert/confirm prompts.

use std::collections::HashMap;
use std::fmt;

use crate::forms::FormKind;
use crate::section::Section;

/// Element whose whole content is replaced by a rendered list fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    ProductsList,
    CustomersList,
    OrdersList,
}

impl Target {
    /// Element id of the list container.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::ProductsList => "productsList",
            Self::CustomersList => "customersList",
            Self::OrdersList => "ordersList",
        }
    }
}

/// Dashboard counter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Products,
    Customers,
    Orders,
    Revenue,
    InventoryValue,
}

impl Counter {
    /// Element id of the counter.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Products => "productCount",
            Self::Customers => "customerCount",
            Self::Orders => "orderCount",
            Self::Revenue => "totalRevenue",
            Self::InventoryValue => "inventoryValue",
        }
    }
}

/// Backend connectivity indicator, driven by the dashboard load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Error,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => f.write_str("🟢 Connected"),
            Self::Error => f.write_str("🔴 Error"),
        }
    }
}

/// Page operations the dashboard controller needs.
pub trait Surface {
    /// Make `section` the only visible section.
    fn show_section(&mut self, section: Section);

    /// Replace the whole content of `target`.
    fn replace(&mut self, target: Target, html: &str);

    /// Set the text of a dashboard counter.
    fn set_counter(&mut self, counter: Counter, text: &str);

    /// Update the connection indicator.
    fn set_status(&mut self, status: ConnectionStatus);

    /// Show a blocking message.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question; `true` means proceed.
    fn confirm(&mut self, message: &str) -> bool;

    /// Clear the inputs of a creation form.
    fn reset_form(&mut self, form: FormKind);
}

/// A surface that keeps everything in memory.
///
/// Used for headless runs and tests. `confirm` answers with
/// [`confirm_answer`](Self::confirm_answer).
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub visible: Option<Section>,
    pub fragments: HashMap<Target, String>,
    pub counters: HashMap<Counter, String>,
    pub status: Option<ConnectionStatus>,
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
    pub confirm_answer: bool,
    pub resets: Vec<FormKind>,
    /// Number of `replace` calls per target.
    pub renders: HashMap<Target, usize>,
}

impl MemorySurface {
    /// A surface that accepts every confirmation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            confirm_answer: true,
            ..Self::default()
        }
    }

    /// Current content of `target`, empty if never rendered.
    #[must_use]
    pub fn fragment(&self, target: Target) -> &str {
        self.fragments.get(&target).map_or("", String::as_str)
    }

    /// Current text of `counter`, empty if never set.
    #[must_use]
    pub fn counter(&self, counter: Counter) -> &str {
        self.counters.get(&counter).map_or("", String::as_str)
    }

    /// Most recent alert.
    #[must_use]
    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    /// How many times `target` was replaced.
    #[must_use]
    pub fn render_count(&self, target: Target) -> usize {
        self.renders.get(&target).copied().unwrap_or(0)
    }
}

impl Surface for MemorySurface {
    fn show_section(&mut self, section: Section) {
        self.visible = Some(section);
    }

    fn replace(&mut self, target: Target, html: &str) {
        self.fragments.insert(target, html.to_string());
        *self.renders.entry(target).or_insert(0) += 1;
    }

    fn set_counter(&mut self, counter: Counter, text: &str) {
        self.counters.insert(counter, text.to_string());
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.status = Some(status);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.confirm_answer
    }

    fn reset_form(&mut self, form: FormKind) {
        self.resets.push(form);
    }
}
