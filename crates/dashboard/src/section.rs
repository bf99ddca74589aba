//! Top-level dashboard sections.

use std::fmt;
use std::str::FromStr;

/// One of the four mutually exclusive views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    /// Store-wide counters. Visible after start-up.
    #[default]
    Dashboard,
    Products,
    Customers,
    Orders,
}

impl Section {
    /// All sections, in navigation order.
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Products, Self::Customers, Self::Orders];

    /// Element id of the section.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Orders => "orders",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "products" => Ok(Self::Products),
            "customers" => Ok(Self::Customers),
            "orders" => Ok(Self::Orders),
            _ => Err(format!("unknown section: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_id() {
        for section in Section::ALL {
            assert_eq!(section.id().parse::<Section>().unwrap(), section);
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case() {
        assert_eq!(" Orders ".parse::<Section>().unwrap(), Section::Orders);
        assert!("settings".parse::<Section>().is_err());
    }
}
