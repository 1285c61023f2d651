//! The fixed set of ledger pages tracked by the client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date::FormatError;

/// One financial ledger type. Every line item belongs to exactly one
/// category, and the overview holds one monthly cost series per category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Funds,
    Income,
    Bills,
    Food,
    General,
    Holiday,
    Social,
}

impl Category {
    /// Every category, in tab order.
    pub const ALL: [Category; 7] = [
        Category::Funds,
        Category::Income,
        Category::Bills,
        Category::Food,
        Category::General,
        Category::Holiday,
        Category::Social,
    ];

    /// Categories summed into the monthly `out` column.
    pub const SPENDING: [Category; 5] = [
        Category::Bills,
        Category::Food,
        Category::General,
        Category::Holiday,
        Category::Social,
    ];

    /// Lumpy categories: irregular one-off spending, so future months are
    /// forecast with a single representative average rather than trended.
    pub const LUMPY: [Category; 4] = [
        Category::Food,
        Category::General,
        Category::Holiday,
        Category::Social,
    ];

    /// Lower-case name, which doubles as the wire key.
    pub fn name(self) -> &'static str {
        match self {
            Category::Funds => "funds",
            Category::Income => "income",
            Category::Bills => "bills",
            Category::Food => "food",
            Category::General => "general",
            Category::Holiday => "holiday",
            Category::Social => "social",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "funds" => Ok(Category::Funds),
            "income" => Ok(Category::Income),
            "bills" => Ok(Category::Bills),
            "food" => Ok(Category::Food),
            "general" => Ok(Category::General),
            "holiday" => Ok(Category::Holiday),
            "social" => Ok(Category::Social),
            other => Err(FormatError::UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
        assert!("overview".parse::<Category>().is_err());
    }

    #[test]
    fn spending_set_excludes_income_and_funds() {
        assert!(!Category::SPENDING.contains(&Category::Income));
        assert!(!Category::SPENDING.contains(&Category::Funds));
    }
}
