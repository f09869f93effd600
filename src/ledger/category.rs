use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ReasonCode;

/// Closed set of spending categories an expense may be filed under.
///
/// Parsing is an exact, case-sensitive match on the category name; anything
/// else is rejected rather than mapped to [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Healthcare,
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ReasonCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or(ReasonCode::UnknownCategory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_name() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn rejects_near_misses_instead_of_coercing() {
        for raw in ["", "food", "FOOD", " Food", "Food ", "Groceries"] {
            assert_eq!(
                raw.parse::<Category>(),
                Err(ReasonCode::UnknownCategory),
                "{raw:?} must not parse"
            );
        }
    }

    #[test]
    fn serializes_by_name() {
        let json = serde_json::to_string(&Category::Healthcare).unwrap();
        assert_eq!(json, "\"Healthcare\"");
        let parsed: Category = serde_json::from_str("\"Transport\"").unwrap();
        assert_eq!(parsed, Category::Transport);
    }
}
