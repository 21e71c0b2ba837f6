//! Palette categories.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The usage class of a palette.
///
/// The set is closed. [`Category::ALL`] is also the order in which
/// definition directories are scanned and in which lookups fall back
/// across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Ordered data progressing from low to high.
    Sequential,
    /// Data with a meaningful midpoint and two extremes.
    Diverging,
    /// Nominal data; hues carry no magnitude.
    Qualitative,
}

impl Category {
    /// All categories in scan order.
    pub const ALL: [Category; 3] = [
        Category::Sequential,
        Category::Diverging,
        Category::Qualitative,
    ];

    /// Returns the lowercase name, which is also the definition
    /// subdirectory name and the index key.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sequential => "sequential",
            Category::Diverging => "diverging",
            Category::Qualitative => "qualitative",
        }
    }

    /// Parses a category name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownCategory {
                value: value.to_string(),
            })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse(s)
    }
}
