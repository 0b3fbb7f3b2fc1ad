use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The fixed set of expense categories.
///
/// Display metadata (label, emoji, chart color) lives in [`CATEGORY_INFO`]
/// and is looked up with [`ExpenseCategory::info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Entertainment,
    Utilities,
    Shopping,
    Healthcare,
    Education,
    Other,
}

/// Display metadata for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub category: ExpenseCategory,
    pub label: &'static str,
    pub emoji: &'static str,
    /// CSS color used by charts and progress bars
    pub color: &'static str,
}

/// Lookup table for category metadata, in display order.
pub const CATEGORY_INFO: [CategoryInfo; 8] = [
    CategoryInfo {
        category: ExpenseCategory::Food,
        label: "Food & Dining",
        emoji: "🍔",
        color: "hsl(25 95% 53%)",
    },
    CategoryInfo {
        category: ExpenseCategory::Transportation,
        label: "Transportation",
        emoji: "🚗",
        color: "hsl(210 100% 50%)",
    },
    CategoryInfo {
        category: ExpenseCategory::Entertainment,
        label: "Entertainment",
        emoji: "🎬",
        color: "hsl(280 70% 50%)",
    },
    CategoryInfo {
        category: ExpenseCategory::Utilities,
        label: "Utilities",
        emoji: "💡",
        color: "hsl(45 100% 50%)",
    },
    CategoryInfo {
        category: ExpenseCategory::Shopping,
        label: "Shopping",
        emoji: "🛍️",
        color: "hsl(340 80% 55%)",
    },
    CategoryInfo {
        category: ExpenseCategory::Healthcare,
        label: "Healthcare",
        emoji: "💊",
        color: "hsl(0 70% 50%)",
    },
    CategoryInfo {
        category: ExpenseCategory::Education,
        label: "Education",
        emoji: "📚",
        color: "hsl(200 80% 45%)",
    },
    CategoryInfo {
        category: ExpenseCategory::Other,
        label: "Other",
        emoji: "📌",
        color: "hsl(220 10% 50%)",
    },
];

impl ExpenseCategory {
    /// All categories in display order.
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Utilities,
        ExpenseCategory::Shopping,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Education,
        ExpenseCategory::Other,
    ];

    /// Stable lowercase identifier (matches the serialized form).
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transportation => "transportation",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Healthcare => "healthcare",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn info(&self) -> &'static CategoryInfo {
        // CATEGORY_INFO is indexed in declaration order
        &CATEGORY_INFO[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.info().label
    }

    /// Lenient lookup for display: unrecognized identifiers map to `Other`.
    pub fn from_str_or_other(s: &str) -> Self {
        s.parse().unwrap_or(ExpenseCategory::Other)
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ExpenseCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}
