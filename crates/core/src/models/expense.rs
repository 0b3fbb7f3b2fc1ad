use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::ExpenseCategory;

/// Sort order for expense listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
    /// Category in display order
    Category,
}

/// A single recorded expense.
///
/// Amounts are stored in the ledger currency; conversion only happens
/// at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: Uuid,

    /// Project this expense belongs to
    pub project_id: Uuid,

    /// Date the money was spent (no time component)
    pub date: NaiveDate,

    pub category: ExpenseCategory,

    /// Non-negative amount in the ledger currency
    pub amount: f64,

    /// Free-text description, empty when not given
    #[serde(default)]
    pub description: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(project_id: Uuid, input: NewExpense) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            date: input.date,
            category: input.category,
            amount: input.amount,
            description: input.description.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Input for creating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

impl NewExpense {
    pub fn new(date: NaiveDate, category: ExpenseCategory, amount: f64) -> Self {
        Self {
            date,
            category,
            amount,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial update of an expense. `None` fields are left unchanged.
/// `id`, `project_id` and `created_at` can never be edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    pub date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
    pub amount: Option<f64>,
    pub description: Option<String>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.description.is_none()
    }

    /// Apply this update to a copy of `expense`.
    pub fn apply_to(&self, expense: &Expense) -> Expense {
        let mut updated = expense.clone();
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(category) = self.category {
            updated.category = category;
        }
        if let Some(amount) = self.amount {
            updated.amount = amount;
        }
        if let Some(description) = &self.description {
            updated.description = description.trim().to_string();
        }
        updated
    }
}
