use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::category::ExpenseCategory;
use super::currency::Currency;

/// Aggregates over a set of expenses, all denominated in one currency.
///
/// Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Currency of every amount in this summary
    pub currency: Currency,

    /// Sum of all expense amounts
    pub total_amount: f64,

    /// Number of expenses summed
    pub transaction_count: usize,

    /// total_amount / transaction_count, 0 when there are no expenses
    pub average_amount: f64,

    /// Category → sum. Categories without expenses are absent.
    pub amount_by_category: HashMap<ExpenseCategory, f64>,

    /// "YYYY-MM" → sum, keyed by expense date
    pub amount_by_month: BTreeMap<String, f64>,

    /// "YYYY-Www" (ISO week) → sum, keyed by expense date
    pub amount_by_week: BTreeMap<String, f64>,
}

/// One entry of the top-categories ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
    /// Share of the overall total (0–100), 0 when the total is 0
    pub share_pct: f64,
}

/// One point of the monthly spending trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Bucket key, "YYYY-MM"
    pub month: String,
    /// Chart label, e.g. "Jan 2025"
    pub label: String,
    pub amount: f64,
}

/// One point of the weekly comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    /// Bucket key, "YYYY-Www" (ISO week-year and week number)
    pub week: String,
    /// Chart label, e.g. "W03 2025"
    pub label: String,
    pub amount: f64,
}
