use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::ExpenseCategory;

/// A spending limit for one category within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub project_id: Uuid,
    pub category: ExpenseCategory,
    /// Positive limit in the ledger currency
    pub limit_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(project_id: Uuid, category: ExpenseCategory, limit_amount: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            category,
            limit_amount,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Budget consumption state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetClassification {
    /// Below 80% of the limit
    Ok,
    /// At least 80% but below 100%
    Approaching,
    /// At or above the limit
    Exceeded,
}

impl std::fmt::Display for BudgetClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetClassification::Ok => write!(f, "ok"),
            BudgetClassification::Approaching => write!(f, "approaching"),
            BudgetClassification::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// Result of evaluating spend against a budget limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: ExpenseCategory,

    /// Amount spent in the category
    pub spent: f64,

    /// Configured limit
    pub limit: f64,

    /// spent / limit × 100, unclamped
    pub percentage_used: f64,

    /// percentage_used clamped to [0, 100], for progress bars
    pub progress_pct: f64,

    /// limit - spent; negative when over budget
    pub remaining: f64,

    pub classification: BudgetClassification,
}

impl BudgetStatus {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }

    /// Amount by which the budget is exceeded, 0 when within budget.
    pub fn overspend(&self) -> f64 {
        if self.remaining < 0.0 {
            self.remaining.abs()
        } else {
            0.0
        }
    }
}
