use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::budget::{Budget, BudgetClassification, BudgetStatus};
use crate::models::category::ExpenseCategory;
use crate::models::ledger::Ledger;
use crate::models::settings::Settings;

/// Percentage of the limit at which a budget counts as approaching.
pub const APPROACHING_THRESHOLD_PCT: f64 = 80.0;

/// Percentage of the limit at which a budget counts as exceeded.
pub const EXCEEDED_THRESHOLD_PCT: f64 = 100.0;

/// Compares category spend against budget limits.
///
/// Stateless: statuses are recomputed from current aggregates on every call.
/// Each budget is evaluated on its own; there is no cross-category rollup.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Create or update the budget for `category` in a project.
    /// A project holds at most one budget per category; setting it again
    /// replaces the limit.
    pub fn set_budget(
        &self,
        ledger: &mut Ledger,
        project_id: Uuid,
        category: ExpenseCategory,
        limit_amount: f64,
    ) -> Result<Budget, CoreError> {
        if !limit_amount.is_finite() || limit_amount <= 0.0 {
            return Err(CoreError::InvalidBudgetLimit(limit_amount));
        }
        if ledger.project(project_id).is_none() {
            return Err(CoreError::ProjectNotFound(project_id.to_string()));
        }

        if let Some(existing) = ledger
            .budgets
            .iter_mut()
            .find(|b| b.project_id == project_id && b.category == category)
        {
            existing.limit_amount = limit_amount;
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }

        let budget = Budget::new(project_id, category, limit_amount);
        ledger.budgets.push(budget.clone());
        Ok(budget)
    }

    /// Remove the budget for `category` in a project.
    /// Returns `false` if there was none.
    pub fn delete_budget(
        &self,
        ledger: &mut Ledger,
        project_id: Uuid,
        category: ExpenseCategory,
    ) -> bool {
        let before = ledger.budgets.len();
        ledger
            .budgets
            .retain(|b| !(b.project_id == project_id && b.category == category));
        ledger.budgets.len() != before
    }

    /// Evaluate spend against a single limit.
    ///
    /// The limit must be a positive finite number. A zero or negative limit
    /// is a configuration error and is rejected instead of dividing by zero.
    pub fn evaluate(
        &self,
        category: ExpenseCategory,
        spent: f64,
        limit: f64,
    ) -> Result<BudgetStatus, CoreError> {
        if !limit.is_finite() || limit <= 0.0 {
            warn!(%category, limit, "Rejected budget with non-positive limit");
            return Err(CoreError::InvalidBudgetLimit(limit));
        }
        if !spent.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Spent amount for {category} must be finite, got {spent}"
            )));
        }

        let percentage_used = spent / limit * 100.0;
        let classification = classify(percentage_used);

        Ok(BudgetStatus {
            category,
            spent,
            limit,
            percentage_used,
            progress_pct: percentage_used.clamp(0.0, 100.0),
            remaining: limit - spent,
            classification,
        })
    }

    /// Evaluate every budget against per-category spend, in the given order.
    /// Categories with no spend count as 0.
    pub fn evaluate_all<'a, I>(
        &self,
        budgets: I,
        spent_by_category: &HashMap<ExpenseCategory, f64>,
    ) -> Result<Vec<BudgetStatus>, CoreError>
    where
        I: IntoIterator<Item = &'a Budget>,
    {
        let statuses = budgets
            .into_iter()
            .map(|budget| {
                let spent = spent_by_category.get(&budget.category).copied().unwrap_or(0.0);
                self.evaluate(budget.category, spent, budget.limit_amount)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            budgets = statuses.len(),
            exceeded = statuses
                .iter()
                .filter(|s| s.classification == BudgetClassification::Exceeded)
                .count(),
            "Evaluated budgets"
        );
        Ok(statuses)
    }

    /// Statuses that need the user's attention (approaching or exceeded).
    pub fn alerts<'a>(&self, statuses: &'a [BudgetStatus]) -> Vec<&'a BudgetStatus> {
        statuses
            .iter()
            .filter(|s| s.classification != BudgetClassification::Ok)
            .collect()
    }

    /// Statuses whose limit has been reached or passed.
    pub fn exceeded<'a>(&self, statuses: &'a [BudgetStatus]) -> Vec<&'a BudgetStatus> {
        statuses
            .iter()
            .filter(|s| s.classification == BudgetClassification::Exceeded)
            .collect()
    }

    /// Whether the daily "log your expenses" reminder should be shown:
    /// reminders are enabled and nothing has been logged for `today`.
    pub fn needs_daily_reminder(
        &self,
        settings: &Settings,
        last_expense_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> bool {
        settings.daily_reminder_enabled && last_expense_date != Some(today)
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(percentage_used: f64) -> BudgetClassification {
    if percentage_used >= EXCEEDED_THRESHOLD_PCT {
        BudgetClassification::Exceeded
    } else if percentage_used >= APPROACHING_THRESHOLD_PCT {
        BudgetClassification::Approaching
    } else {
        BudgetClassification::Ok
    }
}
