use chrono::Utc;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::expense::{Expense, ExpenseUpdate};
use crate::models::ledger::Ledger;

/// Manages expense records inside a ledger.
///
/// Keeps `ledger.expenses` ordered newest first (by date, then creation time).
/// Pure business logic — no I/O. Easy to test.
pub struct ExpenseService;

impl ExpenseService {
    pub fn new() -> Self {
        Self
    }

    /// Add a validated expense at its sorted position.
    pub fn add_expense(&self, ledger: &mut Ledger, expense: Expense) -> Result<(), CoreError> {
        if ledger.project(expense.project_id).is_none() {
            return Err(CoreError::ProjectNotFound(expense.project_id.to_string()));
        }
        if ledger.expenses.iter().any(|e| e.id == expense.id) {
            return Err(CoreError::ValidationError(format!(
                "Expense {} already exists",
                expense.id
            )));
        }
        self.validate_expense(&expense)?;
        Self::sorted_insert(&mut ledger.expenses, expense);
        Ok(())
    }

    /// Remove an expense by its UUID, returning it.
    pub fn remove_expense(
        &self,
        ledger: &mut Ledger,
        expense_id: Uuid,
    ) -> Result<Expense, CoreError> {
        let idx = ledger
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| CoreError::ExpenseNotFound(expense_id.to_string()))?;
        Ok(ledger.expenses.remove(idx))
    }

    /// Apply a partial update. Validates the new state before committing;
    /// on failure the ledger is left untouched.
    pub fn update_expense(
        &self,
        ledger: &mut Ledger,
        expense_id: Uuid,
        update: &ExpenseUpdate,
    ) -> Result<(), CoreError> {
        let idx = ledger
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| CoreError::ExpenseNotFound(expense_id.to_string()))?;

        let updated = update.apply_to(&ledger.expenses[idx]);
        self.validate_expense(&updated)?;

        // Date may have changed: re-insert at the right position
        ledger.expenses.remove(idx);
        Self::sorted_insert(&mut ledger.expenses, updated);
        Ok(())
    }

    /// Rules:
    /// - Amount must be a finite, non-negative number
    /// - Date can't be more than one day in the future (timezone tolerance)
    pub fn validate_expense(&self, expense: &Expense) -> Result<(), CoreError> {
        Self::validate_amount(expense.amount)?;

        let today = Utc::now().date_naive();
        if let Some(tomorrow) = today.succ_opt() {
            if expense.date > tomorrow {
                return Err(CoreError::ValidationError(format!(
                    "Expense date {} is in the future",
                    expense.date
                )));
            }
        }

        Ok(())
    }

    /// Amount must be a finite, non-negative number.
    pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Expense amount must be a non-negative number, got {amount}"
            )));
        }
        Ok(())
    }

    /// Insert keeping newest-first order; O(log n) search.
    fn sorted_insert(expenses: &mut Vec<Expense>, expense: Expense) {
        let key = (expense.date, expense.created_at);
        let pos = expenses.partition_point(|e| (e.date, e.created_at) > key);
        expenses.insert(pos, expense);
    }
}

impl Default for ExpenseService {
    fn default() -> Self {
        Self::new()
    }
}
