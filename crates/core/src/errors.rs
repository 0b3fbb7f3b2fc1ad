use thiserror::Error;

/// Unified error type for the entire expense-tracker-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Reference data / Configuration ──────────────────────────────
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown expense category: {0}")]
    UnknownCategory(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid budget limit {0}: limit must be a positive amount")]
    InvalidBudgetLimit(f64),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("Budget not found: {0}")]
    BudgetNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    // ── Serialization / Export ──────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Export failed: {0}")]
    Export(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Export(e.to_string())
    }
}
