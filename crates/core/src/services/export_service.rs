use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::expense::Expense;

/// One CSV row. Field renames are the column headers.
#[derive(Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Created At")]
    created_at: String,
}

/// Renders expenses as CSV or JSON text. Writing the text somewhere is the
/// caller's job.
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Columns: Date, Category, Amount, Description, Created At
    pub fn expenses_to_csv<'a, I>(&self, expenses: I) -> Result<String, CoreError>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let mut rows = 0usize;

        for expense in expenses {
            writer.serialize(ExpenseRow {
                date: expense.date.format("%Y-%m-%d").to_string(),
                category: expense.category.label(),
                amount: format!("{:.2}", expense.amount),
                description: &expense.description,
                created_at: expense.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            })?;
            rows += 1;
        }

        if rows == 0 {
            return Err(CoreError::ValidationError("No expenses to export".into()));
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| CoreError::Export(format!("Failed to flush CSV writer: {e}")))?;
        debug!(rows, "Exported expenses to CSV");
        String::from_utf8(bytes)
            .map_err(|e| CoreError::Export(format!("CSV is not valid UTF-8: {e}")))
    }

    pub fn expenses_to_json<'a, I>(&self, expenses: I) -> Result<String, CoreError>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let expenses: Vec<&Expense> = expenses.into_iter().collect();
        serde_json::to_string_pretty(&expenses).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize expenses to JSON: {e}"))
        })
    }

    pub fn expenses_from_json(&self, json: &str) -> Result<Vec<Expense>, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Suggested download name, e.g. `expenses_2025-01-31.csv`.
    pub fn export_file_name(&self, today: NaiveDate) -> String {
        format!("expenses_{}.csv", today.format("%Y-%m-%d"))
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
