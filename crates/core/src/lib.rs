pub mod errors;
pub mod models;
pub mod services;

use chrono::{NaiveDate, NaiveTime, Utc};
use std::collections::HashSet;
use models::{
    analytics::{AggregateSummary, CategoryTotal, MonthlyPoint, WeeklyPoint},
    budget::{Budget, BudgetStatus},
    category::ExpenseCategory,
    currency::{Currency, ExchangeRates},
    expense::{Expense, ExpenseSortOrder, ExpenseUpdate, NewExpense},
    ledger::Ledger,
    project::Project,
    settings::Settings,
};
use services::{
    aggregation_service::{AggregationService, DEFAULT_TREND_MONTHS, DEFAULT_WEEK_WINDOW},
    budget_service::BudgetService,
    currency_service::CurrencyService,
    expense_service::ExpenseService,
    export_service::ExportService,
    project_service::ProjectService,
};
use tracing::info;
use uuid::Uuid;

use errors::CoreError;

/// Number of categories shown in the "top categories" breakdown.
pub const TOP_CATEGORY_COUNT: usize = 4;

/// Main entry point for the Expense Tracker core library.
/// Holds the ledger snapshot, the active project, and all services needed
/// to operate on it.
///
/// Every analytics read is recomputed from the current expenses; nothing
/// derived is cached across mutations.
#[must_use]
pub struct ExpenseTracker {
    ledger: Ledger,
    active_project: Uuid,
    expense_service: ExpenseService,
    budget_service: BudgetService,
    project_service: ProjectService,
    aggregation_service: AggregationService,
    currency_service: CurrencyService,
    export_service: ExportService,
    /// Tracks whether any mutation has occurred since the last load/snapshot.
    dirty: bool,
}

impl std::fmt::Debug for ExpenseTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseTracker")
            .field("projects", &self.ledger.projects.len())
            .field("expenses", &self.ledger.expenses.len())
            .field("budgets", &self.ledger.budgets.len())
            .field("active_project", &self.active_project)
            .field("settings", &self.ledger.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl ExpenseTracker {
    /// Create a new empty ledger with one default project, default settings
    /// and the built-in exchange-rate table.
    pub fn create_new() -> Self {
        Self::build(Ledger::default(), ExchangeRates::default())
    }

    /// Create a new empty ledger using a custom exchange-rate table.
    pub fn with_rates(rates: ExchangeRates) -> Self {
        Self::build(Ledger::default(), rates)
    }

    /// Wrap an existing ledger snapshot (e.g., fetched from the backend).
    pub fn from_ledger(ledger: Ledger, rates: ExchangeRates) -> Result<Self, CoreError> {
        Self::validate_ledger(&ledger, &rates)?;
        Ok(Self::build(ledger, rates))
    }

    /// Load a ledger snapshot from JSON, with the built-in rate table.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let ledger: Ledger = serde_json::from_str(json)?;
        Self::from_ledger(ledger, ExchangeRates::default())
    }

    /// Serialize the whole ledger snapshot to JSON.
    /// Clears the unsaved-changes flag on success.
    pub fn to_json(&mut self) -> Result<String, CoreError> {
        let json = serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;
        self.dirty = false;
        Ok(json)
    }

    /// Read-only view of the underlying snapshot.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ── Projects ────────────────────────────────────────────────────

    /// Create a project. Does not switch to it.
    pub fn create_project(
        &mut self,
        name: &str,
        description: Option<String>,
        icon: Option<String>,
    ) -> Result<Uuid, CoreError> {
        let id = self
            .project_service
            .create_project(&mut self.ledger, name, description, icon)?;
        info!(project = %id, "Created project");
        self.dirty = true;
        Ok(id)
    }

    /// Update a project's name, description (`Some(None)` clears it) or icon.
    pub fn update_project(
        &mut self,
        project_id: Uuid,
        name: Option<&str>,
        description: Option<Option<String>>,
        icon: Option<String>,
    ) -> Result<(), CoreError> {
        self.project_service
            .update_project(&mut self.ledger, project_id, name, description, icon)?;
        self.dirty = true;
        Ok(())
    }

    /// Delete a project with all its expenses and budgets.
    /// If it was active, the first remaining project becomes active.
    pub fn delete_project(&mut self, project_id: Uuid) -> Result<Project, CoreError> {
        let removed = self.project_service.delete_project(&mut self.ledger, project_id)?;
        if self.active_project == project_id {
            if let Some(first) = self.ledger.projects.first() {
                self.active_project = first.id;
            }
        }
        info!(project = %project_id, "Deleted project");
        self.dirty = true;
        Ok(removed)
    }

    /// Switch the project all expense, budget and analytics calls operate on.
    pub fn set_active_project(&mut self, project_id: Uuid) -> Result<(), CoreError> {
        if self.ledger.project(project_id).is_none() {
            return Err(CoreError::ProjectNotFound(project_id.to_string()));
        }
        self.active_project = project_id;
        Ok(())
    }

    #[must_use]
    pub fn active_project(&self) -> Option<&Project> {
        self.ledger.project(self.active_project)
    }

    #[must_use]
    pub fn active_project_id(&self) -> Uuid {
        self.active_project
    }

    #[must_use]
    pub fn get_projects(&self) -> &[Project] {
        &self.ledger.projects
    }

    // ── Expense Management ──────────────────────────────────────────

    /// Record an expense in the active project.
    pub fn add_expense(&mut self, input: NewExpense) -> Result<Uuid, CoreError> {
        let expense = Expense::new(self.active_project, input);
        let id = expense.id;
        self.expense_service.add_expense(&mut self.ledger, expense)?;
        info!(expense = %id, "Added expense");
        self.dirty = true;
        Ok(id)
    }

    /// Edit an expense. Only date, category, amount and description change.
    pub fn update_expense(
        &mut self,
        expense_id: Uuid,
        update: ExpenseUpdate,
    ) -> Result<(), CoreError> {
        if update.is_empty() {
            return Ok(());
        }
        self.expense_service
            .update_expense(&mut self.ledger, expense_id, &update)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_expense(&mut self, expense_id: Uuid) -> Result<Expense, CoreError> {
        let removed = self.expense_service.remove_expense(&mut self.ledger, expense_id)?;
        info!(expense = %expense_id, "Removed expense");
        self.dirty = true;
        Ok(removed)
    }

    /// Add several expenses to the active project. If any fails validation,
    /// none are added (all-or-nothing). Returns the IDs in input order.
    pub fn add_expenses(&mut self, inputs: Vec<NewExpense>) -> Result<Vec<Uuid>, CoreError> {
        let mut temp_ledger = self.ledger.clone();
        let mut ids = Vec::with_capacity(inputs.len());

        for input in inputs {
            let expense = Expense::new(self.active_project, input);
            ids.push(expense.id);
            self.expense_service.add_expense(&mut temp_ledger, expense)?;
        }

        self.ledger = temp_ledger;
        self.dirty = true;
        Ok(ids)
    }

    #[must_use]
    pub fn get_expense(&self, expense_id: Uuid) -> Option<&Expense> {
        self.ledger.expenses.iter().find(|e| e.id == expense_id)
    }

    /// Expenses of the active project, newest first.
    #[must_use]
    pub fn get_expenses(&self) -> Vec<&Expense> {
        self.ledger.expenses_for(self.active_project).collect()
    }

    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.ledger.expenses_for(self.active_project).count()
    }

    /// Expenses of one category, newest first.
    #[must_use]
    pub fn get_expenses_for_category(&self, category: ExpenseCategory) -> Vec<&Expense> {
        self.ledger
            .expenses_for(self.active_project)
            .filter(|e| e.category == category)
            .collect()
    }

    /// Expenses dated within `from..=to`, newest first.
    #[must_use]
    pub fn get_expenses_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Expense> {
        self.ledger
            .expenses_for(self.active_project)
            .filter(|e| e.date >= from && e.date <= to)
            .collect()
    }

    /// Case-insensitive search over description, category id and category label.
    #[must_use]
    pub fn search_expenses(&self, query: &str) -> Vec<&Expense> {
        let q = query.trim().to_lowercase();
        self.ledger
            .expenses_for(self.active_project)
            .filter(|e| {
                e.description.to_lowercase().contains(&q)
                    || e.category.as_str().contains(&q)
                    || e.category.label().to_lowercase().contains(&q)
            })
            .collect()
    }

    #[must_use]
    pub fn get_expenses_sorted(&self, order: ExpenseSortOrder) -> Vec<&Expense> {
        let mut expenses = self.get_expenses();
        match order {
            ExpenseSortOrder::DateDesc => {}
            ExpenseSortOrder::DateAsc => expenses.reverse(),
            ExpenseSortOrder::AmountDesc => expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
            ExpenseSortOrder::AmountAsc => expenses.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
            ExpenseSortOrder::Category => expenses.sort_by_key(|e| e.category),
        }
        expenses
    }

    /// Date of the most recent expense in the active project.
    #[must_use]
    pub fn last_expense_date(&self) -> Option<NaiveDate> {
        self.ledger.expenses_for(self.active_project).map(|e| e.date).max()
    }

    // ── Budgets ─────────────────────────────────────────────────────

    /// Set (create or replace) the limit for a category in the active project.
    pub fn set_budget(
        &mut self,
        category: ExpenseCategory,
        limit_amount: f64,
    ) -> Result<Budget, CoreError> {
        let budget = self.budget_service.set_budget(
            &mut self.ledger,
            self.active_project,
            category,
            limit_amount,
        )?;
        info!(%category, limit_amount, "Set budget");
        self.dirty = true;
        Ok(budget)
    }

    /// Remove the limit for a category. Returns `false` if none was set.
    pub fn delete_budget(&mut self, category: ExpenseCategory) -> bool {
        let removed = self
            .budget_service
            .delete_budget(&mut self.ledger, self.active_project, category);
        if removed {
            info!(%category, "Deleted budget");
            self.dirty = true;
        }
        removed
    }

    #[must_use]
    pub fn get_budget_for_category(&self, category: ExpenseCategory) -> Option<&Budget> {
        self.ledger
            .budgets_for(self.active_project)
            .find(|b| b.category == category)
    }

    #[must_use]
    pub fn get_budgets(&self) -> Vec<&Budget> {
        self.ledger.budgets_for(self.active_project).collect()
    }

    /// Status of every budget in the active project, against all of the
    /// project's spending in that category.
    pub fn budget_statuses(&self) -> Result<Vec<BudgetStatus>, CoreError> {
        let spent = self
            .aggregation_service
            .by_category(self.ledger.expenses_for(self.active_project));
        self.budget_service
            .evaluate_all(self.ledger.budgets_for(self.active_project), &spent)
    }

    /// Budgets that are approaching or past their limit.
    pub fn budget_alerts(&self) -> Result<Vec<BudgetStatus>, CoreError> {
        let statuses = self.budget_statuses()?;
        Ok(self.budget_service.alerts(&statuses).into_iter().cloned().collect())
    }

    /// Budgets that are past their limit (the notification list).
    pub fn exceeded_budgets(&self) -> Result<Vec<BudgetStatus>, CoreError> {
        let statuses = self.budget_statuses()?;
        Ok(self.budget_service.exceeded(&statuses).into_iter().cloned().collect())
    }

    /// Whether the daily logging reminder is due for `today`.
    #[must_use]
    pub fn needs_daily_reminder(&self, today: NaiveDate) -> bool {
        self.budget_service
            .needs_daily_reminder(&self.ledger.settings, self.last_expense_date(), today)
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// All aggregates of the active project, in the ledger currency.
    #[must_use]
    pub fn summary(&self) -> AggregateSummary {
        self.aggregation_service.summarize(
            self.ledger.expenses_for(self.active_project),
            self.ledger.settings.ledger_currency,
        )
    }

    #[must_use]
    pub fn total_expenses(&self) -> f64 {
        self.aggregation_service
            .total(self.ledger.expenses_for(self.active_project))
    }

    /// The largest categories by spend (at most [`TOP_CATEGORY_COUNT`]).
    #[must_use]
    pub fn top_categories(&self) -> Vec<CategoryTotal> {
        self.aggregation_service
            .top_categories(self.ledger.expenses_for(self.active_project), TOP_CATEGORY_COUNT)
    }

    /// Spending over the last six months including the current one.
    #[must_use]
    pub fn monthly_trend(&self) -> Vec<MonthlyPoint> {
        self.monthly_trend_at(DEFAULT_TREND_MONTHS, Utc::now().date_naive())
    }

    /// Spending over `month_count` months ending with `today`'s month.
    #[must_use]
    pub fn monthly_trend_at(&self, month_count: usize, today: NaiveDate) -> Vec<MonthlyPoint> {
        self.aggregation_service.monthly_trend(
            self.ledger.expenses_for(self.active_project),
            month_count,
            today,
        )
    }

    /// The last eight weeks that have spending.
    #[must_use]
    pub fn weekly_series(&self) -> Vec<WeeklyPoint> {
        self.aggregation_service
            .weekly_series(self.ledger.expenses_for(self.active_project), DEFAULT_WEEK_WINDOW)
    }

    // ── Currency ────────────────────────────────────────────────────

    /// Convert between any two supported currencies.
    pub fn convert(&self, amount: f64, from: Currency, to: Currency) -> Result<f64, CoreError> {
        self.currency_service.convert(amount, from, to)
    }

    /// Convert a ledger-currency amount to the preferred currency.
    pub fn to_display_currency(&self, amount: f64) -> Result<f64, CoreError> {
        let settings = &self.ledger.settings;
        self.currency_service
            .convert(amount, settings.ledger_currency, settings.preferred_currency)
    }

    /// Convert a ledger-currency amount to the preferred currency and format it.
    pub fn format_amount(&self, amount: f64) -> Result<String, CoreError> {
        let converted = self.to_display_currency(amount)?;
        Ok(self
            .currency_service
            .format(converted, self.ledger.settings.preferred_currency))
    }

    /// Format an amount that is already in `currency`.
    #[must_use]
    pub fn format_in(&self, amount: f64, currency: Currency) -> String {
        self.currency_service.format(amount, currency)
    }

    #[must_use]
    pub fn exchange_rates(&self) -> &ExchangeRates {
        self.currency_service.rates()
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the display currency from a code such as "EUR" (case-insensitive).
    pub fn set_preferred_currency(&mut self, code: &str) -> Result<(), CoreError> {
        let currency: Currency = code.parse()?;
        self.ensure_rate(currency)?;
        self.ledger.settings.preferred_currency = currency;
        self.dirty = true;
        Ok(())
    }

    /// Set the currency amounts are recorded in. Existing amounts are not
    /// converted.
    pub fn set_ledger_currency(&mut self, code: &str) -> Result<(), CoreError> {
        let currency: Currency = code.parse()?;
        self.ensure_rate(currency)?;
        self.ledger.settings.ledger_currency = currency;
        self.dirty = true;
        Ok(())
    }

    /// Set or clear the informational monthly budget.
    pub fn set_monthly_budget(&mut self, amount: Option<f64>) -> Result<(), CoreError> {
        if let Some(value) = amount {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidBudgetLimit(value));
            }
        }
        self.ledger.settings.monthly_budget = amount;
        self.dirty = true;
        Ok(())
    }

    pub fn set_daily_reminder(&mut self, enabled: bool, time: Option<NaiveTime>) {
        self.ledger.settings.daily_reminder_enabled = enabled;
        if let Some(time) = time {
            self.ledger.settings.daily_reminder_time = time;
        }
        self.dirty = true;
    }

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.ledger.settings
    }

    /// Returns `true` if the ledger has been modified since it was loaded or
    /// last serialized.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Active project's expenses as CSV (fails when there are none).
    pub fn export_expenses_to_csv(&self) -> Result<String, CoreError> {
        self.export_service
            .expenses_to_csv(self.ledger.expenses_for(self.active_project))
    }

    pub fn export_expenses_to_json(&self) -> Result<String, CoreError> {
        self.export_service
            .expenses_to_json(self.ledger.expenses_for(self.active_project))
    }

    /// Suggested file name for a CSV export made on `today`.
    #[must_use]
    pub fn export_file_name(&self, today: NaiveDate) -> String {
        self.export_service.export_file_name(today)
    }

    /// Import expenses from JSON into the active project as new records with
    /// fresh IDs. Validates every expense; if any fails, none are imported.
    /// Returns the number imported.
    pub fn import_expenses_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let expenses = self.export_service.expenses_from_json(json)?;
        let count = expenses.len();
        let mut temp_ledger = self.ledger.clone();

        for mut expense in expenses {
            expense.id = Uuid::new_v4();
            expense.project_id = self.active_project;
            self.expense_service.add_expense(&mut temp_ledger, expense)?;
        }

        self.ledger = temp_ledger;
        self.dirty = true;
        info!(count, "Imported expenses");
        Ok(count)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn ensure_rate(&self, currency: Currency) -> Result<(), CoreError> {
        if self.currency_service.rates().contains(currency) {
            Ok(())
        } else {
            Err(CoreError::UnknownCurrency(currency.code().to_string()))
        }
    }

    fn validate_ledger(ledger: &Ledger, rates: &ExchangeRates) -> Result<(), CoreError> {
        if ledger.projects.is_empty() {
            return Err(CoreError::ValidationError("Ledger has no projects".into()));
        }
        for currency in [ledger.settings.ledger_currency, ledger.settings.preferred_currency] {
            rates.get(currency)?;
        }

        for expense in &ledger.expenses {
            if ledger.project(expense.project_id).is_none() {
                return Err(CoreError::ProjectNotFound(expense.project_id.to_string()));
            }
            ExpenseService::validate_amount(expense.amount)?;
        }

        let mut seen = HashSet::new();
        for budget in &ledger.budgets {
            if ledger.project(budget.project_id).is_none() {
                return Err(CoreError::ProjectNotFound(budget.project_id.to_string()));
            }
            if !budget.limit_amount.is_finite() || budget.limit_amount <= 0.0 {
                return Err(CoreError::InvalidBudgetLimit(budget.limit_amount));
            }
            if !seen.insert((budget.project_id, budget.category)) {
                return Err(CoreError::ValidationError(format!(
                    "Project {} has more than one {} budget",
                    budget.project_id, budget.category
                )));
            }
        }
        Ok(())
    }

    fn build(mut ledger: Ledger, rates: ExchangeRates) -> Self {
        // Keep the newest-first invariant regardless of how the snapshot was built
        ledger
            .expenses
            .sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        let active_project = ledger.projects.first().map(|p| p.id).unwrap_or_else(Uuid::nil);

        Self {
            ledger,
            active_project,
            expense_service: ExpenseService::new(),
            budget_service: BudgetService::new(),
            project_service: ProjectService::new(),
            aggregation_service: AggregationService::new(),
            currency_service: CurrencyService::new(rates),
            export_service: ExportService::new(),
            dirty: false,
        }
    }
}
