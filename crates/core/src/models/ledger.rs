use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::budget::Budget;
use super::expense::Expense;
use super::project::{Project, DEFAULT_PROJECT_ICON, DEFAULT_PROJECT_NAME};
use super::settings::Settings;

/// The main data container: a consistent snapshot of everything the user owns.
///
/// The embedding application persists and syncs it; this crate only reads
/// and mutates it in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Always holds at least one project
    pub projects: Vec<Project>,

    /// Expenses of every project, newest first
    pub expenses: Vec<Expense>,

    /// At most one budget per (project, category)
    pub budgets: Vec<Budget>,

    pub settings: Settings,
}

impl Ledger {
    /// Expenses belonging to one project.
    pub fn expenses_for(&self, project_id: Uuid) -> impl Iterator<Item = &Expense> + '_ {
        self.expenses.iter().filter(move |e| e.project_id == project_id)
    }

    /// Budgets belonging to one project.
    pub fn budgets_for(&self, project_id: Uuid) -> impl Iterator<Item = &Budget> + '_ {
        self.budgets.iter().filter(move |b| b.project_id == project_id)
    }

    pub fn project(&self, project_id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            projects: vec![Project::new(DEFAULT_PROJECT_NAME, None, DEFAULT_PROJECT_ICON)],
            expenses: Vec::new(),
            budgets: Vec::new(),
            settings: Settings::default(),
        }
    }
}
