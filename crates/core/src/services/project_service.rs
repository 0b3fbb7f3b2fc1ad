use chrono::Utc;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::project::{Project, DEFAULT_PROJECT_ICON};

/// Longest accepted project name, in characters.
pub const MAX_PROJECT_NAME_LEN: usize = 100;

/// Manages projects: named groups of expenses and budgets.
pub struct ProjectService;

impl ProjectService {
    pub fn new() -> Self {
        Self
    }

    pub fn create_project(
        &self,
        ledger: &mut Ledger,
        name: &str,
        description: Option<String>,
        icon: Option<String>,
    ) -> Result<Uuid, CoreError> {
        let name = Self::validate_name(name)?;
        let icon = icon
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT_ICON.to_string());

        let project = Project::new(name, normalize_description(description), icon);
        let id = project.id;
        ledger.projects.push(project);
        Ok(id)
    }

    /// Rename or re-describe a project. `None` fields stay unchanged.
    pub fn update_project(
        &self,
        ledger: &mut Ledger,
        project_id: Uuid,
        name: Option<&str>,
        description: Option<Option<String>>,
        icon: Option<String>,
    ) -> Result<(), CoreError> {
        let name = name.map(Self::validate_name).transpose()?;

        let project = ledger
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| CoreError::ProjectNotFound(project_id.to_string()))?;

        if let Some(name) = name {
            project.name = name;
        }
        if let Some(description) = description {
            project.description = normalize_description(description);
        }
        if let Some(icon) = icon.filter(|i| !i.trim().is_empty()) {
            project.icon = icon;
        }
        project.updated_at = Utc::now();
        Ok(())
    }

    /// Delete a project together with its expenses and budgets.
    /// The last remaining project can't be deleted.
    pub fn delete_project(
        &self,
        ledger: &mut Ledger,
        project_id: Uuid,
    ) -> Result<Project, CoreError> {
        let idx = ledger
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| CoreError::ProjectNotFound(project_id.to_string()))?;

        if ledger.projects.len() == 1 {
            return Err(CoreError::ValidationError(
                "Cannot delete the only remaining project".into(),
            ));
        }

        ledger.expenses.retain(|e| e.project_id != project_id);
        ledger.budgets.retain(|b| b.project_id != project_id);
        Ok(ledger.projects.remove(idx))
    }

    fn validate_name(name: &str) -> Result<String, CoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError("Project name must not be empty".into()));
        }
        if trimmed.chars().count() > MAX_PROJECT_NAME_LEN {
            return Err(CoreError::ValidationError(format!(
                "Project name must be at most {MAX_PROJECT_NAME_LEN} characters"
            )));
        }
        Ok(trimmed.to_string())
    }
}

impl Default for ProjectService {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
