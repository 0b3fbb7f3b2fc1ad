use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Icon used when a project is created without one.
pub const DEFAULT_PROJECT_ICON: &str = "📁";

/// Name of the project every new ledger starts with.
pub const DEFAULT_PROJECT_NAME: &str = "Personal";

/// A named group of expenses and budgets (e.g., "Personal", "Trip to Lisbon").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        icon: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            icon: icon.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
