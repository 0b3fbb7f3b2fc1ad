use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// User-configurable settings, stored inside the ledger snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency all expense and budget amounts are recorded in.
    pub ledger_currency: Currency,

    /// The currency amounts are displayed in.
    pub preferred_currency: Currency,

    /// Informational overall monthly budget. Shown to the user, never evaluated.
    #[serde(default)]
    pub monthly_budget: Option<f64>,

    /// Remind the user to log expenses when nothing was logged today.
    #[serde(default)]
    pub daily_reminder_enabled: bool,

    #[serde(default = "default_reminder_time")]
    pub daily_reminder_time: NaiveTime,
}

fn default_reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_currency: Currency::Usd,
            preferred_currency: Currency::Usd,
            monthly_budget: None,
            daily_reminder_enabled: false,
            daily_reminder_time: default_reminder_time(),
        }
    }
}
