use serde::{Deserialize, Serialize};

/// User preferences. A single record per installation, mirrored to the
/// `settings/preferences` document of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub dark_mode: bool,
    pub currency: String,
    pub language: String,
    pub notifications: bool,
    pub biometric_lock: bool,
    pub monthly_budget: f64,
    pub savings_goal_percentage: f64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            currency: "INR".to_string(),
            language: "en".to_string(),
            notifications: true,
            biometric_lock: false,
            monthly_budget: 50000.0,
            savings_goal_percentage: 30.0,
        }
    }
}

/// Partial update; unset fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub dark_mode: Option<bool>,
    pub currency: Option<String>,
    pub language: Option<String>,
    pub notifications: Option<bool>,
    pub biometric_lock: Option<bool>,
    pub monthly_budget: Option<f64>,
    pub savings_goal_percentage: Option<f64>,
}

impl UserSettings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(v) = update.dark_mode {
            self.dark_mode = v;
        }
        if let Some(v) = update.currency {
            self.currency = v;
        }
        if let Some(v) = update.language {
            self.language = v;
        }
        if let Some(v) = update.notifications {
            self.notifications = v;
        }
        if let Some(v) = update.biometric_lock {
            self.biometric_lock = v;
        }
        if let Some(v) = update.monthly_budget {
            self.monthly_budget = v;
        }
        if let Some(v) = update.savings_goal_percentage {
            self.savings_goal_percentage = v;
        }
    }
}
