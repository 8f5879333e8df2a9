//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::UserSettings;

/// Repository trait for the single settings record.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Stored settings, or `None` when nothing has been saved yet.
    fn get_settings(&self) -> Result<Option<UserSettings>>;

    /// Insert or overwrite the stored settings.
    async fn save_settings(&self, settings: &UserSettings) -> Result<()>;
}
