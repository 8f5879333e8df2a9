use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::debug;

use super::SettingsRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::settings::{SettingsUpdate, UserSettings};

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Read stored settings into memory, saving the defaults on first run.
    async fn load_settings(&self) -> Result<UserSettings>;

    fn get_settings(&self) -> UserSettings;

    async fn update_settings(&self, update: SettingsUpdate) -> Result<UserSettings>;

    async fn toggle_dark_mode(&self) -> Result<UserSettings>;

    async fn set_monthly_budget(&self, budget: f64) -> Result<UserSettings>;

    async fn set_savings_goal(&self, percentage: f64) -> Result<UserSettings>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
    current: RwLock<UserSettings>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
            current: RwLock::new(UserSettings::default()),
        }
    }

    fn replace_current(&self, settings: UserSettings) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = settings;
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    async fn load_settings(&self) -> Result<UserSettings> {
        let settings = match self.settings_repository.get_settings()? {
            Some(stored) => stored,
            None => {
                debug!("No stored settings, saving defaults");
                let defaults = UserSettings::default();
                self.settings_repository.save_settings(&defaults).await?;
                defaults
            }
        };
        self.replace_current(settings.clone());
        Ok(settings)
    }

    fn get_settings(&self) -> UserSettings {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn update_settings(&self, update: SettingsUpdate) -> Result<UserSettings> {
        if let Some(percentage) = update.savings_goal_percentage {
            if !(0.0..=100.0).contains(&percentage) {
                return Err(ValidationError::InvalidInput(format!(
                    "Savings goal must be between 0 and 100, got {}",
                    percentage
                ))
                .into());
            }
        }
        let mut settings = self.get_settings();
        settings.apply(update);
        self.settings_repository.save_settings(&settings).await?;
        self.replace_current(settings.clone());
        Ok(settings)
    }

    async fn toggle_dark_mode(&self) -> Result<UserSettings> {
        let dark_mode = !self.get_settings().dark_mode;
        self.update_settings(SettingsUpdate {
            dark_mode: Some(dark_mode),
            ..Default::default()
        })
        .await
    }

    async fn set_monthly_budget(&self, budget: f64) -> Result<UserSettings> {
        self.update_settings(SettingsUpdate {
            monthly_budget: Some(budget),
            ..Default::default()
        })
        .await
    }

    async fn set_savings_goal(&self, percentage: f64) -> Result<UserSettings> {
        self.update_settings(SettingsUpdate {
            savings_goal_percentage: Some(percentage),
            ..Default::default()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockSettingsRepository {
        stored: Mutex<Option<UserSettings>>,
        saves: Mutex<usize>,
    }

    #[async_trait]
    impl SettingsRepositoryTrait for MockSettingsRepository {
        fn get_settings(&self) -> Result<Option<UserSettings>> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save_settings(&self, settings: &UserSettings) -> Result<()> {
            *self.stored.lock().unwrap() = Some(settings.clone());
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_saves_defaults_when_empty() {
        let repo = Arc::new(MockSettingsRepository::default());
        let service = SettingsService::new(repo.clone());

        let loaded = service.load_settings().await.unwrap();
        assert_eq!(loaded, UserSettings::default());
        assert_eq!(*repo.saves.lock().unwrap(), 1);

        service.load_settings().await.unwrap();
        assert_eq!(*repo.saves.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let repo = Arc::new(MockSettingsRepository::default());
        let service = SettingsService::new(repo.clone());
        service.load_settings().await.unwrap();

        let updated = service
            .update_settings(SettingsUpdate {
                currency: Some("USD".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.currency, "USD");
        assert_eq!(updated.language, "en");
        assert_eq!(repo.stored.lock().unwrap().as_ref().unwrap().currency, "USD");
    }

    #[tokio::test]
    async fn test_toggle_budget_and_goal() {
        let service = SettingsService::new(Arc::new(MockSettingsRepository::default()));
        service.load_settings().await.unwrap();

        assert!(!service.toggle_dark_mode().await.unwrap().dark_mode);
        assert_eq!(service.set_monthly_budget(75000.0).await.unwrap().monthly_budget, 75000.0);
        assert_eq!(service.set_savings_goal(40.0).await.unwrap().savings_goal_percentage, 40.0);
        assert!(service.set_savings_goal(140.0).await.is_err());
        assert_eq!(service.get_settings().savings_goal_percentage, 40.0);
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let json = serde_json::to_value(UserSettings::default()).unwrap();
        assert_eq!(json["darkMode"], true);
        assert_eq!(json["savingsGoalPercentage"], 30.0);
        assert_eq!(json["biometricLock"], false);
    }
}
