//! SQLite storage implementation for settings.

mod model;
mod repository;

pub use model::AppSettingDB;
pub use repository::SettingsRepository;
pub(crate) use repository::{load_settings, save_settings_rows};

// Re-export trait from core for convenience
pub use dhanrakshak_core::settings::SettingsRepositoryTrait;
