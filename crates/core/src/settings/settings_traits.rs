//! Repository and service traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::SplitSettings;

/// Key/value store for application settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get a single setting value by key.
    ///
    /// Returns `StorageError::NotFound` when the key has never been written.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Update a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Resolve the split settings, falling back to defaults for unset keys.
    fn get_split_settings(&self) -> Result<SplitSettings>;

    async fn update_split_settings(&self, settings: &SplitSettings) -> Result<()>;
}
