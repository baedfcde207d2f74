use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use super::{SettingsRepositoryTrait, SettingsServiceTrait, SplitSettings, ToleranceMode};
use crate::constants::{
    SETTING_SPLIT_DISPLAY_PRECISION, SETTING_SPLIT_TOLERANCE_MODE, SETTING_SPLIT_VALUE_TOLERANCE,
};
use crate::errors::{Error, Result, StorageError};

/// Largest scale a `Decimal` can carry.
const MAX_DISPLAY_PRECISION: u32 = 28;

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }

    fn get_setting_value(&self, key: &str) -> Result<Option<String>> {
        match self.settings_repository.get_setting(key) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(Error::Storage(StorageError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn parse_tolerance(value: &str) -> Result<Decimal> {
        let tolerance = Decimal::from_str(value.trim()).map_err(|e| {
            Error::InvalidConfigValue(format!(
                "{} must be a decimal number, got '{}': {}",
                SETTING_SPLIT_VALUE_TOLERANCE, value, e
            ))
        })?;
        if tolerance.is_sign_negative() {
            return Err(Error::InvalidConfigValue(format!(
                "{} must not be negative, got {}",
                SETTING_SPLIT_VALUE_TOLERANCE, tolerance
            )));
        }
        Ok(tolerance)
    }

    fn parse_precision(value: &str) -> Result<u32> {
        match value.trim().parse::<u32>() {
            Ok(precision) if precision <= MAX_DISPLAY_PRECISION => Ok(precision),
            _ => Err(Error::InvalidConfigValue(format!(
                "{} must be an integer between 0 and {}, got '{}'",
                SETTING_SPLIT_DISPLAY_PRECISION, MAX_DISPLAY_PRECISION, value
            ))),
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_split_settings(&self) -> Result<SplitSettings> {
        let mut settings = SplitSettings::default();

        if let Some(value) = self.get_setting_value(SETTING_SPLIT_VALUE_TOLERANCE)? {
            settings.value_tolerance = Self::parse_tolerance(&value)?;
        }
        if let Some(value) = self.get_setting_value(SETTING_SPLIT_TOLERANCE_MODE)? {
            settings.tolerance_mode =
                ToleranceMode::from_str(&value).map_err(Error::InvalidConfigValue)?;
        }
        if let Some(value) = self.get_setting_value(SETTING_SPLIT_DISPLAY_PRECISION)? {
            settings.display_precision = Self::parse_precision(&value)?;
        }

        debug!("Resolved split settings: {:?}", settings);
        Ok(settings)
    }

    async fn update_split_settings(&self, settings: &SplitSettings) -> Result<()> {
        if settings.value_tolerance.is_sign_negative() {
            return Err(Error::InvalidConfigValue(format!(
                "{} must not be negative, got {}",
                SETTING_SPLIT_VALUE_TOLERANCE, settings.value_tolerance
            )));
        }
        if settings.display_precision > MAX_DISPLAY_PRECISION {
            return Err(Error::InvalidConfigValue(format!(
                "{} must be at most {}, got {}",
                SETTING_SPLIT_DISPLAY_PRECISION, MAX_DISPLAY_PRECISION, settings.display_precision
            )));
        }

        self.settings_repository
            .update_setting(
                SETTING_SPLIT_VALUE_TOLERANCE,
                &settings.value_tolerance.to_string(),
            )
            .await?;
        self.settings_repository
            .update_setting(SETTING_SPLIT_TOLERANCE_MODE, settings.tolerance_mode.as_str())
            .await?;
        self.settings_repository
            .update_setting(
                SETTING_SPLIT_DISPLAY_PRECISION,
                &settings.display_precision.to_string(),
            )
            .await?;
        Ok(())
    }
}
