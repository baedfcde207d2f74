//! Settings module - split workflow configuration, repository and service traits.

mod settings_model;
mod settings_service;
mod settings_traits;

pub use settings_model::{SplitSettings, ToleranceMode};
pub use settings_service::SettingsService;
pub use settings_traits::{SettingsRepositoryTrait, SettingsServiceTrait};
