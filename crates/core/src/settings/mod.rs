pub mod settings_accessor;
pub mod settings_model;
pub mod settings_resolve;
pub mod settings_service;
pub mod settings_traits;

pub use settings_accessor::SettingsAccessor;
pub use settings_model::*;
pub use settings_resolve::{resolve_item, resolve_localized, ResolvedItem};
pub use settings_service::{setting, SettingsService, SettingsServiceTrait};
pub use settings_traits::RecordStoreTrait;
