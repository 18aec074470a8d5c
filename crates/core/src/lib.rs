//! localset Core - Localized key-value settings.
//!
//! This crate contains the value model, the per-language resolution rules and
//! the `SettingsAccessor` used by application code. It is database-agnostic
//! and defines the `RecordStoreTrait` that is implemented by the
//! `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod settings;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export the accessor surface
pub use settings::{
    setting, RecordStoreTrait, ResolvedItem, SettingMap, SettingRecord, SettingValue,
    SettingsAccessor, SettingsService, SettingsServiceTrait,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
