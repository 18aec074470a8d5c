//! Repository traits for settings.

use crate::errors::Result;
use crate::settings::SettingRecord;

/// Persistence seam for `(key, value)` setting rows.
///
/// A missing row is `Ok(None)`, never an error. Failures of the underlying
/// store (connectivity, constraints) are returned as `Err` and the accessor
/// passes them through untouched.
pub trait RecordStoreTrait: Send + Sync {
    /// Get the row stored under `key`, if any.
    fn find_by_key(&self, key: &str) -> Result<Option<SettingRecord>>;

    /// Insert the row, or overwrite the value of the existing row for `key`.
    fn update_or_create(&self, key: &str, value: &str) -> Result<SettingRecord>;

    /// All stored keys in ascending order.
    fn keys(&self) -> Result<Vec<String>>;
}
