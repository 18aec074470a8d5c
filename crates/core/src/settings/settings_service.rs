use super::{RecordStoreTrait, SettingsAccessor};
use crate::errors::Result;
use log::debug;
use std::sync::Arc;

// Define the trait for SettingsService
pub trait SettingsServiceTrait: Send + Sync {
    /// Language used when a caller does not name one.
    fn active_language(&self) -> &str;

    /// Open an accessor for `key`, resolved for `language` or the active
    /// language.
    fn setting(&self, key: Option<&str>, language: Option<&str>) -> Result<SettingsAccessor>;

    /// All stored setting keys.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Factory for accessors over one record store.
///
/// The active language is plain configuration handed in by the caller (for
/// example the locale negotiated for the current request) rather than
/// process-wide state.
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn RecordStoreTrait>,
    active_language: String,
}

impl SettingsService {
    pub fn new(store: Arc<dyn RecordStoreTrait>, active_language: impl Into<String>) -> Self {
        SettingsService {
            store,
            active_language: active_language.into(),
        }
    }

    /// Same store, different default language.
    pub fn with_active_language(&self, language: impl Into<String>) -> Self {
        SettingsService {
            store: Arc::clone(&self.store),
            active_language: language.into(),
        }
    }
}

impl SettingsServiceTrait for SettingsService {
    fn active_language(&self) -> &str {
        &self.active_language
    }

    fn setting(&self, key: Option<&str>, language: Option<&str>) -> Result<SettingsAccessor> {
        let language = language.unwrap_or(&self.active_language);
        debug!("Opening setting {:?} for language '{}'", key, language);
        SettingsAccessor::load(Arc::clone(&self.store), key, language)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.store.keys()
    }
}

/// Shorthand for `service.setting(Some(key), language)`.
pub fn setting(
    service: &dyn SettingsServiceTrait,
    key: &str,
    language: Option<&str>,
) -> Result<SettingsAccessor> {
    service.setting(Some(key), language)
}
