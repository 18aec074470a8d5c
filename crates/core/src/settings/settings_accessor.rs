use std::sync::Arc;

use log::debug;

use super::settings_model::SettingValue;
use super::settings_resolve::{resolve_item, resolve_localized, ResolvedItem};
use super::RecordStoreTrait;
use crate::errors::{Error, Result};

/// Read/write view of one named setting, resolved for one language.
///
/// The accessor snapshots the stored value when it is created and only
/// changes that snapshot through `save` or `refresh`. Lookups never fail:
/// anything absent resolves to `None` or an empty sequence.
///
/// Indexed and keyed lookups are read-only. There is deliberately no way to
/// write or remove a single field; replace the whole value with `save`.
pub struct SettingsAccessor {
    store: Arc<dyn RecordStoreTrait>,
    key: Option<String>,
    language: String,
    raw_value: SettingValue,
}

impl SettingsAccessor {
    /// Creates the accessor and loads the current value of `key`.
    ///
    /// A missing row, or a `None` key, yields a `Null` value rather than an
    /// error. Store failures are returned unchanged.
    pub fn load(
        store: Arc<dyn RecordStoreTrait>,
        key: Option<&str>,
        language: impl Into<String>,
    ) -> Result<Self> {
        let mut accessor = SettingsAccessor {
            store,
            key: key.map(str::to_string),
            language: language.into(),
            raw_value: SettingValue::Null,
        };
        accessor.refresh()?;
        Ok(accessor)
    }

    /// Re-reads the stored value, replacing the in-memory snapshot.
    pub fn refresh(&mut self) -> Result<()> {
        self.raw_value = match self.key.as_deref() {
            Some(key) => {
                let record = self.store.find_by_key(key)?;
                debug!(
                    "Loaded setting '{}' ({})",
                    key,
                    if record.is_some() { "found" } else { "missing" }
                );
                record
                    .map(|r| SettingValue::decode(&r.value))
                    .unwrap_or_default()
            }
            None => SettingValue::Null,
        };
        Ok(())
    }

    /// Stores `data` under the accessor's key (update-or-create).
    ///
    /// Text is written as-is and anything else as JSON. Afterwards the
    /// snapshot holds exactly what a fresh load of the key would produce.
    ///
    /// An accessor built without a key has nowhere to write, so this returns
    /// `Error::MissingKey` without touching the store. Callers that want a
    /// silent no-op for keyless accessors should check `key()` first.
    pub fn save(&mut self, data: impl Into<SettingValue>) -> Result<()> {
        let key = self.key.as_deref().ok_or(Error::MissingKey)?;
        let encoded = data.into().encode()?;

        let record = self.store.update_or_create(key, &encoded)?;
        debug!("Saved setting '{}' ({} bytes)", key, record.value.len());

        self.raw_value = SettingValue::decode(&record.value);
        Ok(())
    }

    /// Lazily resolves each entry of a multi-item setting.
    ///
    /// Only list-shaped values are enumerable: a single mapping, a scalar or
    /// a missing setting yields nothing. Items are recomputed on every call.
    pub fn get(&self) -> impl Iterator<Item = ResolvedItem> + '_ {
        self.raw_value
            .as_list()
            .unwrap_or_default()
            .iter()
            .map(move |item| resolve_item(item, &self.language))
    }

    /// Calls `callback(item, index)` for every resolved entry, in order.
    pub fn each<F>(&self, mut callback: F) -> &Self
    where
        F: FnMut(ResolvedItem, usize),
    {
        for (index, item) in self.get().enumerate() {
            callback(item, index);
        }
        self
    }

    /// Like `each`, but stops at and returns the first callback error.
    pub fn try_each<F, E>(&self, mut callback: F) -> std::result::Result<&Self, E>
    where
        F: FnMut(ResolvedItem, usize) -> std::result::Result<(), E>,
    {
        for (index, item) in self.get().enumerate() {
            callback(item, index)?;
        }
        Ok(self)
    }

    /// Keyed lookup of a top-level field.
    ///
    /// For a mapping value: a missing or blank field is `None`, a localized
    /// field resolves to the accessor's language (or its first-inserted
    /// entry), any other field is returned as stored. A bare scalar value is
    /// returned whole for every field name; existing single-string settings
    /// are read that way.
    pub fn field(&self, name: &str) -> Option<SettingValue> {
        match &self.raw_value {
            SettingValue::Map(fields) => {
                let raw = fields.get(name).filter(|v| !v.is_blank())?;
                Some(resolve_localized(raw, &self.language)).filter(|v| !v.is_null())
            }
            SettingValue::Null | SettingValue::List(_) => None,
            scalar => Some(scalar.clone()),
        }
    }

    /// `field` rendered as text.
    pub fn field_str(&self, name: &str) -> Option<String> {
        self.field(name).map(|v| v.to_string())
    }

    /// Whether the top-level mapping holds a non-null `name`.
    pub fn has(&self, name: &str) -> bool {
        self.raw_value
            .as_map()
            .and_then(|fields| fields.get(name))
            .is_some_and(|v| !v.is_null())
    }

    /// Indexed lookup into a multi-item setting.
    pub fn item(&self, index: usize) -> Option<ResolvedItem> {
        self.raw_value
            .as_list()?
            .get(index)
            .map(|item| resolve_item(item, &self.language))
    }

    pub fn has_item(&self, index: usize) -> bool {
        self.raw_value
            .as_list()
            .is_some_and(|items| index < items.len())
    }

    /// The stored value without language resolution. A missing setting is an
    /// empty list.
    pub fn to_value(&self) -> SettingValue {
        if self.raw_value.is_null() {
            SettingValue::empty()
        } else {
            self.raw_value.clone()
        }
    }

    pub fn raw(&self) -> &SettingValue {
        &self.raw_value
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Re-targets resolution to `language` without touching the store.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl std::fmt::Debug for SettingsAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsAccessor")
            .field("key", &self.key)
            .field("language", &self.language)
            .field("raw_value", &self.raw_value)
            .finish()
    }
}
