//! Per-language resolution of localized fields.

use serde::Serialize;

use super::settings_model::{SettingMap, SettingValue};
use crate::constants::SCALAR_ITEM_FIELD;

/// Reduces a localized field to a single value for `language`.
///
/// A `Map` is read as language -> scalar: the entry for `language` wins,
/// otherwise the first-inserted entry, otherwise `Null`. Null entries count
/// as missing on both steps. Any other value is already resolved and is
/// returned unchanged.
pub fn resolve_localized(value: &SettingValue, language: &str) -> SettingValue {
    match value {
        SettingValue::Map(translations) => translations
            .get(language)
            .filter(|v| !v.is_null())
            .or_else(|| translations.iter().map(|(_, v)| v).find(|v| !v.is_null()))
            .cloned()
            .unwrap_or_default(),
        other => other.clone(),
    }
}

/// Resolves every field of one list entry.
///
/// Entries that are not mappings are exposed with index-named fields: the
/// elements of a nested list as `"0"`, `"1"`, ..., a scalar as field `"0"`.
pub fn resolve_item(item: &SettingValue, language: &str) -> ResolvedItem {
    let fields: SettingMap = match item {
        SettingValue::Map(map) => map
            .iter()
            .map(|(name, raw)| (name, resolve_localized(raw, language)))
            .collect(),
        SettingValue::List(elements) => elements
            .iter()
            .enumerate()
            .map(|(i, raw)| (i.to_string(), resolve_localized(raw, language)))
            .collect(),
        scalar => SettingMap::from_iter([(SCALAR_ITEM_FIELD, scalar.clone())]),
    };
    ResolvedItem { fields }
}

/// One entry of a multi-item setting with every localized field reduced to a
/// single value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedItem {
    fields: SettingMap,
}

impl ResolvedItem {
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// The field rendered as text; `None` when absent or null.
    pub fn get_str(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_map(self) -> SettingMap {
        self.fields
    }
}
