//! Property-based tests for language resolution and reload consistency.
//!
//! These tests use the `proptest` crate to generate arbitrary localized
//! fields and nested setting values.

use std::sync::Arc;

use localset_core::settings::resolve_localized;
use localset_core::testing::MemoryStore;
use localset_core::{RecordStoreTrait, SettingMap, SettingValue, SettingsAccessor};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_language() -> impl Strategy<Value = String> {
    "[a-z]{2}"
}

/// Language -> text pairs with distinct languages, in generation order.
fn arb_translations() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_language(), "[a-zA-Z ]{0,12}"), 1..6).prop_map(|pairs| {
        let mut seen = Vec::new();
        pairs
            .into_iter()
            .filter(|(lang, _)| {
                if seen.contains(lang) {
                    false
                } else {
                    seen.push(lang.clone());
                    true
                }
            })
            .collect()
    })
}

fn arb_scalar() -> impl Strategy<Value = SettingValue> {
    prop_oneof![
        Just(SettingValue::Null),
        any::<bool>().prop_map(SettingValue::from),
        any::<i64>().prop_map(SettingValue::from),
        "[a-z0-9 ]{0,10}".prop_map(SettingValue::from),
    ]
}

fn arb_value() -> impl Strategy<Value = SettingValue> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(SettingValue::from),
            prop::collection::vec(("[a-z_]{1,6}", inner), 0..4)
                .prop_map(|fields| SettingValue::Map(fields.into_iter().collect())),
        ]
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn localized_field_picks_language_or_first_entry(
        translations in arb_translations(),
        language in arb_language(),
    ) {
        let map: SettingMap = translations.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let resolved = resolve_localized(&SettingValue::Map(map), &language);

        let expected = translations
            .iter()
            .find(|(lang, _)| *lang == language)
            .unwrap_or(&translations[0])
            .1
            .clone();
        prop_assert_eq!(resolved, SettingValue::from(expected));
    }

    #[test]
    fn fresh_accessor_sees_saved_value(value in arb_value(), language in arb_language()) {
        let store: Arc<dyn RecordStoreTrait> = Arc::new(MemoryStore::default());
        let mut writer = SettingsAccessor::load(store.clone(), Some("generated"), language.clone()).unwrap();
        writer.save(value).unwrap();

        let reader = SettingsAccessor::load(store, Some("generated"), language).unwrap();
        prop_assert_eq!(reader.raw(), writer.raw());
        prop_assert_eq!(reader.get().collect::<Vec<_>>(), writer.get().collect::<Vec<_>>());
    }

    #[test]
    fn only_lists_are_enumerable(value in arb_value()) {
        let store: Arc<dyn RecordStoreTrait> = Arc::new(MemoryStore::default());
        let mut accessor = SettingsAccessor::load(store, Some("shape"), "en").unwrap();
        accessor.save(value).unwrap();

        let expected = accessor.raw().as_list().map(|items| items.len()).unwrap_or(0);
        prop_assert_eq!(accessor.get().count(), expected);
    }
}
