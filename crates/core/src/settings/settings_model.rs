//! Value model for persisted settings.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

use crate::errors::Result;

/// A persisted `(key, value)` row as handed back by a record store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingRecord {
    pub key: String,
    pub value: String,
}

/// Decoded in-memory form of a setting value.
///
/// Fields of a `Map` hold either a plain scalar or a nested `Map` read as
/// language code -> scalar (a localized field). A `List` holds such maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SettingValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<SettingValue>),
    Map(SettingMap),
}

impl SettingValue {
    /// An empty list, the shape returned for settings that hold nothing.
    pub fn empty() -> Self {
        SettingValue::List(Vec::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SettingValue::Null)
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, SettingValue::List(_) | SettingValue::Map(_))
    }

    /// Whether a field holding this value counts as unset: null, `false`,
    /// numeric zero, `""`, `"0"`, or an empty collection.
    pub fn is_blank(&self) -> bool {
        match self {
            SettingValue::Null => true,
            SettingValue::Bool(b) => !b,
            SettingValue::Number(n) => n.as_f64() == Some(0.0),
            SettingValue::Text(s) => s.is_empty() || s == "0",
            SettingValue::List(items) => items.is_empty(),
            SettingValue::Map(map) => map.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SettingValue]> {
        match self {
            SettingValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&SettingMap> {
        match self {
            SettingValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Decodes stored text.
    ///
    /// Text that parses as JSON becomes structured data with object key order
    /// kept; anything else is an opaque `Text` holding the input verbatim.
    pub fn decode(text: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(json) => json.into(),
            Err(_) => SettingValue::Text(text.to_string()),
        }
    }

    /// Encodes the value for storage. `Text` is stored as-is, everything else
    /// as compact JSON.
    pub fn encode(&self) -> Result<String> {
        match self {
            SettingValue::Text(s) => Ok(s.clone()),
            other => Ok(serde_json::to_string(other)?),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(s) => f.write_str(s),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Insertion-ordered string -> value mapping.
///
/// Order matters: a localized field whose requested language is missing
/// falls back to its first-inserted entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingMap {
    entries: Vec<(String, SettingValue)>,
}

impl SettingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or replaces. A replaced entry keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SettingValue>,
    ) -> Option<SettingValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// The first-inserted entry.
    pub fn first(&self) -> Option<(&str, &SettingValue)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl IntoIterator for SettingMap {
    type Item = (String, SettingValue);
    type IntoIter = std::vec::IntoIter<(String, SettingValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for SettingMap
where
    K: Into<String>,
    V: Into<SettingValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SettingMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K, V> FromIterator<(K, V)> for SettingValue
where
    K: Into<String>,
    V: Into<SettingValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SettingValue::Map(iter.into_iter().collect())
    }
}

// === Conversions ===

impl From<serde_json::Value> for SettingValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => SettingValue::Null,
            serde_json::Value::Bool(b) => SettingValue::Bool(b),
            serde_json::Value::Number(n) => SettingValue::Number(n),
            serde_json::Value::String(s) => SettingValue::Text(s),
            serde_json::Value::Array(items) => {
                SettingValue::List(items.into_iter().map(SettingValue::from).collect())
            }
            serde_json::Value::Object(fields) => SettingValue::Map(fields.into_iter().collect()),
        }
    }
}

impl From<SettingValue> for serde_json::Value {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::Null => serde_json::Value::Null,
            SettingValue::Bool(b) => serde_json::Value::Bool(b),
            SettingValue::Number(n) => serde_json::Value::Number(n),
            SettingValue::Text(s) => serde_json::Value::String(s),
            SettingValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            SettingValue::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        SettingValue::Number(n.into())
    }
}

impl From<i32> for SettingValue {
    fn from(n: i32) -> Self {
        SettingValue::Number(n.into())
    }
}

impl From<u64> for SettingValue {
    fn from(n: u64) -> Self {
        SettingValue::Number(n.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for SettingValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n)
            .map(SettingValue::Number)
            .unwrap_or(SettingValue::Null)
    }
}

impl From<SettingMap> for SettingValue {
    fn from(map: SettingMap) -> Self {
        SettingValue::Map(map)
    }
}

impl<T: Into<SettingValue>> From<Vec<T>> for SettingValue {
    fn from(items: Vec<T>) -> Self {
        SettingValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SettingValue>> From<Option<T>> for SettingValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SettingValue::Null)
    }
}

// === Serde ===

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SettingValue::Null => serializer.serialize_unit(),
            SettingValue::Bool(b) => serializer.serialize_bool(*b),
            SettingValue::Number(n) => n.serialize(serializer),
            SettingValue::Text(s) => serializer.serialize_str(s),
            SettingValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            SettingValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for SettingMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            out.serialize_entry(k, v)?;
        }
        out.end()
    }
}

impl<'de> Deserialize<'de> for SettingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(SettingValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_keeps_non_json_text_verbatim() {
        assert_eq!(
            SettingValue::decode("logo/site.png"),
            SettingValue::Text("logo/site.png".to_string())
        );
        assert_eq!(SettingValue::decode(""), SettingValue::Text(String::new()));
    }

    #[test]
    fn test_decode_json_preserves_key_order() {
        let value = SettingValue::decode(r#"{"name":{"fr":"nom","ar":"اسم","en":"name"}}"#);
        let name = value.as_map().and_then(|m| m.get("name")).unwrap();
        let langs: Vec<&str> = name.as_map().unwrap().keys().collect();
        assert_eq!(langs, vec!["fr", "ar", "en"]);
    }

    #[test]
    fn test_decode_json_scalars() {
        assert_eq!(SettingValue::decode("42").as_i64(), Some(42));
        assert_eq!(SettingValue::decode("true").as_bool(), Some(true));
        assert_eq!(SettingValue::decode("null"), SettingValue::Null);
        assert_eq!(SettingValue::decode(r#""quoted""#).as_str(), Some("quoted"));
    }

    #[test]
    fn test_encode_text_is_stored_raw() {
        let value = SettingValue::from("plain text");
        assert_eq!(value.encode().unwrap(), "plain text");
    }

    #[test]
    fn test_encode_structured_is_compact_json() {
        let value: SettingValue = vec![
            SettingValue::from_iter([("name", "a")]),
            SettingValue::from_iter([("name", "b")]),
        ]
        .into();
        assert_eq!(
            value.encode().unwrap(),
            r#"[{"name":"a"},{"name":"b"}]"#
        );
    }

    #[test]
    fn test_json_conversion_keeps_order() {
        let json = json!({"z": 1, "a": [true, null], "m": {"en": "x"}});
        let value = SettingValue::from(json.clone());
        assert_eq!(serde_json::Value::from(value), json);
    }

    #[test]
    fn test_map_insert_replaces_in_place() {
        let mut map = SettingMap::new();
        map.insert("ar", "1");
        map.insert("en", "2");
        let previous = map.insert("ar", "3");

        assert_eq!(previous, Some(SettingValue::from("1")));
        assert_eq!(map.first(), Some(("ar", &SettingValue::from("3"))));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_is_blank() {
        assert!(SettingValue::Null.is_blank());
        assert!(SettingValue::from("").is_blank());
        assert!(SettingValue::empty().is_blank());
        assert!(SettingValue::Map(SettingMap::new()).is_blank());
        assert!(SettingValue::from(false).is_blank());
        assert!(SettingValue::from(0i64).is_blank());
        assert!(SettingValue::from(0.0).is_blank());
        assert!(SettingValue::from("0").is_blank());
        assert!(!SettingValue::from(true).is_blank());
        assert!(!SettingValue::from(-1i64).is_blank());
        assert!(!SettingValue::from("00").is_blank());
        assert!(!SettingValue::from(" ").is_blank());
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(SettingValue::from(f64::NAN), SettingValue::Null);
        assert_eq!(SettingValue::from(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(SettingValue::from("hello").to_string(), "hello");
        assert_eq!(SettingValue::from(7i64).to_string(), "7");
        assert_eq!(
            SettingValue::from_iter([("en", "x")]).to_string(),
            r#"{"en":"x"}"#
        );
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = SettingRecord {
            key: "website".to_string(),
            value: "{}".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"key": "website", "value": "{}"}));
    }
}
