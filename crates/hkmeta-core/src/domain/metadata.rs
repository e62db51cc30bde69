use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::{AnyValue, CoreError, MetadataError, MetadataValue, Payload, UntypedMap};

/// Keyed metadata attached to a health-sample record.
///
/// Serializes as a flat object mapping each key to its [`MetadataValue`]
/// encoding. Entry order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    dictionary: BTreeMap<String, MetadataValue>,
}

/// Builds [`Metadata`] from `key => value` pairs; the last duplicate key wins.
///
/// ```
/// use hkmeta_core::{metadata, MetadataValue};
///
/// let meta = metadata! {
///     "HKWasUserEntered" => "1",
///     "HKSampleCount" => 3,
/// };
/// assert_eq!(meta.get("HKSampleCount"), Some(&MetadataValue::Int(3)));
/// ```
#[macro_export]
macro_rules! metadata {
    () => {
        $crate::Metadata::default()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        <$crate::Metadata as ::core::iter::FromIterator<(::std::string::String, $crate::MetadataValue)>>::from_iter([
            $((::std::string::String::from($key), $crate::MetadataValue::from($value))),+
        ])
    };
}

impl Metadata {
    pub fn new(dictionary: BTreeMap<String, MetadataValue>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &BTreeMap<String, MetadataValue> {
        &self.dictionary
    }

    pub fn into_dictionary(self) -> BTreeMap<String, MetadataValue> {
        self.dictionary
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.dictionary.get(key)
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, MetadataValue> {
        self.dictionary.iter()
    }

    /// Classifies every untyped entry, failing on the first unsupported kind.
    pub fn make_from(dictionary: &UntypedMap) -> Result<Self, MetadataError> {
        let mut classified = BTreeMap::new();
        for (key, value) in dictionary {
            let value = match value {
                AnyValue::Text(text) => MetadataValue::String(text.clone()),
                AnyValue::Instant(instant) => MetadataValue::Date(*instant),
                AnyValue::Float(float) => MetadataValue::Double(*float),
                AnyValue::Integer(integer) => MetadataValue::Int(*integer),
                other => {
                    return Err(MetadataError::UnsupportedValue {
                        key: key.clone(),
                        type_name: other.type_name(),
                    })
                }
            };
            classified.insert(key.clone(), value);
        }
        Ok(Self::new(classified))
    }

    /// Widens entries back into an untyped map; `None` when there are no entries.
    pub fn original(&self) -> Option<UntypedMap> {
        if self.dictionary.is_empty() {
            return None;
        }

        let widened = self
            .dictionary
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    MetadataValue::String(text) => AnyValue::Text(text.clone()),
                    MetadataValue::Date(instant) => AnyValue::Instant(*instant),
                    MetadataValue::Double(float) => AnyValue::Float(*float),
                    MetadataValue::Int(integer) => AnyValue::Integer(*integer),
                };
                (key.clone(), value)
            })
            .collect();
        Some(widened)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(input: &str) -> Result<Self, CoreError> {
        serde_json::from_str(input).map_err(CoreError::from_decode)
    }
}

impl Payload for Metadata {
    fn make(from: &UntypedMap) -> Result<Self, MetadataError> {
        Self::make_from(from)
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = BTreeMap::new();
        for (key, value) in iter {
            dictionary.insert(key.into(), value.into());
        }
        Self::new(dictionary)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Metadata
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a MetadataValue);
    type IntoIter = btree_map::Iter<'a, String, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.dictionary.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Timestamp;

    fn instant(seconds: i64) -> Timestamp {
        Timestamp::from_unix_seconds(seconds).expect("in range")
    }

    #[test]
    fn literal_text_matches_explicit_variant() {
        let literal = metadata! { "HKWasUserEntered" => "1" };
        let explicit = Metadata::from([(
            "HKWasUserEntered",
            MetadataValue::String(String::from("1")),
        )]);
        assert_eq!(literal, explicit);
    }

    #[test]
    fn literal_numbers_pick_int_and_double() {
        let meta = metadata! {
            "HKSampleCount" => 3,
            "HKWasUserEnteredValue" => 10.0,
        };
        assert_eq!(meta.get("HKSampleCount"), Some(&MetadataValue::Int(3)));
        assert_eq!(
            meta.get("HKWasUserEnteredValue"),
            Some(&MetadataValue::Double(10.0))
        );
    }

    #[test]
    fn last_listed_duplicate_wins() {
        let meta = metadata! { "k" => 1, "k" => "two" };
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("k"), Some(&MetadataValue::from("two")));
    }

    #[test]
    fn encodes_flat_object_of_tagged_values() {
        let meta = metadata! { "HKSampleCount" => 3 };
        let encoded = meta.to_json().expect("must encode");
        assert_eq!(encoded, r#"{"HKSampleCount":{"type":"int","value":3}}"#);
        assert_eq!(Metadata::from_json(&encoded).expect("must decode"), meta);
    }

    #[test]
    fn fails_whole_decode_on_one_bad_entry() {
        let input = json!({
            "ok": {"type": "int", "value": 1},
            "bad": {"type": "date", "value": "not-a-date"},
        })
        .to_string();
        let err = Metadata::from_json(&input).expect_err("must fail");
        assert!(matches!(err, CoreError::Decode(_)));
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn separates_truncated_json_from_invalid_metadata() {
        let err = Metadata::from_json(r#"{"k":"#).expect_err("must fail");
        assert!(matches!(err, CoreError::Serialization(_)));

        let err = Metadata::from_json(r#"{"k":{"type":"bogus","value":1}}"#).expect_err("must fail");
        assert!(matches!(err, CoreError::Decode(_)));
    }

    #[test]
    fn make_from_classifies_supported_kinds() {
        let input = UntypedMap::from([
            (String::from("s"), AnyValue::from("x")),
            (String::from("i"), AnyValue::from(2)),
            (String::from("d"), AnyValue::from(3.0)),
            (String::from("t"), AnyValue::from(instant(200))),
        ]);
        let meta = Metadata::make_from(&input).expect("must classify");
        assert_eq!(meta.get("s"), Some(&MetadataValue::from("x")));
        assert_eq!(meta.get("i"), Some(&MetadataValue::Int(2)));
        assert_eq!(meta.get("d"), Some(&MetadataValue::Double(3.0)));
        assert_eq!(meta.get("t"), Some(&MetadataValue::Date(instant(200))));
    }

    #[test]
    fn make_from_rejects_unsupported_kind() {
        let input = UntypedMap::from([(
            String::from("unsupported"),
            AnyValue::Array(vec![AnyValue::from("a"), AnyValue::from("b")]),
        )]);
        let err = Metadata::make_from(&input).expect_err("must fail");
        assert_eq!(
            err,
            MetadataError::UnsupportedValue {
                key: String::from("unsupported"),
                type_name: "array",
            }
        );
    }

    #[test]
    fn original_widens_back_to_runtime_kinds() {
        let meta = metadata! {
            "s" => "str",
            "i" => 9,
            "d" => 2.5,
            "t" => instant(100),
        };
        let original = meta.original().expect("has entries");
        assert_eq!(original.get("s"), Some(&AnyValue::Text(String::from("str"))));
        assert_eq!(original.get("i"), Some(&AnyValue::Integer(9)));
        assert_eq!(original.get("d"), Some(&AnyValue::Float(2.5)));
        assert_eq!(original.get("t"), Some(&AnyValue::Instant(instant(100))));
    }

    #[test]
    fn original_is_absent_for_empty_metadata() {
        assert_eq!(Metadata::default().original(), None);
        assert_eq!(metadata! {}.original(), None);
    }

    #[test]
    fn payload_make_delegates_to_make_from() {
        let input = UntypedMap::from([(String::from("n"), AnyValue::from(1))]);
        let meta = <Metadata as Payload>::make(&input).expect("must classify");
        assert_eq!(meta, Metadata::make_from(&input).expect("must classify"));
    }
}
