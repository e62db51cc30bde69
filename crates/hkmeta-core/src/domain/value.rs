use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::de::{self, Error as DeError, IgnoredAny, MapAccess, Unexpected, Visitor};
use serde::ser::{Error as SerError, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

use crate::{MetadataError, Timestamp};

const FIELDS: &[&str] = &["type", "value"];

/// Discriminant written to the `type` field of an encoded [`MetadataValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Date,
    Double,
    Int,
}

impl ValueType {
    pub const ALL: [Self; 4] = [Self::String, Self::Date, Self::Double, Self::Int];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Date => "date",
            Self::Double => "double",
            Self::Int => "int",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = MetadataError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "string" => Ok(Self::String),
            "date" => Ok(Self::Date),
            "double" => Ok(Self::Double),
            "int" => Ok(Self::Int),
            other => Err(MetadataError::UnknownDiscriminant {
                value: other.to_owned(),
            }),
        }
    }
}

impl Serialize for ValueType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A single metadata entry value.
///
/// Encodes as `{"type": <discriminant>, "value": <payload>}`. Equality is
/// structural per variant, so `Int(3)` never equals `Double(3.0)`.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Date(Timestamp),
    Double(f64),
    Int(i64),
}

impl MetadataValue {
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Date(_) => ValueType::Date,
            Self::Double(_) => ValueType::Double,
            Self::Int(_) => ValueType::Int,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub const fn as_date(&self) -> Option<Timestamp> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl Display for MetadataValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Date(value) => Display::fmt(value, f),
            Self::Double(value) => Display::fmt(value, f),
            Self::Int(value) => Display::fmt(value, f),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<f32> for MetadataValue {
    fn from(value: f32) -> Self {
        Self::Double(f64::from(value))
    }
}

impl From<Timestamp> for MetadataValue {
    fn from(value: Timestamp) -> Self {
        Self::Date(value)
    }
}

impl TryFrom<OffsetDateTime> for MetadataValue {
    type Error = MetadataError;

    fn try_from(value: OffsetDateTime) -> Result<Self, Self::Error> {
        Timestamp::from_offset_datetime(value).map(Self::Date)
    }
}

impl Serialize for MetadataValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("MetadataValue", FIELDS.len())?;
        state.serialize_field("type", self.value_type().as_str())?;
        match self {
            Self::String(value) => state.serialize_field("value", value)?,
            Self::Date(value) => state.serialize_field("value", &value.format_iso8601())?,
            Self::Double(value) => {
                if !value.is_finite() {
                    return Err(S::Error::custom(MetadataError::NonFiniteDouble {
                        value: value.to_string(),
                    }));
                }
                state.serialize_field("value", value)?;
            }
            Self::Int(value) => state.serialize_field("value", value)?,
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for MetadataValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("MetadataValue", FIELDS, MetadataValueVisitor)
    }
}

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum Field {
    Type,
    Value,
    #[serde(other)]
    Other,
}

/// `value` read before `type` was known.
enum RawScalar {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl RawScalar {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Self::Text(value) => Unexpected::Str(value),
            Self::Signed(value) => Unexpected::Signed(*value),
            Self::Unsigned(value) => Unexpected::Unsigned(*value),
            Self::Float(value) => Unexpected::Float(*value),
        }
    }

    fn resolve<E: de::Error>(self, kind: ValueType) -> Result<MetadataValue, E> {
        match (kind, self) {
            (ValueType::String, Self::Text(value)) => Ok(MetadataValue::String(value)),
            (ValueType::Date, Self::Text(value)) => parse_date(&value),
            (ValueType::Double, Self::Float(value)) => Ok(MetadataValue::Double(value)),
            (ValueType::Double, Self::Signed(value)) => Ok(MetadataValue::Double(value as f64)),
            (ValueType::Double, Self::Unsigned(value)) => Ok(MetadataValue::Double(value as f64)),
            (ValueType::Int, Self::Signed(value)) => Ok(MetadataValue::Int(value)),
            (ValueType::Int, Self::Unsigned(value)) => i64::try_from(value)
                .map(MetadataValue::Int)
                .map_err(|_| {
                    E::invalid_value(Unexpected::Unsigned(value), &"a signed 64-bit integer")
                }),
            (kind, raw) => Err(E::invalid_type(raw.unexpected(), &expected_payload(kind))),
        }
    }
}

impl<'de> Deserialize<'de> for RawScalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawScalarVisitor;

        impl<'de> Visitor<'de> for RawScalarVisitor {
            type Value = RawScalar;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string or a number")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(RawScalar::Text(value.to_owned()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(RawScalar::Text(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(RawScalar::Signed(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(RawScalar::Unsigned(value))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(RawScalar::Float(value))
            }
        }

        deserializer.deserialize_any(RawScalarVisitor)
    }
}

enum Pending {
    Decoded(MetadataValue),
    Raw(RawScalar),
}

struct MetadataValueVisitor;

impl<'de> Visitor<'de> for MetadataValueVisitor {
    type Value = MetadataValue;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object with `type` and `value` fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut kind: Option<ValueType> = None;
        let mut pending: Option<Pending> = None;

        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Type => {
                    if kind.is_some() {
                        return Err(A::Error::duplicate_field("type"));
                    }
                    let raw = map.next_value::<String>()?;
                    kind = Some(raw.parse::<ValueType>().map_err(A::Error::custom)?);
                }
                Field::Value => {
                    if pending.is_some() {
                        return Err(A::Error::duplicate_field("value"));
                    }
                    pending = Some(match kind {
                        Some(kind) => Pending::Decoded(next_typed_value(&mut map, kind)?),
                        None => Pending::Raw(map.next_value()?),
                    });
                }
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let kind = kind.ok_or_else(|| A::Error::missing_field("type"))?;
        match pending.ok_or_else(|| A::Error::missing_field("value"))? {
            Pending::Decoded(value) => Ok(value),
            Pending::Raw(raw) => raw.resolve(kind),
        }
    }
}

fn next_typed_value<'de, A>(map: &mut A, kind: ValueType) -> Result<MetadataValue, A::Error>
where
    A: MapAccess<'de>,
{
    match kind {
        ValueType::String => map.next_value().map(MetadataValue::String),
        ValueType::Date => {
            let text = map.next_value::<String>()?;
            parse_date(&text)
        }
        ValueType::Double => map.next_value().map(MetadataValue::Double),
        ValueType::Int => map.next_value().map(MetadataValue::Int),
    }
}

fn parse_date<E: de::Error>(text: &str) -> Result<MetadataValue, E> {
    Timestamp::parse(text)
        .map(MetadataValue::Date)
        .map_err(E::custom)
}

const fn expected_payload(kind: ValueType) -> &'static str {
    match kind {
        ValueType::String => "a string",
        ValueType::Date => "an ISO8601 date string",
        ValueType::Double => "a 64-bit float",
        ValueType::Int => "a signed 64-bit integer",
    }
}
