use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::MetadataError;

/// Absolute instant, stored normalized to UTC and rendered as ISO8601 extended text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Parses ISO8601 extended text such as `2023-07-22T08:26:40Z`.
    ///
    /// Non-UTC offsets are accepted and converted to the same instant in UTC.
    /// Leap seconds (`:60`) are rejected since they cannot be re-encoded as written.
    pub fn parse(input: &str) -> Result<Self, MetadataError> {
        let corrupted = || MetadataError::CorruptedValue {
            field: "value",
            value: input.to_owned(),
        };

        if input.get(17..19) == Some("60") {
            return Err(corrupted());
        }
        let parsed = OffsetDateTime::parse(input, &Rfc3339).map_err(|_| corrupted())?;

        Self::from_offset_datetime(parsed)
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Result<Self, MetadataError> {
        let utc = value.to_offset(UtcOffset::UTC);
        if !(0..=9999).contains(&utc.year()) {
            return Err(MetadataError::InstantOutOfRange {
                value: utc.to_string(),
            });
        }

        Ok(Self(utc))
    }

    pub fn from_unix_seconds(seconds: i64) -> Result<Self, MetadataError> {
        let value = OffsetDateTime::from_unix_timestamp(seconds).map_err(|_| {
            MetadataError::InstantOutOfRange {
                value: format!("unix {seconds}s"),
            }
        })?;
        Self::from_offset_datetime(value)
    }

    pub fn from_unix_nanos(nanos: i128) -> Result<Self, MetadataError> {
        let value = OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|_| {
            MetadataError::InstantOutOfRange {
                value: format!("unix {nanos}ns"),
            }
        })?;
        Self::from_offset_datetime(value)
    }

    pub fn unix_seconds(self) -> i64 {
        self.0.unix_timestamp()
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn format_iso8601(self) -> String {
        self.0
            .format(&Rfc3339)
            .expect("Timestamp years are always within the RFC3339 range")
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn parses_utc_timestamp() {
        let parsed = Timestamp::parse("2023-07-22T08:26:40Z").expect("must parse");
        assert_eq!(parsed.format_iso8601(), "2023-07-22T08:26:40Z");
        assert_eq!(parsed.unix_seconds(), 1_690_014_400);
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let parsed = Timestamp::parse("2023-07-22T10:26:40+02:00").expect("must parse");
        assert_eq!(parsed.format_iso8601(), "2023-07-22T08:26:40Z");
        assert_eq!(
            parsed,
            Timestamp::parse("2023-07-22T08:26:40Z").expect("must parse")
        );
    }

    #[test]
    fn keeps_fractional_seconds() {
        let parsed = Timestamp::parse("2023-07-22T08:26:40.25Z").expect("must parse");
        assert_eq!(parsed.format_iso8601(), "2023-07-22T08:26:40.25Z");
        assert_eq!(parsed.into_inner(), datetime!(2023-07-22 08:26:40.25 UTC));
    }

    #[test]
    fn rejects_non_iso8601_text() {
        let err = Timestamp::parse("not-a-date").expect_err("must fail");
        assert_eq!(
            err,
            MetadataError::CorruptedValue {
                field: "value",
                value: String::from("not-a-date"),
            }
        );

        for input in ["2023-07-22", "2023-07-22T08:26:40", "1690014400"] {
            assert!(Timestamp::parse(input).is_err(), "{input} must be rejected");
        }
    }

    #[test]
    fn rejects_leap_seconds() {
        let err = Timestamp::parse("2016-12-31T23:59:60Z").expect_err("must fail");
        assert_eq!(
            err,
            MetadataError::CorruptedValue {
                field: "value",
                value: String::from("2016-12-31T23:59:60Z"),
            }
        );
        assert!(Timestamp::parse("2016-12-31T23:59:59Z").is_ok());
    }

    #[test]
    fn builds_sub_second_instants_from_nanos() {
        let instant = Timestamp::from_unix_nanos(100_100_000_000).expect("in range");
        assert_eq!(instant.format_iso8601(), "1970-01-01T00:01:40.1Z");
    }

    #[test]
    fn rejects_unrepresentable_years() {
        let err = Timestamp::from_unix_seconds(-100_000_000_000).expect_err("must fail");
        assert!(matches!(err, MetadataError::InstantOutOfRange { .. }));
    }

    #[test]
    fn epoch_offsets_format_as_whole_seconds() {
        let instant = Timestamp::from_unix_seconds(100).expect("in range");
        assert_eq!(instant.to_string(), "1970-01-01T00:01:40Z");
    }
}
