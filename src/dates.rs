//! Specifies how to serialize a [time::Date] as an ISO 8601 calendar date, e.g. "2025-01-31".
//!
//! Use with `#[serde(with = "crate::dates")]`, or the [option] and [patch]
//! submodules for optional fields.

use serde::{Deserialize, Deserializer, Serializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// Date format used on the wire, e.g. "2025-01-31".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse a date in [DATE_FORMAT].
pub fn parse(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, DATE_FORMAT)
}

pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = date
        .format(DATE_FORMAT)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

/// Serialize an optional date, using `null` for `None`.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => super::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Deserialize a nullable date in a sparse update.
///
/// Combine with `#[serde(default)]` so that an absent field becomes `None`,
/// `null` becomes `Some(None)` and a date becomes `Some(Some(date))`.
pub mod patch {
    use serde::Deserializer;
    use time::Date;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<Date>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        super::option::deserialize(deserializer).map(Some)
    }
}
