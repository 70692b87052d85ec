//! Helpers for sparse updates, where a request only carries the fields that change.

use serde::{Deserialize, Deserializer};

/// Deserialize a present field as `Some`, including an explicit `null`.
///
/// Used with `#[serde(default, deserialize_with = "deserialize_some")]` on an
/// `Option<Option<T>>` field so that the three cases can be told apart:
/// absent (`None`), cleared (`Some(None)`) and set (`Some(Some(value))`).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Resolve a nullable field of a sparse update against its current value.
pub fn apply_nullable<T>(update: Option<Option<T>>, current: Option<T>) -> Option<T> {
    match update {
        Some(value) => value,
        None => current,
    }
}
