//! Core transaction domain types.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, amount::PositiveAmount, category::CategoryId, db::DatabaseId, kind::EntryKind,
    patch::deserialize_some,
};

/// Database identifier for a transaction.
pub type TransactionId = DatabaseId;

/// The maximum number of characters in a transaction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// An amount of money earned or spent on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: PositiveAmount,
    pub category_id: CategoryId,
    /// Always the same as the type of the category.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(with = "crate::dates")]
    pub date: Date,
    pub description: Option<String>,
}

/// The fields of a transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: PositiveAmount,
    pub category_id: CategoryId,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(with = "crate::dates")]
    pub date: Date,
    #[serde(default)]
    pub description: Option<String>,
}

/// The request body for updating a transaction.
///
/// Missing fields keep their current value. `null` clears the description
/// and is the same as missing for every other field.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionPatch {
    #[serde(default)]
    pub amount: Option<PositiveAmount>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default, rename = "type")]
    pub kind: Option<EntryKind>,
    #[serde(default, deserialize_with = "crate::dates::option::deserialize")]
    pub date: Option<Date>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

/// Filters for listing transactions. Every filter is optional and they are
/// combined with "and".
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilter {
    /// Only include transactions on or after this date.
    #[serde(default, deserialize_with = "crate::dates::option::deserialize")]
    pub start_date: Option<Date>,
    /// Only include transactions on or before this date.
    #[serde(default, deserialize_with = "crate::dates::option::deserialize")]
    pub end_date: Option<Date>,
    pub category_id: Option<CategoryId>,
    #[serde(rename = "type")]
    pub kind: Option<EntryKind>,
}

/// Check that a description is at most [MAX_DESCRIPTION_LENGTH] characters.
pub fn validate_description(description: Option<&str>) -> Result<(), Error> {
    match description {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LENGTH => Err(Error::Validation(
            format!("description must be at most {MAX_DESCRIPTION_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}
