//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, db::DatabaseId, kind::EntryKind};

/// Database identifier for a category.
pub type CategoryId = DatabaseId;

/// A validated category name between 1 and 100 characters, without surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    const MAX_LENGTH: usize = 100;

    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if the trimmed `name`
    /// is empty or longer than 100 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 || length > Self::MAX_LENGTH {
            Err(Error::Validation(format!(
                "category name must be between 1 and {} characters",
                Self::MAX_LENGTH
            )))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user defined grouping of transactions (e.g., 'Groceries', 'Salary').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// The request body for creating a category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryData {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// The request body for updating a category.
///
/// Fields that are missing or `null` keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<EntryKind>,
}
