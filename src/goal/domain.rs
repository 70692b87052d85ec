//! Core goal domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    amount::{NonNegativeAmount, PositiveAmount},
    db::DatabaseId,
};

/// Database identifier for a savings goal.
pub type GoalId = DatabaseId;

/// The name of a savings goal, between 1 and 120 characters after trimming.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GoalName(String);

impl GoalName {
    const MAX_LENGTH: usize = 120;

    /// Create a goal name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the trimmed `name` is empty or longer
    /// than 120 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 || length > Self::MAX_LENGTH {
            return Err(Error::Validation(format!(
                "goal name must be between 1 and {} characters",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(name.to_owned()))
    }

    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for GoalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for GoalName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GoalName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GoalName::new(&value)
    }
}

impl From<GoalName> for String {
    fn from(value: GoalName) -> Self {
        value.0
    }
}

/// An amount of money the user is saving towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub name: GoalName,
    pub target_amount: PositiveAmount,
    pub current_amount: NonNegativeAmount,
    #[serde(with = "crate::dates::option")]
    pub deadline: Option<Date>,
}

/// The fields of a goal that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: GoalName,
    pub target_amount: PositiveAmount,
    #[serde(default)]
    pub current_amount: NonNegativeAmount,
    #[serde(default, with = "crate::dates::option")]
    pub deadline: Option<Date>,
}

/// The request body for updating a goal.
///
/// Missing fields keep their current value. `null` clears the deadline and is
/// the same as missing for every other field.
#[derive(Debug, Default, Deserialize)]
pub struct GoalPatch {
    #[serde(default)]
    pub name: Option<GoalName>,
    #[serde(default)]
    pub target_amount: Option<PositiveAmount>,
    #[serde(default)]
    pub current_amount: Option<NonNegativeAmount>,
    #[serde(default, deserialize_with = "crate::dates::patch::deserialize")]
    pub deadline: Option<Option<Date>>,
}
