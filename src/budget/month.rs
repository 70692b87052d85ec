//! The calendar month a budget applies to.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A month in the form "YYYY-MM", e.g. "2025-03".
///
/// Months compare in calendar order because the year comes first and both
/// parts are zero padded.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BudgetMonth(String);

impl BudgetMonth {
    /// Parse a budget month.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `month` is not four digits, a dash and
    /// two digits, or if the month number is not between 01 and 12.
    pub fn new(month: &str) -> Result<Self, Error> {
        let invalid =
            || Error::Validation(format!("month must look like YYYY-MM, got \"{month}\""));

        let (year, month_number) = month.split_once('-').ok_or_else(invalid)?;

        let all_digits = |text: &str| text.chars().all(|c| c.is_ascii_digit());

        if year.len() != 4
            || month_number.len() != 2
            || !all_digits(year)
            || !all_digits(month_number)
        {
            return Err(invalid());
        }

        match month_number.parse::<u8>() {
            Ok(1..=12) => Ok(Self(month.to_owned())),
            _ => Err(Error::Validation(format!(
                "month must be between 01 and 12, got \"{month_number}\""
            ))),
        }
    }

    /// Create a budget month without validation.
    pub fn new_unchecked(month: &str) -> Self {
        Self(month.to_owned())
    }
}

impl AsRef<str> for BudgetMonth {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for BudgetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BudgetMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetMonth::new(s)
    }
}

impl TryFrom<String> for BudgetMonth {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BudgetMonth::new(&value)
    }
}

impl From<BudgetMonth> for String {
    fn from(value: BudgetMonth) -> Self {
        value.0
    }
}

impl ToSql for BudgetMonth {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for BudgetMonth {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(BudgetMonth::new_unchecked)
    }
}
