//! Whether money was earned or spent.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Classifies a category, and therefore the transactions in it, as income or expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money coming in, e.g. salary.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl EntryKind {
    /// The lowercase name used in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            other => Err(Error::Validation(format!(
                "type must be \"income\" or \"expense\", got \"{other}\""
            ))),
        }
    }
}

impl ToSql for EntryKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EntryKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::EntryKind;

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("income".parse(), Ok(EntryKind::Income));
        assert_eq!("expense".parse(), Ok(EntryKind::Expense));
    }

    #[test]
    fn rejects_other_names() {
        assert!("Income".parse::<EntryKind>().is_err());
        assert!("transfer".parse::<EntryKind>().is_err());
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(
            serde_json::to_string(&EntryKind::Expense).unwrap(),
            r#""expense""#
        );
    }

    #[test]
    fn round_trips_through_sqlite() {
        let connection = Connection::open_in_memory().unwrap();

        let kind: EntryKind = connection
            .query_row("SELECT ?1", [EntryKind::Income], |row| row.get(0))
            .unwrap();

        assert_eq!(kind, EntryKind::Income);
    }
}
