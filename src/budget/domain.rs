//! Core budget domain types.

use serde::{Deserialize, Serialize};

use crate::{
    amount::PositiveAmount, budget::BudgetMonth, category::CategoryId, db::DatabaseId,
};

/// Database identifier for a budget.
pub type BudgetId = DatabaseId;

/// A spending limit for an expense category in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    /// Always an expense category.
    pub category_id: CategoryId,
    pub amount: PositiveAmount,
    pub month: BudgetMonth,
}

/// The fields of a budget that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub category_id: CategoryId,
    pub amount: PositiveAmount,
    pub month: BudgetMonth,
}

/// The request body for updating a budget.
///
/// Missing and `null` fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetPatch {
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub amount: Option<PositiveAmount>,
    #[serde(default)]
    pub month: Option<BudgetMonth>,
}

#[cfg(test)]
mod tests {
    use crate::budget::{BudgetMonth, BudgetPatch, NewBudget};

    #[test]
    fn new_budget_validates_month_and_amount() {
        let budget: NewBudget =
            serde_json::from_str(r#"{"category_id":1,"amount":400,"month":"2025-03"}"#).unwrap();

        assert_eq!(budget.month, BudgetMonth::new_unchecked("2025-03"));
        assert!(
            serde_json::from_str::<NewBudget>(r#"{"category_id":1,"amount":400,"month":"2025-3"}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<NewBudget>(r#"{"category_id":1,"amount":-1,"month":"2025-03"}"#)
                .is_err()
        );
    }

    #[test]
    fn patch_treats_null_as_absent() {
        let patch: BudgetPatch = serde_json::from_str(r#"{"month":null}"#).unwrap();

        assert_eq!(patch.month, None);
        assert_eq!(patch.amount, None);
        assert_eq!(patch.category_id, None);
    }
}
