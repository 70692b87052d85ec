//! Income and expense transactions, each filed under a category of the same type.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{TransactionState, create_transaction_endpoint};
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_transaction,
    query_transactions, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{
    NewTransaction, Transaction, TransactionFilter, TransactionId, TransactionPatch,
    validate_description,
};
pub use edit::update_transaction_endpoint;
pub use list::list_transactions_endpoint;
