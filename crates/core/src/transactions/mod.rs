//! Transactions module - income and expense records.

mod transactions_model;
mod transactions_service;
mod transactions_traits;


pub use transactions_model::{
    totals_by_category, validate_amount, BalanceSummary, CategoryTotal, IncomeExpenseTotals,
    NewTransaction, Transaction, TransactionFilter, TransactionType, TransactionUpdate,
    TRANSACTION_TYPE_EXPENSE, TRANSACTION_TYPE_INCOME,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
