use crate::errors::Result;
use crate::transactions::transactions_model::{
    BalanceSummary, CategoryTotal, NewTransaction, Transaction, TransactionFilter,
    TransactionType, TransactionUpdate,
};
use async_trait::async_trait;

/// Trait for transaction repository operations. Every call is scoped to `user_id`.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Matching transactions, newest date first, then newest creation first.
    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>>;
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    async fn create(&self, user_id: &str, new_transaction: NewTransaction)
        -> Result<Transaction>;
    async fn update(&self, transaction: Transaction) -> Result<Transaction>;
    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self, user_id: &str, filter: &TransactionFilter)
        -> Result<Vec<Transaction>>;
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;
    fn get_spending_by_category(
        &self,
        user_id: &str,
        transaction_type: TransactionType,
    ) -> Result<Vec<CategoryTotal>>;
    fn get_balance(&self, user_id: &str) -> Result<BalanceSummary>;
}
