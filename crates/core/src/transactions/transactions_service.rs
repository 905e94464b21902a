use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::transactions_model::{
    totals_by_category, BalanceSummary, CategoryTotal, IncomeExpenseTotals, NewTransaction,
    Transaction, TransactionFilter, TransactionType, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::utils::round_display;
use crate::errors::{Error, Result};

pub struct TransactionService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(transaction_repo: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { transaction_repo }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        self.transaction_repo.list(user_id, filter)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.transaction_repo.get_by_id(user_id, transaction_id)
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        mut new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        debug!(
            "Creating {} transaction of {} in '{}' for user {}",
            new_transaction.transaction_type,
            new_transaction.amount,
            new_transaction.category,
            user_id
        );
        self.transaction_repo.create(user_id, new_transaction).await
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut transaction = self.transaction_repo.get_by_id(user_id, transaction_id)?;
        transaction.apply_update(update)?;
        self.transaction_repo.update(transaction).await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        match self.transaction_repo.delete(user_id, transaction_id).await? {
            0 => Err(Error::NotFound("Transaction".to_string())),
            _ => Ok(()),
        }
    }

    fn get_spending_by_category(
        &self,
        user_id: &str,
        transaction_type: TransactionType,
    ) -> Result<Vec<CategoryTotal>> {
        let filter = TransactionFilter {
            transaction_type: Some(transaction_type),
            ..Default::default()
        };
        let transactions = self.transaction_repo.list(user_id, &filter)?;
        Ok(totals_by_category(&transactions)
            .into_iter()
            .map(|mut total| {
                total.amount = round_display(total.amount);
                total
            })
            .collect())
    }

    fn get_balance(&self, user_id: &str) -> Result<BalanceSummary> {
        let transactions = self
            .transaction_repo
            .list(user_id, &TransactionFilter::default())?;
        Ok(transactions.iter().collect::<IncomeExpenseTotals>().into())
    }
}
