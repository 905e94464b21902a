use log::debug;
use std::sync::Arc;

use super::csv_export::{write_budgets_csv, write_goals_csv, write_transactions_csv};
use crate::budgets::BudgetRepositoryTrait;
use crate::errors::{Error, Result};
use crate::goals::GoalRepositoryTrait;
use crate::transactions::{TransactionFilter, TransactionRepositoryTrait};

/// CSV downloads of a user's records.
pub trait ExportServiceTrait: Send + Sync {
    /// Transactions within the filter's date bounds, newest first.
    fn export_transactions(&self, user_id: &str, filter: &TransactionFilter) -> Result<String>;
    fn export_budgets(&self, user_id: &str) -> Result<String>;
    fn export_goals(&self, user_id: &str) -> Result<String>;
}

pub struct ExportService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl ExportService {
    pub fn new(
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        ExportService {
            transaction_repo,
            budget_repo,
            goal_repo,
        }
    }
}

fn into_text(buffer: Vec<u8>) -> Result<String> {
    String::from_utf8(buffer).map_err(|e| Error::Export(e.to_string()))
}

impl ExportServiceTrait for ExportService {
    fn export_transactions(&self, user_id: &str, filter: &TransactionFilter) -> Result<String> {
        let transactions = self.transaction_repo.list(user_id, filter)?;
        debug!("Exporting {} transactions", transactions.len());
        let mut buffer = Vec::new();
        write_transactions_csv(&transactions, &mut buffer)?;
        into_text(buffer)
    }

    fn export_budgets(&self, user_id: &str) -> Result<String> {
        let budgets = self.budget_repo.list(user_id)?;
        let mut buffer = Vec::new();
        write_budgets_csv(&budgets, &mut buffer)?;
        into_text(buffer)
    }

    fn export_goals(&self, user_id: &str) -> Result<String> {
        let goals = self.goal_repo.list(user_id)?;
        let mut buffer = Vec::new();
        write_goals_csv(&goals, &mut buffer)?;
        into_text(buffer)
    }
}
