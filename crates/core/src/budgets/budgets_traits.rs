use crate::budgets::budgets_model::{Budget, BudgetStatus, BudgetUpdate, NewBudget};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for budget repository operations. Every call is scoped to `user_id`.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Budgets ordered by category name.
    fn list(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget>;
    fn find_by_category(&self, user_id: &str, category: &str) -> Result<Option<Budget>>;
    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update(&self, budget: Budget) -> Result<Budget>;
    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget>;
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()>;
    /// Status of every budget in the period window containing `today`.
    fn get_budget_status(&self, user_id: &str, today: NaiveDate) -> Result<Vec<BudgetStatus>>;
}
