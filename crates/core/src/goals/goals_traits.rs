use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalContribution, GoalUpdate, NewGoal, NewGoalContribution};
use async_trait::async_trait;

/// Trait for goal repository operations. Every call is scoped to `user_id`
/// and returned goals carry their contribution history.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Goals ordered by target date, earliest first.
    fn list(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn insert(&self, goal: Goal) -> Result<Goal>;
    /// Applies `update` to the stored goal in one transaction. The running
    /// total and contributions are left untouched.
    async fn update(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal>;
    /// Deletes the goal together with its contributions.
    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize>;
    /// Appends `contribution` and updates the running total in one
    /// transaction.
    async fn add_contribution(
        &self,
        user_id: &str,
        contribution: GoalContribution,
    ) -> Result<Goal>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate)
        -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;
    async fn contribute(
        &self,
        user_id: &str,
        goal_id: &str,
        contribution: NewGoalContribution,
    ) -> Result<Goal>;
}
