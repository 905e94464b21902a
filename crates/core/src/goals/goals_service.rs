use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::goals_model::{Goal, GoalUpdate, NewGoal, NewGoalContribution};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::{Error, Result};

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repo }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.goal_repo.list(user_id)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.goal_repo.get_by_id(user_id, goal_id)
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let goal = Goal::create(user_id, new_goal)?;
        debug!("Creating goal '{}' for user {}", goal.title, user_id);
        self.goal_repo.insert(goal).await
    }

    async fn update_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<Goal> {
        debug!("Updating goal {} for user {}", goal_id, user_id);
        self.goal_repo.update(user_id, goal_id, update).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        match self.goal_repo.delete(user_id, goal_id).await? {
            0 => Err(Error::NotFound("Goal".to_string())),
            _ => Ok(()),
        }
    }

    async fn contribute(
        &self,
        user_id: &str,
        goal_id: &str,
        contribution: NewGoalContribution,
    ) -> Result<Goal> {
        contribution.validate()?;
        debug!("Adding contribution of {} to goal {}", contribution.amount, goal_id);
        self.goal_repo
            .add_contribution(user_id, contribution.into_contribution(goal_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::GoalContribution;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockGoalRepository {
        goals: Mutex<Vec<Goal>>,
    }

    #[async_trait]
    impl GoalRepositoryTrait for MockGoalRepository {
        fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
            let mut goals: Vec<Goal> = self
                .goals
                .lock()
                .unwrap()
                .iter()
                .filter(|g| g.user_id == user_id)
                .cloned()
                .collect();
            goals.sort_by_key(|g| g.target_date);
            Ok(goals)
        }

        fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
            self.goals
                .lock()
                .unwrap()
                .iter()
                .find(|g| g.user_id == user_id && g.id == goal_id)
                .cloned()
                .ok_or_else(|| Error::NotFound("Goal".to_string()))
        }

        async fn insert(&self, goal: Goal) -> Result<Goal> {
            self.goals.lock().unwrap().push(goal.clone());
            Ok(goal)
        }

        async fn update(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
            let mut goals = self.goals.lock().unwrap();
            let stored = goals
                .iter_mut()
                .find(|g| g.user_id == user_id && g.id == goal_id)
                .ok_or_else(|| Error::NotFound("Goal".to_string()))?;
            stored.apply_update(update)?;
            Ok(stored.clone())
        }

        async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize> {
            let mut goals = self.goals.lock().unwrap();
            let before = goals.len();
            goals.retain(|g| !(g.user_id == user_id && g.id == goal_id));
            Ok(before - goals.len())
        }

        async fn add_contribution(
            &self,
            user_id: &str,
            contribution: GoalContribution,
        ) -> Result<Goal> {
            let mut goals = self.goals.lock().unwrap();
            let goal = goals
                .iter_mut()
                .find(|g| g.user_id == user_id && g.id == contribution.goal_id)
                .ok_or_else(|| Error::NotFound("Goal".to_string()))?;
            goal.apply_contribution(contribution);
            Ok(goal.clone())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_goal(title: &str, target: rust_decimal::Decimal, target_date: NaiveDate) -> NewGoal {
        NewGoal {
            title: Some(title.to_string()),
            target_amount: Some(target),
            target_date: Some(target_date),
            ..Default::default()
        }
    }

    fn service() -> GoalService {
        GoalService::new(Arc::new(MockGoalRepository::default()))
    }

    #[tokio::test]
    async fn test_goals_are_listed_by_target_date() {
        let service = service();
        service
            .create_goal("u1", new_goal("Car", dec!(5000), date(2027, 6, 1)))
            .await
            .unwrap();
        service
            .create_goal("u1", new_goal("Trip", dec!(800), date(2025, 8, 1)))
            .await
            .unwrap();
        service
            .create_goal("u2", new_goal("Other", dec!(1), date(2020, 1, 1)))
            .await
            .unwrap();

        let titles: Vec<String> = service
            .get_goals("u1")
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Trip", "Car"]);
    }

    #[tokio::test]
    async fn test_contribute_validates_and_completes() {
        let service = service();
        let goal = service
            .create_goal("u1", new_goal("Laptop", dec!(1500), date(2026, 1, 1)))
            .await
            .unwrap();

        let err = service
            .contribute(
                "u1",
                &goal.id,
                NewGoalContribution {
                    amount: dec!(-1),
                    note: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = service
            .contribute(
                "u2",
                &goal.id,
                NewGoalContribution {
                    amount: dec!(10),
                    note: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let updated = service
            .contribute(
                "u1",
                &goal.id,
                NewGoalContribution {
                    amount: dec!(1500),
                    note: Some("savings".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(updated.is_completed);
        assert_eq!(updated.current_amount, dec!(1500));
        assert_eq!(updated.contribution_history.len(), 1);
        assert_eq!(updated.contribution_history[0].goal_id, goal.id);
    }

    #[tokio::test]
    async fn test_update_and_delete_are_owner_scoped() {
        let service = service();
        let goal = service
            .create_goal("u1", new_goal("House", dec!(100000), date(2035, 1, 1)))
            .await
            .unwrap();

        assert!(service
            .update_goal("u2", &goal.id, GoalUpdate::default())
            .await
            .unwrap_err()
            .is_not_found());

        let updated = service
            .update_goal(
                "u1",
                &goal.id,
                GoalUpdate {
                    description: Some("Down payment".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "Down payment");

        assert!(service.delete_goal("u2", &goal.id).await.is_err());
        service.delete_goal("u1", &goal.id).await.unwrap();
        assert!(service.get_goal("u1", &goal.id).unwrap_err().is_not_found());
    }
}
