use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;

use pennywise_core::goals::{Goal, GoalContribution, GoalRepositoryTrait, GoalUpdate};
use pennywise_core::{Error, Result};

use super::model::{GoalContributionDB, GoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{goal_contributions, goals};
use crate::utils::{chunk_for_sqlite, format_decimal};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

/// Loads the contributions of `goal_rows` and assembles domain goals,
/// preserving the order of `goal_rows`.
fn attach_contributions(conn: &mut SqliteConnection, goal_rows: Vec<GoalDB>) -> Result<Vec<Goal>> {
    let goal_ids: Vec<String> = goal_rows.iter().map(|g| g.id.clone()).collect();
    let mut by_goal: HashMap<String, Vec<GoalContributionDB>> = HashMap::new();

    for chunk in chunk_for_sqlite(&goal_ids) {
        let rows = goal_contributions::table
            .filter(goal_contributions::goal_id.eq_any(chunk))
            .order((goal_contributions::date.asc(), goal_contributions::id.asc()))
            .select(GoalContributionDB::as_select())
            .load(conn)
            .into_core()?;
        for row in rows {
            by_goal.entry(row.goal_id.clone()).or_default().push(row);
        }
    }

    Ok(goal_rows
        .into_iter()
        .map(|row| {
            let contributions = by_goal.remove(&row.id).unwrap_or_default();
            row.into_goal(contributions)
        })
        .collect())
}

fn load_goal(conn: &mut SqliteConnection, user_id: &str, goal_id: &str) -> Result<Goal> {
    let row = goals::table
        .filter(goals::id.eq(goal_id))
        .filter(goals::user_id.eq(user_id))
        .select(GoalDB::as_select())
        .first(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::NotFound("Goal".to_string()))?;
    attach_contributions(conn, vec![row])?
        .pop()
        .ok_or_else(|| Error::NotFound("Goal".to_string()))
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .order((goals::target_date.asc(), goals::created_at.asc()))
            .select(GoalDB::as_select())
            .load(&mut conn)
            .into_core()?;
        attach_contributions(&mut conn, rows)
    }

    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        load_goal(&mut conn, user_id, goal_id)
    }

    async fn insert(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                diesel::insert_into(goals::table)
                    .values(GoalDB::from(&goal))
                    .execute(conn)
                    .into_core()?;
                let contributions: Vec<GoalContributionDB> = goal
                    .contribution_history
                    .iter()
                    .map(GoalContributionDB::from)
                    .collect();
                if !contributions.is_empty() {
                    diesel::insert_into(goal_contributions::table)
                        .values(&contributions)
                        .execute(conn)
                        .into_core()?;
                }
                load_goal(conn, &goal.user_id, &goal.id)
            })
            .await
    }

    async fn update(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                // current_amount is owned by add_contribution and never written here.
                let mut goal = load_goal(conn, &user_id, &goal_id)?;
                goal.apply_update(update)?;

                diesel::update(
                    goals::table
                        .filter(goals::id.eq(&goal.id))
                        .filter(goals::user_id.eq(&goal.user_id)),
                )
                .set((
                    goals::title.eq(&goal.title),
                    goals::target_amount.eq(format_decimal(goal.target_amount)),
                    goals::category.eq(&goal.category),
                    goals::target_date.eq(goal.target_date),
                    goals::description.eq(&goal.description),
                    goals::icon.eq(&goal.icon),
                    goals::is_completed.eq(goal.is_completed),
                    goals::updated_at.eq(goal.updated_at),
                ))
                .execute(conn)
                .into_core()?;
                Ok(goal)
            })
            .await
    }

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let owned: Option<String> = goals::table
                    .filter(goals::id.eq(&goal_id))
                    .filter(goals::user_id.eq(&user_id))
                    .select(goals::id)
                    .first(conn)
                    .optional()
                    .into_core()?;
                if owned.is_none() {
                    return Ok(0);
                }
                diesel::delete(
                    goal_contributions::table.filter(goal_contributions::goal_id.eq(&goal_id)),
                )
                .execute(conn)
                .into_core()?;
                diesel::delete(goals::table.filter(goals::id.eq(&goal_id)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn add_contribution(
        &self,
        user_id: &str,
        contribution: GoalContribution,
    ) -> Result<Goal> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let mut goal = load_goal(conn, &user_id, &contribution.goal_id)?;
                let row = GoalContributionDB::from(&contribution);
                goal.apply_contribution(contribution);

                diesel::update(goals::table.filter(goals::id.eq(&goal.id)))
                    .set((
                        goals::current_amount.eq(format_decimal(goal.current_amount)),
                        goals::is_completed.eq(goal.is_completed),
                        goals::updated_at.eq(goal.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;
                diesel::insert_into(goal_contributions::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(goal)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_user, open_test_db};
    use chrono::NaiveDate;
    use pennywise_core::goals::{NewGoal, NewGoalContribution};
    use rust_decimal_macros::dec;

    fn goal_for(user_id: &str, title: &str, target_date: NaiveDate) -> Goal {
        Goal::create(
            user_id,
            NewGoal {
                title: Some(title.to_string()),
                target_amount: Some(dec!(1000)),
                target_date: Some(target_date),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn contribution(goal_id: &str, amount: rust_decimal::Decimal) -> GoalContribution {
        NewGoalContribution {
            amount,
            note: Some("payday".to_string()),
        }
        .into_contribution(goal_id)
    }

    #[tokio::test]
    async fn test_list_orders_by_target_date() {
        let (pool, writer, _temp_dir) = open_test_db();
        let user = create_test_user(&pool, &writer, "jo@example.com").await;
        let repo = GoalRepository::new(pool, writer);

        repo.insert(goal_for(&user, "Car", NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()))
            .await
            .unwrap();
        repo.insert(goal_for(&user, "Trip", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()))
            .await
            .unwrap();

        let titles: Vec<String> = repo
            .list(&user)
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Trip", "Car"]);
    }

    #[tokio::test]
    async fn test_contributions_accumulate_and_complete_goal() {
        let (pool, writer, _temp_dir) = open_test_db();
        let user = create_test_user(&pool, &writer, "kim@example.com").await;
        let repo = GoalRepository::new(pool, writer);

        let goal = repo
            .insert(goal_for(&user, "Laptop", NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()))
            .await
            .unwrap();

        let after_first = repo
            .add_contribution(&user, contribution(&goal.id, dec!(400)))
            .await
            .unwrap();
        assert_eq!(after_first.current_amount, dec!(400));
        assert!(!after_first.is_completed);

        let after_second = repo
            .add_contribution(&user, contribution(&goal.id, dec!(600)))
            .await
            .unwrap();
        assert_eq!(after_second.current_amount, dec!(1000));
        assert!(after_second.is_completed);

        let stored = repo.get_by_id(&user, &goal.id).unwrap();
        assert_eq!(stored.current_amount, dec!(1000));
        assert!(stored.is_completed);
        let amounts: Vec<_> = stored
            .contribution_history
            .iter()
            .map(|c| c.amount)
            .collect();
        assert_eq!(amounts, vec![dec!(400), dec!(600)]);
        assert_eq!(stored.contribution_history[0].note, "payday");
    }

    #[tokio::test]
    async fn test_contribution_to_foreign_goal_is_rejected() {
        let (pool, writer, _temp_dir) = open_test_db();
        let owner = create_test_user(&pool, &writer, "lea@example.com").await;
        let other = create_test_user(&pool, &writer, "max@example.com").await;
        let repo = GoalRepository::new(pool, writer);

        let goal = repo
            .insert(goal_for(&owner, "House", NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()))
            .await
            .unwrap();

        let err = repo
            .add_contribution(&other, contribution(&goal.id, dec!(50)))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let stored = repo.get_by_id(&owner, &goal.id).unwrap();
        assert_eq!(stored.current_amount, dec!(0));
        assert!(stored.contribution_history.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_goal_and_contributions() {
        let (pool, writer, _temp_dir) = open_test_db();
        let user = create_test_user(&pool, &writer, "ned@example.com").await;
        let repo = GoalRepository::new(pool.clone(), writer);

        let goal = repo
            .insert(goal_for(&user, "Bike", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()))
            .await
            .unwrap();
        repo.add_contribution(&user, contribution(&goal.id, dec!(25)))
            .await
            .unwrap();

        assert_eq!(repo.delete(&user, &goal.id).await.unwrap(), 1);
        assert!(repo.get_by_id(&user, &goal.id).unwrap_err().is_not_found());

        let mut conn = get_connection(&pool).unwrap();
        let remaining: i64 = goal_contributions::table
            .filter(goal_contributions::goal_id.eq(&goal.id))
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(remaining, 0);
        assert_eq!(repo.delete(&user, &goal.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_contribution_history() {
        let (pool, writer, _temp_dir) = open_test_db();
        let user = create_test_user(&pool, &writer, "ola@example.com").await;
        let repo = GoalRepository::new(pool, writer);

        let goal = repo
            .insert(goal_for(&user, "Camera", NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()))
            .await
            .unwrap();
        repo.add_contribution(&user, contribution(&goal.id, dec!(300)))
            .await
            .unwrap();

        let updated = repo
            .update(
                &user,
                &goal.id,
                GoalUpdate {
                    title: Some("Mirrorless camera".to_string()),
                    target_amount: Some(dec!(250)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Mirrorless camera");
        assert!(updated.is_completed);
        assert_eq!(updated.contribution_history.len(), 1);
    }

    #[tokio::test]
    async fn test_update_after_earlier_read_keeps_later_contribution() {
        let (pool, writer, _temp_dir) = open_test_db();
        let user = create_test_user(&pool, &writer, "pia@example.com").await;
        let repo = GoalRepository::new(pool, writer);

        let goal = repo
            .insert(goal_for(&user, "Piano", NaiveDate::from_ymd_opt(2027, 3, 1).unwrap()))
            .await
            .unwrap();
        // A caller reads the goal, then a contribution lands before its edit.
        let seen = repo.get_by_id(&user, &goal.id).unwrap();
        assert_eq!(seen.current_amount, dec!(0));
        repo.add_contribution(&user, contribution(&goal.id, dec!(200)))
            .await
            .unwrap();

        let updated = repo
            .update(
                &user,
                &seen.id,
                GoalUpdate {
                    title: Some("Grand piano".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Grand piano");
        assert_eq!(updated.current_amount, dec!(200));

        let stored = repo.get_by_id(&user, &goal.id).unwrap();
        let history_sum: rust_decimal::Decimal =
            stored.contribution_history.iter().map(|c| c.amount).sum();
        assert_eq!(stored.current_amount, history_sum);
        assert_eq!(stored.current_amount, dec!(200));
    }

    #[tokio::test]
    async fn test_update_of_foreign_goal_is_not_found() {
        let (pool, writer, _temp_dir) = open_test_db();
        let owner = create_test_user(&pool, &writer, "quinn@example.com").await;
        let other = create_test_user(&pool, &writer, "rae@example.com").await;
        let repo = GoalRepository::new(pool, writer);

        let goal = repo
            .insert(goal_for(&owner, "Boat", NaiveDate::from_ymd_opt(2031, 1, 1).unwrap()))
            .await
            .unwrap();
        let err = repo
            .update(&other, &goal.id, GoalUpdate::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
