use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use pennywise_core::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use pennywise_core::utils::today_utc;
use pennywise_core::{Error, Result};

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budgets;
use crate::utils::format_decimal;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .order(budgets::category.asc())
            .select(BudgetDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::id.eq(budget_id))
            .filter(budgets::user_id.eq(user_id))
            .select(BudgetDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Budget::from)
            .ok_or_else(|| Error::NotFound("Budget".to_string()))
    }

    fn find_by_category(&self, user_id: &str, category: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::category.eq(category))
            .select(BudgetDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Budget::from))
    }

    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let now = Utc::now().naive_utc();
                let row = BudgetDB {
                    id: Uuid::new_v4().to_string(),
                    user_id,
                    category: new_budget.category,
                    amount: format_decimal(new_budget.amount),
                    period: new_budget.period.as_str().to_string(),
                    start_date: new_budget.start_date.unwrap_or_else(today_utc),
                    created_at: now,
                    updated_at: now,
                };
                let inserted = diesel::insert_into(budgets::table)
                    .values(&row)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Budget::from(inserted))
            })
            .await
    }

    async fn update(&self, budget: Budget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                diesel::update(
                    budgets::table
                        .filter(budgets::id.eq(&budget.id))
                        .filter(budgets::user_id.eq(&budget.user_id)),
                )
                .set((
                    budgets::amount.eq(format_decimal(budget.amount)),
                    budgets::period.eq(budget.period.as_str()),
                    budgets::updated_at.eq(Utc::now().naive_utc()),
                ))
                .returning(BudgetDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .map(Budget::from)
                .ok_or_else(|| Error::NotFound("Budget".to_string()))
            })
            .await
    }

    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    budgets::table
                        .filter(budgets::id.eq(&budget_id))
                        .filter(budgets::user_id.eq(&user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_user, open_test_db};
    use chrono::NaiveDate;
    use pennywise_core::budgets::BudgetPeriod;
    use pennywise_core::errors::DatabaseError;
    use rust_decimal_macros::dec;

    fn new_budget(category: &str, amount: rust_decimal::Decimal) -> NewBudget {
        NewBudget {
            category: category.to_string(),
            amount,
            period: BudgetPeriod::Monthly,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        }
    }

    #[tokio::test]
    async fn test_budgets_listed_by_category_and_unique_per_category() {
        let (pool, writer, _temp_dir) = open_test_db();
        let user = create_test_user(&pool, &writer, "gil@example.com").await;
        let repo = BudgetRepository::new(pool, writer);

        repo.create(&user, new_budget("Transport", dec!(200)))
            .await
            .unwrap();
        repo.create(&user, new_budget("Food", dec!(450.50)))
            .await
            .unwrap();

        let budgets = repo.list(&user).unwrap();
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0].category, "Food");
        assert_eq!(budgets[0].amount, dec!(450.5));
        assert_eq!(budgets[0].period, BudgetPeriod::Monthly);

        let err = repo
            .create(&user, new_budget("Food", dec!(10)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));

        let found = repo.find_by_category(&user, "Transport").unwrap().unwrap();
        assert_eq!(found.amount, dec!(200));
        assert!(repo.find_by_category(&user, "Rent").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_changes_amount_and_period_only() {
        let (pool, writer, _temp_dir) = open_test_db();
        let user = create_test_user(&pool, &writer, "hana@example.com").await;
        let other = create_test_user(&pool, &writer, "ivan@example.com").await;
        let repo = BudgetRepository::new(pool, writer);

        let mut budget = repo
            .create(&user, new_budget("Fun", dec!(100)))
            .await
            .unwrap();
        budget.amount = dec!(150);
        budget.period = BudgetPeriod::Weekly;
        let updated = repo.update(budget.clone()).await.unwrap();
        assert_eq!(updated.amount, dec!(150));
        assert_eq!(updated.period, BudgetPeriod::Weekly);
        assert_eq!(updated.category, "Fun");
        assert_eq!(updated.start_date, budget.start_date);

        assert!(repo.get_by_id(&other, &budget.id).unwrap_err().is_not_found());
        assert_eq!(repo.delete(&other, &budget.id).await.unwrap(), 0);
        assert_eq!(repo.delete(&user, &budget.id).await.unwrap(), 1);
        assert!(repo.list(&user).unwrap().is_empty());
    }
}
