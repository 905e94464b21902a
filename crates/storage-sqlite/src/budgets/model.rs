//! Database models for budgets.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use pennywise_core::budgets::{Budget, BudgetPeriod};

use crate::utils::{parse_decimal, parse_enum};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: String,
    pub period: String,
    pub start_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        Budget {
            amount: parse_decimal(&db.amount, "budgets.amount"),
            period: parse_enum::<BudgetPeriod>(&db.period, "budgets.period"),
            id: db.id,
            user_id: db.user_id,
            category: db.category,
            start_date: db.start_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
