//! Database models for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use pennywise_core::categories::Category;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Category {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            created_at: db.created_at,
        }
    }
}
