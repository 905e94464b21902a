use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use pennywise_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use pennywise_core::{Error, Result};

use super::model::CategoryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::categories;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::user_id.eq(user_id))
            .order(categories::name.asc())
            .select(CategoryDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn get_by_id(&self, user_id: &str, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::user_id.eq(user_id))
            .select(CategoryDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Category::from)
            .ok_or_else(|| Error::NotFound("Category".to_string()))
    }

    fn name_exists(
        &self,
        user_id: &str,
        name: &str,
        excluding_id: Option<&str>,
    ) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::name.eq(name))
            .select(categories::id)
            .into_boxed();
        if let Some(category_id) = excluding_id {
            query = query.filter(categories::id.ne(category_id));
        }
        let found: Option<String> = query.first(&mut conn).optional().into_core()?;
        Ok(found.is_some())
    }

    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let row = CategoryDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: new_category.user_id,
                    name: new_category.name,
                    created_at: Utc::now().naive_utc(),
                };
                let inserted = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Category::from(inserted))
            })
            .await
    }

    async fn rename(&self, user_id: &str, category_id: &str, name: String) -> Result<Category> {
        let user_id = user_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                diesel::update(
                    categories::table
                        .filter(categories::id.eq(&category_id))
                        .filter(categories::user_id.eq(&user_id)),
                )
                .set(categories::name.eq(name))
                .returning(CategoryDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .map(Category::from)
                .ok_or_else(|| Error::NotFound("Category".to_string()))
            })
            .await
    }

    async fn delete(&self, user_id: &str, category_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    categories::table
                        .filter(categories::id.eq(&category_id))
                        .filter(categories::user_id.eq(&user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
