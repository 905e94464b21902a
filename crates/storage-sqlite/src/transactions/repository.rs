use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use pennywise_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionRepositoryTrait,
};
use pennywise_core::{Error, Result};

use super::model::{TransactionChangeset, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;
use crate::utils::format_decimal;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .into_boxed();

        if let Some(transaction_type) = filter.transaction_type {
            query = query.filter(transactions::transaction_type.eq(transaction_type.as_str()));
        }
        if let Some(ref category) = filter.category {
            query = query.filter(transactions::category.eq(category));
        }
        if let Some(start_date) = filter.start_date {
            query = query.filter(transactions::date.ge(start_date));
        }
        if let Some(end_date) = filter.end_date {
            query = query.filter(transactions::date.le(end_date));
        }

        let rows = query
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .select(TransactionDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Transaction::from)
            .ok_or_else(|| Error::NotFound("Transaction".to_string()))
    }

    async fn create(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let now = Utc::now().naive_utc();
                let row = TransactionDB {
                    id: Uuid::new_v4().to_string(),
                    user_id,
                    amount: format_decimal(new_transaction.amount),
                    category: new_transaction.category,
                    date: new_transaction.date,
                    notes: new_transaction.notes,
                    transaction_type: new_transaction.transaction_type.as_str().to_string(),
                    created_at: now,
                    updated_at: now,
                };
                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Transaction::from(inserted))
            })
            .await
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let changes =
                    TransactionChangeset::from_transaction(&transaction, Utc::now().naive_utc());
                diesel::update(
                    transactions::table
                        .filter(transactions::id.eq(&transaction.id))
                        .filter(transactions::user_id.eq(&transaction.user_id)),
                )
                .set(&changes)
                .returning(TransactionDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .map(Transaction::from)
                .ok_or_else(|| Error::NotFound("Transaction".to_string()))
            })
            .await
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(&transaction_id))
                        .filter(transactions::user_id.eq(&user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
