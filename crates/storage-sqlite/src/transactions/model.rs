//! Database models for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use pennywise_core::transactions::{Transaction, TransactionType};

use crate::utils::{format_decimal, parse_decimal, parse_enum};

/// Database model for transactions. `amount` is stored as decimal text.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub transaction_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Mutable columns of a transaction.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(treat_none_as_null = true)]
pub struct TransactionChangeset {
    pub amount: String,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub transaction_type: String,
    pub updated_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Transaction {
            amount: parse_decimal(&db.amount, "transactions.amount"),
            transaction_type: parse_enum::<TransactionType>(
                &db.transaction_type,
                "transactions.transaction_type",
            ),
            id: db.id,
            user_id: db.user_id,
            category: db.category,
            date: db.date,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl TransactionChangeset {
    pub fn from_transaction(transaction: &Transaction, updated_at: NaiveDateTime) -> Self {
        TransactionChangeset {
            amount: format_decimal(transaction.amount),
            category: transaction.category.clone(),
            date: transaction.date,
            notes: transaction.notes.clone(),
            transaction_type: transaction.transaction_type.as_str().to_string(),
            updated_at,
        }
    }
}
