//! Transactions domain models and aggregation helpers.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};
use crate::utils::{round_display, DateRange};

pub const TRANSACTION_TYPE_INCOME: &str = "income";
pub const TRANSACTION_TYPE_EXPENSE: &str = "expense";

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => TRANSACTION_TYPE_INCOME,
            TransactionType::Expense => TRANSACTION_TYPE_EXPENSE,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            TRANSACTION_TYPE_INCOME => Ok(TransactionType::Income),
            TRANSACTION_TYPE_EXPENSE => Ok(TransactionType::Expense),
            other => Err(Error::invalid_input(format!(
                "Transaction type must be 'income' or 'expense', got '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a single income or expense record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub transaction_type: TransactionType,
}

impl NewTransaction {
    /// Validates and normalizes text fields in place.
    pub fn validate(&mut self) -> Result<()> {
        validate_amount(self.amount)?;
        self.category = validate_category_label(&self.category)?;
        self.notes = normalize_notes(self.notes.take());
        Ok(())
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub transaction_type: Option<TransactionType>,
}

impl Transaction {
    /// Applies a partial update, validating every provided field.
    pub fn apply_update(&mut self, update: TransactionUpdate) -> Result<()> {
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
            self.amount = amount;
        }
        if let Some(category) = update.category {
            self.category = validate_category_label(&category)?;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if update.notes.is_some() {
            self.notes = normalize_notes(update.notes);
        }
        if let Some(transaction_type) = update.transaction_type {
            self.transaction_type = transaction_type;
        }
        Ok(())
    }
}

/// Optional list filters. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn for_type_in_range(transaction_type: TransactionType, range: DateRange) -> Self {
        TransactionFilter {
            transaction_type: Some(transaction_type),
            category: None,
            start_date: Some(range.start),
            end_date: Some(range.end),
        }
    }

    pub fn in_range(range: DateRange) -> Self {
        TransactionFilter {
            start_date: Some(range.start),
            end_date: Some(range.end),
            ..Default::default()
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.transaction_type
            .is_none_or(|t| t == transaction.transaction_type)
            && self
                .category
                .as_ref()
                .is_none_or(|c| *c == transaction.category)
            && self.start_date.is_none_or(|d| transaction.date >= d)
            && self.end_date.is_none_or(|d| transaction.date <= d)
    }
}

/// Sum and count of transactions sharing a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
}

/// All-time income against expenses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Income and expense totals of a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IncomeExpenseTotals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl IncomeExpenseTotals {
    pub fn add(&mut self, transaction: &Transaction) {
        match transaction.transaction_type {
            TransactionType::Income => self.income += transaction.amount,
            TransactionType::Expense => self.expenses += transaction.amount,
        }
    }

    pub fn savings(&self) -> Decimal {
        self.income - self.expenses
    }
}

impl<'a> FromIterator<&'a Transaction> for IncomeExpenseTotals {
    fn from_iter<I: IntoIterator<Item = &'a Transaction>>(iter: I) -> Self {
        let mut totals = IncomeExpenseTotals::default();
        for transaction in iter {
            totals.add(transaction);
        }
        totals
    }
}

impl From<IncomeExpenseTotals> for BalanceSummary {
    fn from(totals: IncomeExpenseTotals) -> Self {
        BalanceSummary {
            income: round_display(totals.income),
            expenses: round_display(totals.expenses),
            balance: round_display(totals.savings()),
        }
    }
}

/// Groups transactions by category label, largest amount first and ties
/// broken by name. Amounts are not rounded.
pub fn totals_by_category<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut grouped: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for transaction in transactions {
        let entry = grouped
            .entry(transaction.category.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += transaction.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = grouped
        .into_iter()
        .map(|(category, (amount, count))| CategoryTotal {
            category: category.to_string(),
            amount,
            count,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}

pub fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_input("Amount must be greater than zero"));
    }
    Ok(())
}

fn validate_category_label(category: &str) -> Result<String> {
    let category = category.trim();
    if category.is_empty() {
        return Err(Error::invalid_input("Category is required"));
    }
    Ok(category.to_string())
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
