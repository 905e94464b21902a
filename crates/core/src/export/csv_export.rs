//! CSV rendering of a user's records.

use std::io::Write;

use crate::budgets::Budget;
use crate::errors::{Error, Result};
use crate::goals::Goal;
use crate::transactions::Transaction;

const TRANSACTION_HEADERS: [&str; 5] = ["Date", "Type", "Category", "Amount", "Notes"];
const BUDGET_HEADERS: [&str; 4] = ["Category", "Amount", "Period", "Created At"];
const GOAL_HEADERS: [&str; 7] = [
    "Title",
    "Target Amount",
    "Current Amount",
    "Target Date",
    "Category",
    "Description",
    "Is Completed",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn finish<W: Write>(mut writer: csv::Writer<W>) -> Result<()> {
    writer.flush().map_err(|e| Error::Export(e.to_string()))
}

pub fn write_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(TRANSACTION_HEADERS)?;
    for transaction in transactions {
        csv.write_record([
            transaction.date.to_string(),
            transaction.transaction_type.to_string(),
            transaction.category.clone(),
            transaction.amount.to_string(),
            transaction.notes.clone().unwrap_or_default(),
        ])?;
    }
    finish(csv)
}

pub fn write_budgets_csv<W: Write>(budgets: &[Budget], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(BUDGET_HEADERS)?;
    for budget in budgets {
        csv.write_record([
            budget.category.clone(),
            budget.amount.to_string(),
            budget.period.to_string(),
            budget.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ])?;
    }
    finish(csv)
}

pub fn write_goals_csv<W: Write>(goals: &[Goal], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(GOAL_HEADERS)?;
    for goal in goals {
        csv.write_record([
            goal.title.clone(),
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.target_date.to_string(),
            goal.category.clone(),
            goal.description.clone(),
            goal.is_completed.to_string(),
        ])?;
    }
    finish(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::TransactionType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_transactions_csv_quotes_fields_with_commas() {
        let created = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let transactions = vec![Transaction {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            amount: dec!(12.50),
            category: "Food".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            notes: Some("lunch, with team".to_string()),
            transaction_type: TransactionType::Expense,
            created_at: created,
            updated_at: created,
        }];

        let output = render(|buffer| write_transactions_csv(&transactions, buffer));
        assert_eq!(
            output,
            "Date,Type,Category,Amount,Notes\n2024-03-01,expense,Food,12.50,\"lunch, with team\"\n"
        );
    }

    #[test]
    fn test_empty_export_still_has_headers() {
        let output = render(|buffer| write_goals_csv(&[], buffer));
        assert_eq!(
            output,
            "Title,Target Amount,Current Amount,Target Date,Category,Description,Is Completed\n"
        );
        let output = render(|buffer| write_budgets_csv(&[], buffer));
        assert_eq!(output, "Category,Amount,Period,Created At\n");
    }
}
