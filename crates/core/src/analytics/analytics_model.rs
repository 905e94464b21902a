//! Report shapes for the analytics endpoints. All amounts are rounded for
//! display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::BudgetHealth;
use crate::transactions::TransactionType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
    pub savings_rate: Decimal,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub month: u32,
    pub year: i32,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub total: Decimal,
    pub categories: Vec<CategoryShare>,
}

/// One month of the trailing income/expense trend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendPoint {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetComparison {
    pub category: String,
    pub budgeted: Decimal,
    pub actual: Decimal,
    pub difference: Decimal,
    pub percentage: Decimal,
    pub status: BudgetHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVsActual {
    pub month: u32,
    pub year: i32,
    pub comparison: Vec<BudgetComparison>,
}
