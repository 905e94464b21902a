use chrono::Datelike;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::analytics_model::{
    BudgetComparison, BudgetVsActual, CategoryBreakdown, CategoryShare, MonthlySummary,
    MonthlyTrendPoint,
};
use super::analytics_traits::AnalyticsServiceTrait;
use crate::budgets::{utilization_percentage, BudgetHealth, BudgetRepositoryTrait};
use crate::constants::TREND_MONTHS;
use crate::errors::Result;
use crate::transactions::{
    totals_by_category, IncomeExpenseTotals, TransactionFilter, TransactionRepositoryTrait,
    TransactionType,
};
use crate::utils::{round_display, DateRange, MonthPeriod};

/// `part` as a percentage of `whole`; zero when `whole` is zero.
fn share_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

pub struct AnalyticsService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
}

impl AnalyticsService {
    pub fn new(
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
    ) -> Self {
        AnalyticsService {
            transaction_repo,
            budget_repo,
        }
    }
}

impl AnalyticsServiceTrait for AnalyticsService {
    fn get_monthly_summary(&self, user_id: &str, month: MonthPeriod) -> Result<MonthlySummary> {
        let transactions = self
            .transaction_repo
            .list(user_id, &TransactionFilter::in_range(month.range()))?;
        let totals: IncomeExpenseTotals = transactions.iter().collect();
        let savings = totals.savings();

        Ok(MonthlySummary {
            income: round_display(totals.income),
            expenses: round_display(totals.expenses),
            savings: round_display(savings),
            savings_rate: round_display(share_of(savings, totals.income)),
            month: month.month(),
            year: month.year(),
        })
    }

    fn get_category_breakdown(
        &self,
        user_id: &str,
        month: MonthPeriod,
        transaction_type: TransactionType,
    ) -> Result<CategoryBreakdown> {
        let transactions = self.transaction_repo.list(
            user_id,
            &TransactionFilter::for_type_in_range(transaction_type, month.range()),
        )?;
        let totals = totals_by_category(&transactions);
        let total: Decimal = totals.iter().map(|t| t.amount).sum();

        let categories = totals
            .into_iter()
            .map(|t| CategoryShare {
                percentage: round_display(share_of(t.amount, total)),
                amount: round_display(t.amount),
                category: t.category,
                count: t.count,
            })
            .collect();

        Ok(CategoryBreakdown {
            month: month.month(),
            year: month.year(),
            transaction_type,
            total: round_display(total),
            categories,
        })
    }

    fn get_monthly_trend(
        &self,
        user_id: &str,
        month: MonthPeriod,
    ) -> Result<Vec<MonthlyTrendPoint>> {
        let months = month.trailing(TREND_MONTHS)?;
        let Some(first) = months.first() else {
            return Ok(Vec::new());
        };
        debug!(
            "Building {}-month trend from {} to {}",
            months.len(),
            first.first_day(),
            month.last_day()
        );

        let transactions = self.transaction_repo.list(
            user_id,
            &TransactionFilter::in_range(DateRange::new(first.first_day(), month.last_day())),
        )?;

        let mut buckets: HashMap<(i32, u32), IncomeExpenseTotals> = HashMap::new();
        for transaction in &transactions {
            buckets
                .entry((transaction.date.year(), transaction.date.month()))
                .or_default()
                .add(transaction);
        }

        Ok(months
            .iter()
            .map(|m| {
                let totals = buckets
                    .get(&(m.year(), m.month()))
                    .copied()
                    .unwrap_or_default();
                MonthlyTrendPoint {
                    year: m.year(),
                    month: m.month(),
                    income: round_display(totals.income),
                    expenses: round_display(totals.expenses),
                    savings: round_display(totals.savings()),
                }
            })
            .collect())
    }

    fn get_budget_vs_actual(&self, user_id: &str, month: MonthPeriod) -> Result<BudgetVsActual> {
        let budgets = self.budget_repo.list(user_id)?;
        let expenses = self.transaction_repo.list(
            user_id,
            &TransactionFilter::for_type_in_range(TransactionType::Expense, month.range()),
        )?;

        let mut actual_by_category: HashMap<&str, Decimal> = HashMap::new();
        for transaction in &expenses {
            *actual_by_category
                .entry(transaction.category.as_str())
                .or_default() += transaction.amount;
        }

        let comparison = budgets
            .iter()
            .map(|budget| {
                let actual = actual_by_category
                    .get(budget.category.as_str())
                    .copied()
                    .unwrap_or_default();
                let percentage = utilization_percentage(actual, budget.amount);
                BudgetComparison {
                    category: budget.category.clone(),
                    budgeted: budget.amount,
                    actual: round_display(actual),
                    difference: round_display(budget.amount - actual),
                    percentage: round_display(percentage),
                    status: BudgetHealth::from_percentage(percentage),
                }
            })
            .collect();

        Ok(BudgetVsActual {
            month: month.month(),
            year: month.year(),
            comparison,
        })
    }
}
