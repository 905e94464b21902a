use crate::analytics::analytics_model::{
    BudgetVsActual, CategoryBreakdown, MonthlySummary, MonthlyTrendPoint,
};
use crate::errors::Result;
use crate::transactions::TransactionType;
use crate::utils::MonthPeriod;

/// Read-only monthly reports over a user's transactions and budgets.
pub trait AnalyticsServiceTrait: Send + Sync {
    fn get_monthly_summary(&self, user_id: &str, month: MonthPeriod) -> Result<MonthlySummary>;
    fn get_category_breakdown(
        &self,
        user_id: &str,
        month: MonthPeriod,
        transaction_type: TransactionType,
    ) -> Result<CategoryBreakdown>;
    /// The trailing trend ending at `month`, oldest month first.
    fn get_monthly_trend(&self, user_id: &str, month: MonthPeriod)
        -> Result<Vec<MonthlyTrendPoint>>;
    fn get_budget_vs_actual(&self, user_id: &str, month: MonthPeriod) -> Result<BudgetVsActual>;
}
