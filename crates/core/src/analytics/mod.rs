//! Analytics module - monthly reports.

mod analytics_model;
mod analytics_service;
mod analytics_traits;


pub use analytics_model::{
    BudgetComparison, BudgetVsActual, CategoryBreakdown, CategoryShare, MonthlySummary,
    MonthlyTrendPoint,
};
pub use analytics_service::AnalyticsService;
pub use analytics_traits::AnalyticsServiceTrait;
