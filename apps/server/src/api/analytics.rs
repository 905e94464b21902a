use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use pennywise_core::analytics::{
    BudgetVsActual, CategoryBreakdown, MonthlySummary, MonthlyTrendPoint,
};
use pennywise_core::utils::today_utc;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState, models::ReportQuery};

#[utoipa::path(get, path = "/api/v1/analytics/monthly-summary", params(ReportQuery), responses((status = 200, description = "Income, expenses and savings rate for the month"), (status = 400)))]
pub async fn monthly_summary(
    user: AuthUser,
    Query(query): Query<ReportQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MonthlySummary>> {
    let summary = state
        .analytics_service
        .get_monthly_summary(&user.id, query.period(today_utc())?)?;
    Ok(Json(summary))
}

#[utoipa::path(get, path = "/api/v1/analytics/category-breakdown", params(ReportQuery), responses((status = 200, description = "Per-category totals and shares for the month"), (status = 400)))]
pub async fn category_breakdown(
    user: AuthUser,
    Query(query): Query<ReportQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CategoryBreakdown>> {
    let breakdown = state.analytics_service.get_category_breakdown(
        &user.id,
        query.period(today_utc())?,
        query.transaction_type()?,
    )?;
    Ok(Json(breakdown))
}

#[utoipa::path(get, path = "/api/v1/analytics/monthly-trend", params(ReportQuery), responses((status = 200, description = "Six months ending at the requested month"), (status = 400)))]
pub async fn monthly_trend(
    user: AuthUser,
    Query(query): Query<ReportQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MonthlyTrendPoint>>> {
    let trend = state
        .analytics_service
        .get_monthly_trend(&user.id, query.period(today_utc())?)?;
    Ok(Json(trend))
}

#[utoipa::path(get, path = "/api/v1/analytics/budget-vs-actual", params(ReportQuery), responses((status = 200, description = "Each budget against the month's spending"), (status = 400)))]
pub async fn budget_vs_actual(
    user: AuthUser,
    Query(query): Query<ReportQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetVsActual>> {
    let report = state
        .analytics_service
        .get_budget_vs_actual(&user.id, query.period(today_utc())?)?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analytics/monthly-summary", get(monthly_summary))
        .route("/analytics/category-breakdown", get(category_breakdown))
        .route("/analytics/monthly-trend", get(monthly_trend))
        .route("/analytics/budget-vs-actual", get(budget_vs_actual))
}
