use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use pennywise_core::transactions::TransactionFilter;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState, models::ExportQuery};

fn csv_attachment(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}.csv"),
            ),
        ],
        body,
    )
        .into_response()
}

#[utoipa::path(get, path = "/api/v1/export/transactions", params(ExportQuery), responses((status = 200, description = "Transactions as CSV", content_type = "text/csv", body = String)))]
pub async fn export_transactions(
    user: AuthUser,
    Query(query): Query<ExportQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let filter = TransactionFilter::from(query);
    let csv = state
        .export_service
        .export_transactions(&user.id, &filter)?;
    Ok(csv_attachment("transactions", csv))
}

#[utoipa::path(get, path = "/api/v1/export/budgets", responses((status = 200, description = "Budgets as CSV", content_type = "text/csv", body = String)))]
pub async fn export_budgets(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let csv = state.export_service.export_budgets(&user.id)?;
    Ok(csv_attachment("budgets", csv))
}

#[utoipa::path(get, path = "/api/v1/export/goals", responses((status = 200, description = "Goals as CSV", content_type = "text/csv", body = String)))]
pub async fn export_goals(user: AuthUser, State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let csv = state.export_service.export_goals(&user.id)?;
    Ok(csv_attachment("goals", csv))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/export/transactions", get(export_transactions))
        .route("/export/budgets", get(export_budgets))
        .route("/export/goals", get(export_goals))
}
