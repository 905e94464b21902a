use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use pennywise_core::budgets::{Budget, BudgetStatus};
use pennywise_core::utils::today_utc;

use crate::{
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
    models::{BudgetUpdate, NewBudget},
};

#[utoipa::path(get, path = "/api/v1/budgets", responses((status = 200, description = "Budgets ordered by category")))]
pub async fn list_budgets(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state.budget_service.get_budgets(&user.id)?;
    Ok(Json(budgets))
}

#[utoipa::path(post, path = "/api/v1/budgets", request_body = NewBudget, responses((status = 201, description = "Created budget"), (status = 409, description = "Budget for this category already exists")))]
pub async fn create_budget(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewBudget>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let created = state
        .budget_service
        .create_budget(&user.id, payload.try_into()?)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/v1/budgets/{id}", params(("id" = String, Path, description = "Budget ID")), request_body = BudgetUpdate, responses((status = 200, description = "Updated budget"), (status = 404)))]
pub async fn update_budget(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BudgetUpdate>,
) -> ApiResult<Json<Budget>> {
    let updated = state
        .budget_service
        .update_budget(&user.id, &id, payload.try_into()?)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/v1/budgets/{id}", params(("id" = String, Path, description = "Budget ID")), responses((status = 204), (status = 404)))]
pub async fn delete_budget(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/v1/budgets/status", responses((status = 200, description = "Spending against each budget in its current period")))]
pub async fn get_budget_status(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BudgetStatus>>> {
    let status = state
        .budget_service
        .get_budget_status(&user.id, today_utc())?;
    Ok(Json(status))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/status", get(get_budget_status))
        .route("/budgets/{id}", put(update_budget).delete(delete_budget))
}
