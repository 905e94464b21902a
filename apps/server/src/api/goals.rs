use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pennywise_core::goals::Goal;

use crate::{
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
    models::{ContributionRequest, GoalUpdate, NewGoal},
};

#[utoipa::path(get, path = "/api/v1/goals", responses((status = 200, description = "Goals ordered by target date")))]
pub async fn get_goals(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals(&user.id)?;
    Ok(Json(goals))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}", params(("id" = String, Path, description = "Goal ID")), responses((status = 200, description = "Goal with contribution history"), (status = 404)))]
pub async fn get_goal(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Goal>> {
    let goal = state.goal_service.get_goal(&user.id, &id)?;
    Ok(Json(goal))
}

#[utoipa::path(post, path = "/api/v1/goals", request_body = NewGoal, responses((status = 201, description = "Created goal"), (status = 400)))]
pub async fn create_goal(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state
        .goal_service
        .create_goal(&user.id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

#[utoipa::path(put, path = "/api/v1/goals/{id}", params(("id" = String, Path, description = "Goal ID")), request_body = GoalUpdate, responses((status = 200, description = "Updated goal"), (status = 404)))]
pub async fn update_goal(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let goal = state
        .goal_service
        .update_goal(&user.id, &id, payload.into())
        .await?;
    Ok(Json(goal))
}

#[utoipa::path(delete, path = "/api/v1/goals/{id}", params(("id" = String, Path, description = "Goal ID")), responses((status = 204), (status = 404)))]
pub async fn delete_goal(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/v1/goals/{id}/contribute", params(("id" = String, Path, description = "Goal ID")), request_body = ContributionRequest, responses((status = 200, description = "Goal after the contribution"), (status = 400), (status = 404)))]
pub async fn contribute(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContributionRequest>,
) -> ApiResult<Json<Goal>> {
    let goal = state
        .goal_service
        .contribute(&user.id, &id, payload.try_into()?)
        .await?;
    Ok(Json(goal))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/contribute", post(contribute))
}
