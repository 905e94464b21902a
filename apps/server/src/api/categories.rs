use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use pennywise_core::categories::Category;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState, models::CategoryRequest};

#[utoipa::path(get, path = "/api/v1/categories", responses((status = 200, description = "Categories ordered by name")))]
pub async fn list_categories(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.get_categories(&user.id)?;
    Ok(Json(categories))
}

#[utoipa::path(get, path = "/api/v1/categories/{id}", params(("id" = String, Path, description = "Category ID")), responses((status = 200, description = "Category"), (status = 404)))]
pub async fn get_category(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Category>> {
    let category = state.category_service.get_category(&user.id, &id)?;
    Ok(Json(category))
}

#[utoipa::path(post, path = "/api/v1/categories", request_body = CategoryRequest, responses((status = 201, description = "Created category"), (status = 409, description = "Name already used")))]
pub async fn create_category(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let created = state
        .category_service
        .create_category(&user.id, payload.name())
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/v1/categories/{id}", params(("id" = String, Path, description = "Category ID")), request_body = CategoryRequest, responses((status = 200, description = "Renamed category"), (status = 404), (status = 409)))]
pub async fn rename_category(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<Json<Category>> {
    let renamed = state
        .category_service
        .rename_category(&user.id, &id, payload.name())
        .await?;
    Ok(Json(renamed))
}

#[utoipa::path(delete, path = "/api/v1/categories/{id}", params(("id" = String, Path, description = "Category ID")), responses((status = 204), (status = 404)))]
pub async fn delete_category(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.category_service.delete_category(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(rename_category)
                .delete(delete_category),
        )
}
