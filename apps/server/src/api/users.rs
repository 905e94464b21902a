use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use pennywise_core::users::validate_password;

use crate::{
    auth::{hash_password, verify_password, AuthError, AuthUser},
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{
        ChangePasswordRequest, MessageResponse, NotificationsRequest, ProfileUpdateRequest, User,
    },
};

#[utoipa::path(get, path = "/api/v1/users/me", responses((status = 200, body = User)))]
pub async fn get_me(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<User>> {
    let me = state.user_service.get_user(&user.id)?;
    Ok(Json(me.into()))
}

#[utoipa::path(put, path = "/api/v1/users/profile", request_body = ProfileUpdateRequest, responses((status = 200, body = User), (status = 409, description = "Email already in use")))]
pub async fn update_profile(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> ApiResult<Json<User>> {
    let updated = state.user_service.update_profile(&user.id, payload.into()).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(put, path = "/api/v1/users/security/password", request_body = ChangePasswordRequest, responses((status = 200, body = MessageResponse), (status = 400)))]
pub async fn change_password(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
    let (Some(current), Some(new)) = (
        non_empty(payload.current_password),
        non_empty(payload.new_password),
    ) else {
        return Err(ApiError::BadRequest(
            "Current password and new password are required".to_string(),
        ));
    };
    validate_password(&new)?;

    let credentials = state.user_service.get_credentials(&user.id)?;
    verify_password(&current, &credentials.password_hash).map_err(|e| match e {
        AuthError::InvalidCredentials => {
            ApiError::BadRequest("Current password is incorrect".to_string())
        }
        other => other.into(),
    })?;

    let password_hash = hash_password(&new)?;
    state
        .user_service
        .set_password_hash(&user.id, password_hash)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

#[utoipa::path(put, path = "/api/v1/users/notifications", request_body = NotificationsRequest, responses((status = 200, body = User)))]
pub async fn update_notifications(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NotificationsRequest>,
) -> ApiResult<Json<User>> {
    let updated = state
        .user_service
        .update_notifications(&user.id, payload.into())
        .await?;
    Ok(Json(updated.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/me", get(get_me))
        .route("/users/profile", put(update_profile))
        .route("/users/security/password", put(change_password))
        .route("/users/notifications", put(update_notifications))
}
