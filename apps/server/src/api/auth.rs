use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use pennywise_core::users::{normalize_email, validate_email, validate_password, NewUser};

use crate::{
    auth::{hash_password, verify_password, AuthError},
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{AuthResponse, LoginRequest, RegisterRequest},
};

#[utoipa::path(post, path = "/api/v1/auth/register", request_body = RegisterRequest, responses((status = 201, body = AuthResponse)))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    validate_email(&normalize_email(&email))?;
    validate_password(&password)?;

    let password_hash = hash_password(&password)?;
    let user = state
        .user_service
        .register(NewUser {
            username: payload.username,
            email,
            password_hash,
        })
        .await?;
    tracing::info!("Registered user {}", user.id);

    let token = state.auth.issue_token(&user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(post, path = "/api/v1/auth/login", request_body = LoginRequest, responses((status = 200, body = AuthResponse), (status = 401)))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let credentials = state
        .user_service
        .find_credentials_by_email(&email)?
        .ok_or(AuthError::InvalidCredentials)?;
    verify_password(&password, &credentials.password_hash)?;

    let token = state.auth.issue_token(&credentials.user.id)?;
    Ok(Json(AuthResponse {
        token,
        user: credentials.user.into(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/signup", post(register))
        .route("/auth/login", post(login))
}
