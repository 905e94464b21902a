use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pennywise_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> (StatusCode, String) {
    match err {
        CoreError::Validation(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
        CoreError::NotFound(_) | CoreError::Database(DatabaseError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        CoreError::ConstraintViolation(msg) => (StatusCode::CONFLICT, msg.clone()),
        CoreError::Database(DatabaseError::UniqueViolation(_)) => {
            (StatusCode::CONFLICT, "Resource already exists".to_string())
        }
        CoreError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
        _ => {
            tracing::error!("Request failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Core(ref e) => core_status(e),
            ApiError::Auth(e) => return e.into_response(),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CoreError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn core_errors_map_to_http_statuses() {
        assert_eq!(
            status_of(CoreError::invalid_input("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::NotFound("Goal".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::ConstraintViolation("dup".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CoreError::Database(DatabaseError::UniqueViolation(
                "UNIQUE".into()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CoreError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CoreError::Database(DatabaseError::QueryFailed("x".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
