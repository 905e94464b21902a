use std::sync::Arc;

use crate::{
    auth::require_jwt,
    config::Config,
    main_lib::AppState,
    models::{
        AuthResponse, BudgetUpdate, CategoryRequest, ChangePasswordRequest, ContributionRequest,
        GoalUpdate, LoginRequest, MessageResponse, NewBudget, NewGoal, NewTransaction,
        NotificationsRequest, ProfileUpdateRequest, RegisterRequest, Transaction,
        TransactionUpdate, User,
    },
};
use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub mod analytics;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod export;
pub mod goals;
pub mod transactions;
pub mod users;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        readyz,
        auth::register,
        auth::login,
        users::get_me,
        users::update_profile,
        users::change_password,
        users::update_notifications,
        transactions::list_transactions,
        transactions::create_transaction,
        transactions::get_transaction,
        transactions::update_transaction,
        transactions::delete_transaction,
        transactions::spending_by_category,
        transactions::get_balance,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::rename_category,
        categories::delete_category,
        budgets::list_budgets,
        budgets::create_budget,
        budgets::update_budget,
        budgets::delete_budget,
        budgets::get_budget_status,
        goals::get_goals,
        goals::get_goal,
        goals::create_goal,
        goals::update_goal,
        goals::delete_goal,
        goals::contribute,
        analytics::monthly_summary,
        analytics::category_breakdown,
        analytics::monthly_trend,
        analytics::budget_vs_actual,
        export::export_transactions,
        export::export_budgets,
        export::export_goals,
    ),
    components(schemas(
        AuthResponse,
        BudgetUpdate,
        CategoryRequest,
        ChangePasswordRequest,
        ContributionRequest,
        GoalUpdate,
        LoginRequest,
        MessageResponse,
        NewBudget,
        NewGoal,
        NewTransaction,
        NotificationsRequest,
        ProfileUpdateRequest,
        RegisterRequest,
        Transaction,
        TransactionUpdate,
        User,
    )),
    tags((name = "pennywise"))
)]
struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let protected = Router::new()
        .merge(users::router())
        .merge(transactions::router())
        .merge(categories::router())
        .merge(budgets::router())
        .merge(goals::router())
        .merge(analytics::router())
        .merge(export::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(auth::router())
        .merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
