use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use pennywise_core::transactions::{BalanceSummary, CategoryTotal, TransactionFilter};

use crate::{
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
    models::{NewTransaction, Transaction, TransactionQuery, TransactionUpdate, TypeQuery},
};

#[utoipa::path(get, path = "/api/v1/transactions", params(TransactionQuery), responses((status = 200, body = [Transaction])))]
pub async fn list_transactions(
    user: AuthUser,
    Query(query): Query<TransactionQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let filter = TransactionFilter::try_from(query)?;
    let transactions = state.transaction_service.get_transactions(&user.id, &filter)?;
    Ok(Json(
        transactions.into_iter().map(Transaction::from).collect(),
    ))
}

#[utoipa::path(post, path = "/api/v1/transactions", request_body = NewTransaction, responses((status = 201, body = Transaction)))]
pub async fn create_transaction(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let created = state
        .transaction_service
        .create_transaction(&user.id, payload.try_into()?)
        .await?;
    Ok((StatusCode::CREATED, Json(Transaction::from(created))))
}

#[utoipa::path(get, path = "/api/v1/transactions/{id}", responses((status = 200, body = Transaction), (status = 404)))]
pub async fn get_transaction(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.transaction_service.get_transaction(&user.id, &id)?;
    Ok(Json(Transaction::from(transaction)))
}

#[utoipa::path(put, path = "/api/v1/transactions/{id}", request_body = TransactionUpdate, responses((status = 200, body = Transaction), (status = 404)))]
pub async fn update_transaction(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    let updated = state
        .transaction_service
        .update_transaction(&user.id, &id, payload.try_into()?)
        .await?;
    Ok(Json(Transaction::from(updated)))
}

#[utoipa::path(delete, path = "/api/v1/transactions/{id}", responses((status = 204), (status = 404)))]
pub async fn delete_transaction(
    user: AuthUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .transaction_service
        .delete_transaction(&user.id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/v1/transactions/spending-by-category", params(TypeQuery), responses((status = 200, description = "All-time totals per category, largest first")))]
pub async fn spending_by_category(
    user: AuthUser,
    Query(query): Query<TypeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CategoryTotal>>> {
    let totals = state
        .transaction_service
        .get_spending_by_category(&user.id, query.resolve()?)?;
    Ok(Json(totals))
}

#[utoipa::path(get, path = "/api/v1/transactions/balance", responses((status = 200, description = "All-time income, expenses and balance")))]
pub async fn get_balance(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BalanceSummary>> {
    let balance = state.transaction_service.get_balance(&user.id)?;
    Ok(Json(balance))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/spending-by-category", get(spending_by_category))
        .route("/transactions/balance", get(get_balance))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
