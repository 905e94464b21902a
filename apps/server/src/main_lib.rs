use std::sync::Arc;

use pennywise_core::{
    analytics::{AnalyticsService, AnalyticsServiceTrait},
    budgets::{BudgetService, BudgetServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    export::{ExportService, ExportServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use pennywise_storage_sqlite::{
    budgets::BudgetRepository, categories::CategoryRepository, db, goals::GoalRepository,
    transactions::TransactionRepository, users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{auth::AuthManager, config::Config};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub analytics_service: Arc<dyn AnalyticsServiceTrait>,
    pub export_service: Arc<dyn ExportServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let (pool, writer) = db::open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));

    let user_service = Arc::new(UserService::new(user_repository));
    let category_service = Arc::new(CategoryService::new(category_repository));
    let transaction_service = Arc::new(TransactionService::new(transaction_repository.clone()));
    let budget_service = Arc::new(BudgetService::new(
        budget_repository.clone(),
        transaction_repository.clone(),
    ));
    let goal_service = Arc::new(GoalService::new(goal_repository.clone()));
    let analytics_service = Arc::new(AnalyticsService::new(
        transaction_repository.clone(),
        budget_repository.clone(),
    ));
    let export_service = Arc::new(ExportService::new(
        transaction_repository,
        budget_repository,
        goal_repository,
    ));

    let auth = Arc::new(AuthManager::new(
        &config.jwt_secret,
        config.access_token_ttl,
    ));

    Ok(Arc::new(AppState {
        user_service,
        category_service,
        transaction_service,
        budget_service,
        goal_service,
        analytics_service,
        export_service,
        auth,
    }))
}
