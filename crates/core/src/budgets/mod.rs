//! Budgets module - per-category spending limits.

mod budgets_model;
mod budgets_service;
mod budgets_traits;


pub use budgets_model::{
    utilization_percentage, Budget, BudgetHealth, BudgetPeriod, BudgetStatus, BudgetUpdate,
    NewBudget,
};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
