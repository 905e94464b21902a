//! Categories module - per-user transaction labels.

mod categories_model;
mod categories_service;
mod categories_traits;

pub use categories_model::{validate_category_name, Category, NewCategory};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
