use crate::categories::categories_model::{Category, NewCategory};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations. Every call is scoped to `user_id`.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<Category>>;
    fn get_by_id(&self, user_id: &str, category_id: &str) -> Result<Category>;
    fn name_exists(
        &self,
        user_id: &str,
        name: &str,
        excluding_id: Option<&str>,
    ) -> Result<bool>;
    async fn create(&self, new_category: NewCategory) -> Result<Category>;
    async fn rename(&self, user_id: &str, category_id: &str, name: String) -> Result<Category>;
    async fn delete(&self, user_id: &str, category_id: &str) -> Result<usize>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>>;
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category>;
    async fn create_category(&self, user_id: &str, name: &str) -> Result<Category>;
    async fn rename_category(
        &self,
        user_id: &str,
        category_id: &str,
        name: &str,
    ) -> Result<Category>;
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()>;
}
