use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::categories_model::{validate_category_name, Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { category_repo }
    }

    fn ensure_unique(&self, user_id: &str, name: &str, excluding_id: Option<&str>) -> Result<()> {
        if self.category_repo.name_exists(user_id, name, excluding_id)? {
            return Err(Error::ConstraintViolation(format!(
                "Category '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.category_repo.list(user_id)
    }

    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category> {
        self.category_repo.get_by_id(user_id, category_id)
    }

    async fn create_category(&self, user_id: &str, name: &str) -> Result<Category> {
        let name = validate_category_name(name)?;
        self.ensure_unique(user_id, &name, None)?;
        debug!("Creating category '{}' for user {}", name, user_id);
        self.category_repo
            .create(NewCategory {
                user_id: user_id.to_string(),
                name,
            })
            .await
    }

    async fn rename_category(
        &self,
        user_id: &str,
        category_id: &str,
        name: &str,
    ) -> Result<Category> {
        let name = validate_category_name(name)?;
        // Existence first so a foreign id reports 404 rather than a conflict.
        self.category_repo.get_by_id(user_id, category_id)?;
        self.ensure_unique(user_id, &name, Some(category_id))?;
        self.category_repo.rename(user_id, category_id, name).await
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        match self.category_repo.delete(user_id, category_id).await? {
            0 => Err(Error::NotFound("Category".to_string())),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockCategoryRepository {
        categories: Mutex<Vec<Category>>,
    }

    #[async_trait]
    impl CategoryRepositoryTrait for MockCategoryRepository {
        fn list(&self, user_id: &str) -> Result<Vec<Category>> {
            let mut list: Vec<Category> = self
                .categories
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect();
            list.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(list)
        }

        fn get_by_id(&self, user_id: &str, category_id: &str) -> Result<Category> {
            self.categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.user_id == user_id && c.id == category_id)
                .cloned()
                .ok_or_else(|| Error::NotFound("Category".to_string()))
        }

        fn name_exists(
            &self,
            user_id: &str,
            name: &str,
            excluding_id: Option<&str>,
        ) -> Result<bool> {
            Ok(self.categories.lock().unwrap().iter().any(|c| {
                c.user_id == user_id && c.name == name && Some(c.id.as_str()) != excluding_id
            }))
        }

        async fn create(&self, new_category: NewCategory) -> Result<Category> {
            let mut categories = self.categories.lock().unwrap();
            let category = Category {
                id: format!("cat-{}", categories.len() + 1),
                user_id: new_category.user_id,
                name: new_category.name,
                created_at: Utc::now().naive_utc(),
            };
            categories.push(category.clone());
            Ok(category)
        }

        async fn rename(
            &self,
            user_id: &str,
            category_id: &str,
            name: String,
        ) -> Result<Category> {
            let mut categories = self.categories.lock().unwrap();
            let category = categories
                .iter_mut()
                .find(|c| c.user_id == user_id && c.id == category_id)
                .ok_or_else(|| Error::NotFound("Category".to_string()))?;
            category.name = name;
            Ok(category.clone())
        }

        async fn delete(&self, user_id: &str, category_id: &str) -> Result<usize> {
            let mut categories = self.categories.lock().unwrap();
            let before = categories.len();
            categories.retain(|c| !(c.user_id == user_id && c.id == category_id));
            Ok(before - categories.len())
        }
    }

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(MockCategoryRepository::default()))
    }

    #[tokio::test]
    async fn test_create_trims_and_rejects_blank_names() {
        let service = service();
        let category = service.create_category("u1", "  Groceries ").await.unwrap();
        assert_eq!(category.name, "Groceries");

        let err = service.create_category("u1", "   ").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_names_are_unique_per_user_only() {
        let service = service();
        service.create_category("u1", "Rent").await.unwrap();

        let err = service.create_category("u1", "Rent").await.unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));

        assert!(service.create_category("u2", "Rent").await.is_ok());
    }

    #[tokio::test]
    async fn test_rename_checks_ownership_and_conflicts() {
        let service = service();
        let food = service.create_category("u1", "Food").await.unwrap();
        service.create_category("u1", "Travel").await.unwrap();

        let err = service
            .rename_category("u2", &food.id, "Dining")
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service
            .rename_category("u1", &food.id, "Travel")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));

        // Renaming to its own name is not a conflict.
        let same = service
            .rename_category("u1", &food.id, "Food")
            .await
            .unwrap();
        assert_eq!(same.name, "Food");
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_not_found() {
        let service = service();
        let category = service.create_category("u1", "Fun").await.unwrap();

        assert!(service
            .delete_category("u2", &category.id)
            .await
            .unwrap_err()
            .is_not_found());
        service.delete_category("u1", &category.id).await.unwrap();
        assert!(service.get_categories("u1").unwrap().is_empty());
    }
}
