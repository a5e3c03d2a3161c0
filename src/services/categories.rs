//! Category management service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::category::{Category, CategoryDetails, CategoryPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all categories
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    /// Get a category with its books
    pub async fn get(&self, id: Uuid) -> AppResult<CategoryDetails> {
        let category = self.repository.categories.get(id).await?;
        let books = self.repository.books.find_by_category(id).await?;
        Ok(CategoryDetails::new(category, books))
    }

    /// Create a category
    pub async fn create(&self, payload: &CategoryPayload) -> AppResult<Category> {
        self.repository.categories.create(payload).await
    }

    /// Update a category
    pub async fn update(&self, id: Uuid, payload: &CategoryPayload) -> AppResult<Category> {
        self.repository.categories.update(id, payload).await
    }

    /// Delete a category. Dependent books are re-pointed at the
    /// "Uncategorized" sentinel category before the row is removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }
}
