//! Author management service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::author::{Author, AuthorDetails, AuthorPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all authors
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get an author with their books. The book list is recomputed from the
    /// books table on every call.
    pub async fn get(&self, id: Uuid) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get(id).await?;
        let books = self.repository.books.find_by_author(id).await?;
        Ok(AuthorDetails::new(author, books))
    }

    /// Create an author
    pub async fn create(&self, payload: &AuthorPayload) -> AppResult<Author> {
        self.repository.authors.create(payload).await
    }

    /// Update an author
    pub async fn update(&self, id: Uuid, payload: &AuthorPayload) -> AppResult<Author> {
        self.repository.authors.update(id, payload).await
    }

    /// Delete an author. Dependent books are re-pointed at the "Unknown"
    /// sentinel author before the row is removed; see the repository for the
    /// transactional protocol.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }
}
