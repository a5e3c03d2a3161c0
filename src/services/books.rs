//! Book management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookSearchQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get a book by id
    pub async fn get(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get(id).await
    }

    /// Create a book. The ISBN must be free and both parents must exist at
    /// the time the references are created.
    pub async fn create(&self, payload: &BookPayload) -> AppResult<Book> {
        if self.repository.books.isbn_exists(&payload.isbn, None).await? {
            return Err(AppError::Conflict(
                "Book with this isbn already exists".to_string(),
            ));
        }

        if !self.repository.authors.exists(payload.author_id).await? {
            return Err(AppError::NotFound("Author does not exist".to_string()));
        }
        if !self.repository.categories.exists(payload.category_id).await? {
            return Err(AppError::NotFound("Category does not exist".to_string()));
        }

        self.repository.books.create(payload).await
    }

    /// Update a book, with the same reference and uniqueness checks as create
    pub async fn update(&self, id: Uuid, payload: &BookPayload) -> AppResult<Book> {
        self.repository.books.get(id).await?;

        if self
            .repository
            .books
            .isbn_exists(&payload.isbn, Some(id))
            .await?
        {
            return Err(AppError::Conflict(
                "Book with this isbn already exists".to_string(),
            ));
        }

        if !self.repository.authors.exists(payload.author_id).await? {
            return Err(AppError::NotFound("Author does not exist".to_string()));
        }
        if !self.repository.categories.exists(payload.category_id).await? {
            return Err(AppError::NotFound("Category does not exist".to_string()));
        }

        self.repository.books.update(id, payload).await
    }

    /// Delete a book
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Search books with an arbitrary subset of the optional filters
    pub async fn search(&self, query: &BookSearchQuery) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }
}
