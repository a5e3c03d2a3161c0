//! Books repository: CRUD and the dynamic multi-criteria search composer

use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookSearchQuery},
};

/// Base SELECT for every book fetch; parent names come from the joins, so a
/// book with a missing parent still loads (with a null name) instead of
/// disappearing from results.
const BOOK_SELECT: &str = "SELECT b.id, b.title, b.isbn, b.price, b.publication_date, b.description, \
     b.author_id, a.name AS author_name, b.category_id, c.name AS category_name \
     FROM books b \
     LEFT JOIN authors a ON a.id = b.author_id \
     LEFT JOIN categories c ON c.id = b.category_id";

/// Returns the trimmed filter value, or None when absent or blank.
fn non_blank(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|s| !s.is_empty())
}

/// Wraps a search term for a substring ILIKE match.
fn contains_pattern(term: &str) -> String {
    format!("%{}%", term)
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(BOOK_SELECT)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Get a book by id
    pub async fn get(&self, id: Uuid) -> AppResult<Book> {
        let query = format!("{} WHERE b.id = $1", BOOK_SELECT);
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} does not exist", id)))
    }

    /// List books referencing the given author
    pub async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let query = format!("{} WHERE b.author_id = $1", BOOK_SELECT);
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// List books referencing the given category
    pub async fn find_by_category(&self, category_id: Uuid) -> AppResult<Vec<Book>> {
        let query = format!("{} WHERE b.category_id = $1", BOOK_SELECT);
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Search books by an arbitrary combination of optional filters.
    ///
    /// Each present, non-blank filter appends one AND-ed condition with a
    /// bound parameter; with no filters the query returns every book. Name
    /// filters go through the LEFT JOINs, so a book with a missing parent
    /// simply does not match them.
    pub async fn search(&self, query: &BookSearchQuery) -> AppResult<Vec<Book>> {
        let mut qb = QueryBuilder::<Postgres>::new(BOOK_SELECT);
        qb.push(" WHERE 1=1");

        if let Some(title) = non_blank(query.title.as_deref()) {
            qb.push(" AND b.title ILIKE ")
                .push_bind(contains_pattern(title));
        }

        if let Some(author) = non_blank(query.author_name.as_deref()) {
            qb.push(" AND a.name ILIKE ")
                .push_bind(contains_pattern(author));
        }

        if let Some(category) = non_blank(query.category_name.as_deref()) {
            qb.push(" AND c.name ILIKE ")
                .push_bind(contains_pattern(category));
        }

        if let Some(year) = query.year {
            // Exact calendar-year match on the publication date
            qb.push(" AND EXTRACT(YEAR FROM b.publication_date)::int = ")
                .push_bind(year);
        }

        let books = qb.build_query_as::<Book>().fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// Check if ISBN already exists
    pub async fn isbn_exists(&self, isbn: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND id != $2)")
                .bind(isbn)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a new book
    pub async fn create(&self, payload: &BookPayload) -> AppResult<Book> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO books (title, isbn, price, publication_date, description, author_id, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.isbn)
        .bind(payload.price)
        .bind(payload.publication_date)
        .bind(&payload.description)
        .bind(payload.author_id)
        .bind(payload.category_id)
        .fetch_one(&self.pool)
        .await?;

        self.get(id).await
    }

    /// Update an existing book
    pub async fn update(&self, id: Uuid, payload: &BookPayload) -> AppResult<Book> {
        let updated = sqlx::query(
            r#"
            UPDATE books SET
                title = $1, isbn = $2, price = $3, publication_date = $4,
                description = $5, author_id = $6, category_id = $7
            WHERE id = $8
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.isbn)
        .bind(payload.price)
        .bind(payload.publication_date)
        .bind(&payload.description)
        .bind(payload.author_id)
        .bind(payload.category_id)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound(format!(
                "Book with id {} does not exist",
                id
            )));
        }

        self.get(id).await
    }

    /// Delete a book. Cascades nothing.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "Book with id {} does not exist",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_skips_absent_and_blank_filters() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some("War")), Some("War"));
        assert_eq!(non_blank(Some("  War ")), Some("War"));
    }

    #[test]
    fn contains_pattern_wraps_term_in_wildcards() {
        assert_eq!(contains_pattern("war"), "%war%");
    }

    #[test]
    fn search_with_no_filters_selects_everything() {
        let query = BookSearchQuery::default();
        let active = [
            non_blank(query.title.as_deref()),
            non_blank(query.author_name.as_deref()),
            non_blank(query.category_name.as_deref()),
        ];
        assert!(active.iter().all(Option::is_none));
        assert!(query.year.is_none());
    }
}
