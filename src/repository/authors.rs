//! Authors repository, including the sentinel reassignment protocol

use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorPayload, UNKNOWN_AUTHOR_BIOGRAPHY, UNKNOWN_AUTHOR_NAME},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors =
            sqlx::query_as::<_, Author>("SELECT id, name, biography FROM authors ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(authors)
    }

    /// Get an author by id
    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT id, name, biography FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} does not exist", id)))
    }

    /// Check if an author exists
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create a new author. The unique index on name rejects duplicates.
    pub async fn create(&self, payload: &AuthorPayload) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name, biography) VALUES ($1, $2) RETURNING id, name, biography",
        )
        .bind(&payload.name)
        .bind(&payload.biography)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    /// Update an existing author
    pub async fn update(&self, id: Uuid, payload: &AuthorPayload) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            "UPDATE authors SET name = $1, biography = $2 WHERE id = $3 RETURNING id, name, biography",
        )
        .bind(&payload.name)
        .bind(&payload.biography)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} does not exist", id)))
    }

    /// Delete an author, first re-pointing any dependent books at the shared
    /// "Unknown" author. The whole sequence runs as one transaction, so the
    /// author can never end up deleted while books still reference it and a
    /// half-created sentinel never survives a failure.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Author with id {} does not exist",
                id
            )));
        }

        let dependents: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if dependents > 0 {
            let sentinel_id = resolve_unknown_author(&mut tx).await?;
            // Single multi-row write: no window where only some books moved
            let reassigned = sqlx::query("UPDATE books SET author_id = $1 WHERE author_id = $2")
                .bind(sentinel_id)
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            tracing::info!(
                "Reassigned {} book(s) from author {} to \"{}\"",
                reassigned,
                id,
                UNKNOWN_AUTHOR_NAME
            );
        }

        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Find-or-create the "Unknown" sentinel author inside the given transaction.
/// The upsert leans on the unique index on authors.name: under concurrent
/// first use one caller inserts the row and the other lands on it, never
/// producing two sentinels.
async fn resolve_unknown_author(tx: &mut Transaction<'_, Postgres>) -> AppResult<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO authors (name, biography)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(UNKNOWN_AUTHOR_NAME)
    .bind(UNKNOWN_AUTHOR_BIOGRAPHY)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}
