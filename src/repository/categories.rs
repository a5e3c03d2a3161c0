//! Categories repository, including the sentinel reassignment protocol

use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CategoryPayload, UNCATEGORIZED_DESCRIPTION, UNCATEGORIZED_NAME},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    /// Get a category by id
    pub async fn get(&self, id: Uuid) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} does not exist", id)))
    }

    /// Check if a category exists
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a new category. The unique index on name rejects duplicates.
    pub async fn create(&self, payload: &CategoryPayload) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    /// Update an existing category
    pub async fn update(&self, id: Uuid, payload: &CategoryPayload) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $1, description = $2 WHERE id = $3 RETURNING id, name, description",
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} does not exist", id)))
    }

    /// Delete a category, first re-pointing any dependent books at the shared
    /// "Uncategorized" category. Same transactional protocol as author
    /// deletion.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Category with id {} does not exist",
                id
            )));
        }

        let dependents: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE category_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if dependents > 0 {
            let sentinel_id = resolve_uncategorized(&mut tx).await?;
            let reassigned = sqlx::query("UPDATE books SET category_id = $1 WHERE category_id = $2")
                .bind(sentinel_id)
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            tracing::info!(
                "Reassigned {} book(s) from category {} to \"{}\"",
                reassigned,
                id,
                UNCATEGORIZED_NAME
            );
        }

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Find-or-create the "Uncategorized" sentinel category inside the given
/// transaction, racing safely on the unique name index.
async fn resolve_uncategorized(tx: &mut Transaction<'_, Postgres>) -> AppResult<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO categories (name, description)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(UNCATEGORIZED_NAME)
    .bind(UNCATEGORIZED_DESCRIPTION)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}
