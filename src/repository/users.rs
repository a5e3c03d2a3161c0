//! Users repository

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserRole},
};

const USER_SELECT: &str = "SELECT id, name, email, password, role, created_at FROM users";

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a user by id
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        let query = format!("{} WHERE id = $1", USER_SELECT);
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} does not exist", id)))
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let query = format!("{} WHERE email = $1", USER_SELECT);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Check if an email is already registered
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create a user with an already-hashed password
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password, role, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Change a user's role
    pub async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        let query = "UPDATE users SET role = $1 WHERE id = $2 \
                     RETURNING id, name, email, password, role, created_at";
        sqlx::query_as::<_, User>(query)
            .bind(role)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} does not exist", id)))
    }
}
