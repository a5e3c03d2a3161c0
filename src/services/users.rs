//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{SignupRequest, User, UserClaims, UserRole},
    repository::Repository,
};

/// Email of the admin account seeded at startup
const SEED_ADMIN_EMAIL: &str = "admin@mail.com";

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user with the default role
    pub async fn sign_up(&self, request: &SignupRequest) -> AppResult<User> {
        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email already taken".to_string()));
        }

        let hash = self.hash_password(&request.password)?;
        self.repository
            .users
            .create(&request.name, &request.email, &hash, UserRole::User)
            .await
    }

    /// Authenticate by email and password, returning a JWT token and the user
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Get a user by id
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.repository.users.get(id).await
    }

    /// Grant the admin role. Idempotent: promoting an admin is a no-op.
    pub async fn make_admin(&self, id: Uuid) -> AppResult<User> {
        let user = self.repository.users.get(id).await?;
        if user.role == UserRole::Admin {
            return Ok(user);
        }
        self.repository.users.set_role(id, UserRole::Admin).await
    }

    /// Revoke the admin role. Idempotent.
    pub async fn revoke_admin(&self, id: Uuid) -> AppResult<User> {
        let user = self.repository.users.get(id).await?;
        if user.role == UserRole::User {
            return Ok(user);
        }
        self.repository.users.set_role(id, UserRole::User).await
    }

    /// Seed the admin account on startup if it does not exist yet
    pub async fn ensure_seed_admin(&self) -> AppResult<()> {
        if self
            .repository
            .users
            .find_by_email(SEED_ADMIN_EMAIL)
            .await?
            .is_some()
        {
            tracing::debug!("Admin user already exists, skipping seeding");
            return Ok(());
        }

        let hash = self.hash_password("password")?;
        self.repository
            .users
            .create("Admin", SEED_ADMIN_EMAIL, &hash, UserRole::Admin)
            .await?;
        tracing::info!("Admin user created");
        Ok(())
    }

    /// Create a JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&user.password)
            .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
