//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, categories, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "0.1.0",
        description = "Catalog management REST API: books, authors, categories and users"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::search_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Users
        users::get_user,
        users::make_admin,
        users::revoke_admin,
    ),
    components(
        schemas(
            // Auth
            auth::LoginResponse,
            crate::models::user::User,
            crate::models::user::UserRole,
            crate::models::user::SignupRequest,
            crate::models::user::LoginRequest,
            // Books
            crate::models::book::Book,
            crate::models::book::BookPayload,
            crate::models::book::BookSearchQuery,
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorDetails,
            crate::models::author::AuthorPayload,
            // Categories
            crate::models::category::Category,
            crate::models::category::CategoryDetails,
            crate::models::category::CategoryPayload,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book catalog management and search"),
        (name = "authors", description = "Author management"),
        (name = "categories", description = "Category management"),
        (name = "users", description = "User administration")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
