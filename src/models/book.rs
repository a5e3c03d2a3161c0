//! Book model and search query types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Book row, with the parent names joined in for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    /// ISBN, globally unique across the catalog
    pub isbn: String,
    pub price: Decimal,
    pub publication_date: NaiveDate,
    pub description: Option<String>,
    pub author_id: Uuid,
    pub author_name: Option<String>,
    pub category_id: Uuid,
    pub category_name: Option<String>,
}

/// Create/update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookPayload {
    #[validate(length(min = 1, message = "Book title cannot be blank"))]
    pub title: String,
    #[validate(length(min = 1, message = "Book isbn cannot be blank"))]
    pub isbn: String,
    pub price: Decimal,
    pub publication_date: NaiveDate,
    #[validate(length(min = 10, max = 255, message = "Description must be 10 to 255 characters long"))]
    pub description: String,
    pub author_id: Uuid,
    pub category_id: Uuid,
}

/// Book search filters. Every field is independently optional; absent or
/// blank filters impose no constraint.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookSearchQuery {
    /// Case-insensitive substring match on the book title
    pub title: Option<String>,
    /// Case-insensitive substring match on the author name
    pub author_name: Option<String>,
    /// Case-insensitive substring match on the category name
    pub category_name: Option<String>,
    /// Calendar year of the publication date
    pub year: Option<i32>,
}
