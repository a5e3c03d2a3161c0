//! Author model and sentinel definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::book::Book;

/// Name of the sentinel author that absorbs books whose author was deleted
pub const UNKNOWN_AUTHOR_NAME: &str = "Unknown";

/// Biography stored on the sentinel author when it is first created
pub const UNKNOWN_AUTHOR_BIOGRAPHY: &str =
    "Author information is currently unavailable. We're working hard to update it soon";

/// Author row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub biography: Option<String>,
}

/// Author with its books attached (display only; the book list is always
/// recomputed from the books table, never stored on the author)
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorDetails {
    pub id: Uuid,
    pub name: String,
    pub biography: Option<String>,
    pub books: Vec<Book>,
}

impl AuthorDetails {
    pub fn new(author: Author, books: Vec<Book>) -> Self {
        Self {
            id: author.id,
            name: author.name,
            biography: author.biography,
            books,
        }
    }
}

/// Create/update author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthorPayload {
    #[validate(length(min = 1, message = "Author name cannot be blank"))]
    pub name: String,
    pub biography: Option<String>,
}
