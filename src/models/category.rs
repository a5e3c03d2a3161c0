//! Category model and sentinel definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::book::Book;

/// Name of the sentinel category that absorbs books whose category was deleted
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Description stored on the sentinel category when it is first created
pub const UNCATEGORIZED_DESCRIPTION: &str =
    "This category is used for books without a defined category.";

/// Category row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Category with its books attached (display only)
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDetails {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub books: Vec<Book>,
}

impl CategoryDetails {
    pub fn new(category: Category, books: Vec<Book>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            books,
        }
    }
}

/// Create/update category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryPayload {
    #[validate(length(min = 1, message = "Category name cannot be blank"))]
    pub name: String,
    pub description: Option<String>,
}
