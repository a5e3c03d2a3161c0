//! Bookstore catalog management server
//!
//! A REST JSON API for managing a bookstore catalog: books, authors,
//! categories and users. Deleting an author or category re-points the
//! dependent books at a shared sentinel row instead of leaving dangling
//! references; book lookup goes through a dynamically composed
//! multi-criteria search.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
