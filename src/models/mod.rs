//! Data models for the bookstore entity graph

pub mod author;
pub mod book;
pub mod category;
pub mod user;
