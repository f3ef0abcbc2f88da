//! Libris Book Catalog Server
//!
//! A REST JSON API for managing a book catalog: books with their authors
//! and publishers, CSV bulk import with a per-line error report, and
//! OpenLibrary metadata lookups by ISBN.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod isbn;
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
