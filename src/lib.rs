//! Book Manager server
//!
//! A REST JSON API for a shared book catalog: books with their authors,
//! genres and publishers, user reviews, a personal reading log, and
//! administrator role management.

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
