//! Data models for Book Manager

pub mod author;
pub mod book;
pub mod genre;
pub mod publisher;
pub mod reading;
pub mod review;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDetails, BookFilter, BookListing, BookReference, NameOption};
pub use genre::Genre;
pub use publisher::Publisher;
pub use reading::{Reading, ReadingDetails};
pub use review::{Review, ReviewDetails};
pub use user::{Account, Actor, UserClaims};

use crate::error::{AppError, AppResult};

/// Trim a free-text field and check the stored length in characters
pub fn trimmed_text<'a>(value: &'a str, field: &str, min: usize, max: usize) -> AppResult<&'a str> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(trimmed)
}
