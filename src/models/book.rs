//! Book model, listing filters and form view-models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Default page size of the book listing
pub const DEFAULT_PAGE_SIZE: i64 = 5;
/// Largest page size a client may request
pub const MAX_PAGE_SIZE: i64 = 100;
/// Highest page number accepted by the book listing
pub const MAX_PAGE: i64 = 1_000_000;

/// Book row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub genre_id: Uuid,
    pub publisher_id: Uuid,
    /// Account that added the book
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Book joined with its author, genre and publisher names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookDetails {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub author: String,
    pub genre_id: Uuid,
    pub genre: String,
    pub publisher_id: Uuid,
    pub publisher: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Dropdown entry for authors, genres and publishers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NameOption {
    pub id: Uuid,
    pub name: String,
}

/// Dropdown entry for books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookOption {
    pub id: Uuid,
    pub title: String,
}

/// Choices offered by the book create/edit forms
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BookFormOptions {
    pub authors: Vec<NameOption>,
    pub genres: Vec<NameOption>,
    pub publishers: Vec<NameOption>,
}

/// Book listing query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    pub author_id: Option<Uuid>,
    pub genre_id: Option<Uuid>,
    pub publisher_id: Option<Uuid>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Normalized book filter handed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author_id: Option<Uuid>,
    pub genre_id: Option<Uuid>,
    pub publisher_id: Option<Uuid>,
    pub page: i64,
    pub per_page: i64,
}

impl BookFilter {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl From<BookQuery> for BookFilter {
    fn from(query: BookQuery) -> Self {
        let non_nil = |id: Option<Uuid>| id.filter(|id| !id.is_nil());
        Self {
            title: query
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            author_id: non_nil(query.author_id),
            genre_id: non_nil(query.genre_id),
            publisher_id: non_nil(query.publisher_id),
            page: query.page.unwrap_or(1).clamp(1, MAX_PAGE),
            per_page: query
                .per_page
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// Filtered, paginated book listing with the filter echoed back
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookListing {
    pub books: Vec<BookDetails>,
    pub search_title: Option<String>,
    pub selected_author_id: Option<Uuid>,
    pub selected_genre_id: Option<Uuid>,
    pub selected_publisher_id: Option<Uuid>,
    pub authors: Vec<NameOption>,
    pub genres: Vec<NameOption>,
    pub publishers: Vec<NameOption>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl BookListing {
    pub fn new(books: Vec<BookDetails>, total: i64, filter: BookFilter, options: BookFormOptions) -> Self {
        let total_pages = (total + filter.per_page - 1) / filter.per_page;
        Self {
            books,
            search_title: filter.title,
            selected_author_id: filter.author_id,
            selected_genre_id: filter.genre_id,
            selected_publisher_id: filter.publisher_id,
            authors: options.authors,
            genres: options.genres,
            publishers: options.publishers,
            page: filter.page,
            per_page: filter.per_page,
            total,
            total_pages,
            has_previous_page: filter.page > 1,
            has_next_page: filter.page < total_pages,
        }
    }
}

/// Create book request.
///
/// Each of author, genre and publisher is given either as the id of an
/// existing row or as a free-text name for a new one. A non-blank name wins
/// over an id.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
    #[validate(url(message = "Image URL must be a valid URL"), length(max = 500))]
    pub image_url: Option<String>,
    pub author_id: Option<Uuid>,
    #[validate(length(max = 100, message = "Author name must be at most 100 characters"))]
    pub new_author_name: Option<String>,
    pub genre_id: Option<Uuid>,
    #[validate(length(max = 100, message = "Genre name must be at most 100 characters"))]
    pub new_genre_name: Option<String>,
    pub publisher_id: Option<Uuid>,
    #[validate(length(max = 100, message = "Publisher name must be at most 100 characters"))]
    pub new_publisher_name: Option<String>,
}

/// Edit book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
    #[validate(url(message = "Image URL must be a valid URL"), length(max = 500))]
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub genre_id: Uuid,
    pub publisher_id: Uuid,
}

/// Current values of a book plus the form choices
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookEditForm {
    pub book: Book,
    pub options: BookFormOptions,
}

/// Values written when inserting a book
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub genre_id: Uuid,
    pub publisher_id: Uuid,
    pub created_by: Uuid,
}

/// A reference column of the books table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookReference {
    Author(Uuid),
    Genre(Uuid),
    Publisher(Uuid),
}
