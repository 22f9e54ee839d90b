//! Repository layer for database operations
//!
//! Each entity family is reached through an async store trait so services
//! can be driven by the PostgreSQL implementations in production and by
//! mocks in tests.

pub mod authors;
pub mod books;
pub mod genres;
pub mod publishers;
pub mod readings;
pub mod reviews;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;

pub use authors::{AuthorStore, AuthorsRepository};
pub use books::{BookStore, BooksRepository};
pub use genres::{GenreStore, GenresRepository};
pub use publishers::{PublisherStore, PublishersRepository};
pub use readings::{ReadingStore, ReadingsRepository};
pub use reviews::{ReviewStore, ReviewsRepository};
pub use users::{UserStore, UsersRepository};

/// Database reachability check used by the readiness endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Probe: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgProbe {
    pool: Pool<Postgres>,
}

#[async_trait]
impl Probe for PgProbe {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// All stores of the persistence context
#[derive(Clone)]
pub struct Repository {
    pub probe: Arc<dyn Probe>,
    pub books: Arc<dyn BookStore>,
    pub authors: Arc<dyn AuthorStore>,
    pub genres: Arc<dyn GenreStore>,
    pub publishers: Arc<dyn PublisherStore>,
    pub reviews: Arc<dyn ReviewStore>,
    pub readings: Arc<dyn ReadingStore>,
    pub users: Arc<dyn UserStore>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            probe: Arc::new(PgProbe { pool: pool.clone() }),
            books: Arc::new(BooksRepository::new(pool.clone())),
            authors: Arc::new(AuthorsRepository::new(pool.clone())),
            genres: Arc::new(GenresRepository::new(pool.clone())),
            publishers: Arc::new(PublishersRepository::new(pool.clone())),
            reviews: Arc::new(ReviewsRepository::new(pool.clone())),
            readings: Arc::new(ReadingsRepository::new(pool.clone())),
            users: Arc::new(UsersRepository::new(pool)),
        }
    }
}

/// Key used to compare names: trimmed and lowercased.
///
/// Stores compare it against `LOWER(TRIM(name))`.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Build a `LIKE` pattern matching `term` anywhere, with wildcards escaped
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
