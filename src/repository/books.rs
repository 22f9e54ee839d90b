//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::contains_pattern;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDetails, BookFilter, BookOption, BookReference, NewBook, UpdateBook},
};

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.title, b.description, b.image_url,
           b.author_id, a.name AS author,
           b.genre_id, g.name AS genre,
           b.publisher_id, p.name AS publisher,
           b.created_by, b.created_at
    FROM books b
    JOIN authors a ON a.id = b.author_id
    JOIN genres g ON g.id = b.genre_id
    JOIN publishers p ON p.id = b.publisher_id
"#;

const FILTER_CONDITIONS: &str = r#"
    WHERE ($1::text IS NULL OR LOWER(b.title) LIKE $1)
      AND ($2::uuid IS NULL OR b.author_id = $2)
      AND ($3::uuid IS NULL OR b.genre_id = $3)
      AND ($4::uuid IS NULL OR b.publisher_id = $4)
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Filtered page of books plus the total number of matches
    async fn search(&self, filter: &BookFilter) -> AppResult<(Vec<BookDetails>, i64)>;
    async fn list(&self) -> AppResult<Vec<BookDetails>>;
    /// Most recently added books first
    async fn latest(&self, count: i64) -> AppResult<Vec<BookDetails>>;
    async fn options(&self) -> AppResult<Vec<BookOption>>;
    /// Books whose author is not `author_id`
    async fn options_excluding_author(&self, author_id: Uuid) -> AppResult<Vec<BookOption>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn get_details(&self, id: Uuid) -> AppResult<Option<BookDetails>>;
    async fn create(&self, book: &NewBook) -> AppResult<Book>;
    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book>;
    async fn set_author(&self, id: Uuid, author_id: Uuid) -> AppResult<()>;
    /// Returns false when no row was deleted
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn count_referencing(&self, reference: BookReference) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn search(&self, filter: &BookFilter) -> AppResult<(Vec<BookDetails>, i64)> {
        let title_pattern = filter.title.as_deref().map(contains_pattern);

        let count_query = format!("SELECT COUNT(*) FROM books b {}", FILTER_CONDITIONS);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&title_pattern)
            .bind(filter.author_id)
            .bind(filter.genre_id)
            .bind(filter.publisher_id)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "{} {} ORDER BY b.title, b.id LIMIT $5 OFFSET $6",
            DETAILS_SELECT, FILTER_CONDITIONS
        );
        let books = sqlx::query_as::<_, BookDetails>(&select_query)
            .bind(&title_pattern)
            .bind(filter.author_id)
            .bind(filter.genre_id)
            .bind(filter.publisher_id)
            .bind(filter.per_page)
            .bind(filter.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    async fn list(&self) -> AppResult<Vec<BookDetails>> {
        let query = format!("{} ORDER BY b.title, b.id", DETAILS_SELECT);
        let books = sqlx::query_as::<_, BookDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn latest(&self, count: i64) -> AppResult<Vec<BookDetails>> {
        let query = format!("{} ORDER BY b.created_at DESC, b.id DESC LIMIT $1", DETAILS_SELECT);
        let books = sqlx::query_as::<_, BookDetails>(&query)
            .bind(count)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn options(&self) -> AppResult<Vec<BookOption>> {
        let rows = sqlx::query_as::<_, BookOption>("SELECT id, title FROM books ORDER BY title, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn options_excluding_author(&self, author_id: Uuid) -> AppResult<Vec<BookOption>> {
        let rows = sqlx::query_as::<_, BookOption>(
            "SELECT id, title FROM books WHERE author_id <> $1 ORDER BY title, id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn get_details(&self, id: Uuid) -> AppResult<Option<BookDetails>> {
        let query = format!("{} WHERE b.id = $1", DETAILS_SELECT);
        let book = sqlx::query_as::<_, BookDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, description, image_url, author_id, genre_id, publisher_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.image_url)
        .bind(book.author_id)
        .bind(book.genre_id)
        .bind(book.publisher_id)
        .bind(book.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, description = $3, image_url = $4,
                author_id = $5, genre_id = $6, publisher_id = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(data.author_id)
        .bind(data.genre_id)
        .bind(data.publisher_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn set_author(&self, id: Uuid, author_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE books SET author_id = $2 WHERE id = $1")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_referencing(&self, reference: BookReference) -> AppResult<i64> {
        let (query, id) = match reference {
            BookReference::Author(id) => ("SELECT COUNT(*) FROM books WHERE author_id = $1", id),
            BookReference::Genre(id) => ("SELECT COUNT(*) FROM books WHERE genre_id = $1", id),
            BookReference::Publisher(id) => ("SELECT COUNT(*) FROM books WHERE publisher_id = $1", id),
        };
        let count: i64 = sqlx::query_scalar(query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
