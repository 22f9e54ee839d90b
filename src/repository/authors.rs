//! Authors repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::name_key;
use crate::{
    error::{AppError, AppResult},
    models::{author::Author, book::NameOption},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Author>>;
    async fn options(&self) -> AppResult<Vec<NameOption>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Author>>;
    /// Lookup by trimmed, case-insensitive name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>>;
    async fn create(&self, name: &str, created_by: Uuid) -> AppResult<Author>;
    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Author>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn options(&self) -> AppResult<Vec<NameOption>> {
        let rows = sqlx::query_as::<_, NameOption>("SELECT id, name FROM authors ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors WHERE LOWER(TRIM(name)) = $1 LIMIT 1",
        )
        .bind(name_key(name))
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    async fn create(&self, name: &str, created_by: Uuid) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (id, name, created_by) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("UPDATE authors SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
