//! Publishers repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::name_key;
use crate::{
    error::{AppError, AppResult},
    models::{book::NameOption, publisher::Publisher},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublisherStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Publisher>>;
    async fn options(&self) -> AppResult<Vec<NameOption>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Publisher>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Publisher>>;
    async fn create(&self, name: &str, description: Option<String>) -> AppResult<Publisher>;
    async fn update(&self, id: Uuid, name: &str, description: Option<String>) -> AppResult<Publisher>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PublishersRepository {
    pool: Pool<Postgres>,
}

impl PublishersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PublisherStore for PublishersRepository {
    async fn list(&self) -> AppResult<Vec<Publisher>> {
        let rows = sqlx::query_as::<_, Publisher>("SELECT * FROM publishers ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn options(&self) -> AppResult<Vec<NameOption>> {
        let rows = sqlx::query_as::<_, NameOption>("SELECT id, name FROM publishers ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Publisher>> {
        let publisher = sqlx::query_as::<_, Publisher>("SELECT * FROM publishers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(publisher)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Publisher>> {
        let publisher = sqlx::query_as::<_, Publisher>(
            "SELECT * FROM publishers WHERE LOWER(TRIM(name)) = $1 LIMIT 1",
        )
        .bind(name_key(name))
        .fetch_optional(&self.pool)
        .await?;
        Ok(publisher)
    }

    async fn create(&self, name: &str, description: Option<String>) -> AppResult<Publisher> {
        let row = sqlx::query_as::<_, Publisher>(
            "INSERT INTO publishers (id, name, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, name: &str, description: Option<String>) -> AppResult<Publisher> {
        sqlx::query_as::<_, Publisher>(
            "UPDATE publishers SET name = $2, description = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Publisher {} not found", id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM publishers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
