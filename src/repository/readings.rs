//! Reading log repository (`user_books` table)

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::reading::{NewReading, Reading, ReadingDetails},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<ReadingDetails>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Reading>>;
    async fn create(&self, reading: &NewReading) -> AppResult<Reading>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct ReadingsRepository {
    pool: Pool<Postgres>,
}

impl ReadingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for ReadingsRepository {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<ReadingDetails>> {
        let rows = sqlx::query_as::<_, ReadingDetails>(
            r#"
            SELECT ub.id, ub.book_id, b.title AS book_title,
                   ub.start_date, ub.end_date, ub.rating,
                   (ub.end_date - ub.start_date) AS reading_days
            FROM user_books ub
            JOIN books b ON b.id = ub.book_id
            WHERE ub.user_id = $1
            ORDER BY ub.start_date DESC, ub.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Reading>> {
        let reading = sqlx::query_as::<_, Reading>("SELECT * FROM user_books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(reading)
    }

    async fn create(&self, reading: &NewReading) -> AppResult<Reading> {
        let row = sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO user_books (id, user_id, book_id, start_date, end_date, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reading.user_id)
        .bind(reading.book_id)
        .bind(reading.start_date)
        .bind(reading.end_date)
        .bind(reading.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM user_books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
