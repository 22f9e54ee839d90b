//! Reviews repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::review::{NewReview, Review, ReviewDetails},
};

const DETAILS_SELECT: &str = r#"
    SELECT r.id, r.book_id, r.user_id, u.email AS user_email,
           r.content, r.rating, r.created_at
    FROM reviews r
    JOIN users u ON u.id = r.user_id
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Reviews of a book, newest first
    async fn list_for_book(&self, book_id: Uuid) -> AppResult<Vec<ReviewDetails>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Review>>;
    async fn get_details(&self, id: Uuid) -> AppResult<Option<ReviewDetails>>;
    async fn create(&self, review: &NewReview) -> AppResult<Review>;
    async fn update(&self, id: Uuid, content: &str, rating: i16) -> AppResult<Review>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for ReviewsRepository {
    async fn list_for_book(&self, book_id: Uuid) -> AppResult<Vec<ReviewDetails>> {
        let query = format!(
            "{} WHERE r.book_id = $1 ORDER BY r.created_at DESC, r.id DESC",
            DETAILS_SELECT
        );
        let reviews = sqlx::query_as::<_, ReviewDetails>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Review>> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(review)
    }

    async fn get_details(&self, id: Uuid) -> AppResult<Option<ReviewDetails>> {
        let query = format!("{} WHERE r.id = $1", DETAILS_SELECT);
        let review = sqlx::query_as::<_, ReviewDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(review)
    }

    async fn create(&self, review: &NewReview) -> AppResult<Review> {
        let row = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, book_id, user_id, content, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(review.book_id)
        .bind(review.user_id)
        .bind(&review.content)
        .bind(review.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, content: &str, rating: i16) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "UPDATE reviews SET content = $2, rating = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .bind(rating)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {} not found", id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
