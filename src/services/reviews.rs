//! Book review service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        review::{NewReview, Review, ReviewDetails, ReviewForm, ReviewRequest},
        trimmed_text,
        user::Actor,
    },
    repository::{BookStore, ReviewStore},
};

#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewStore>,
    books: Arc<dyn BookStore>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewStore>, books: Arc<dyn BookStore>) -> Self {
        Self { reviews, books }
    }

    pub async fn review_form(&self, book_id: Uuid) -> AppResult<ReviewForm> {
        let book = self
            .books
            .get(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))?;
        Ok(ReviewForm {
            book_id: book.id,
            book_title: book.title,
        })
    }

    /// Reviews of a book, newest first
    pub async fn list_for_book(&self, book_id: Uuid) -> AppResult<Vec<ReviewDetails>> {
        if self.books.get(book_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Book {} not found", book_id)));
        }
        self.reviews.list_for_book(book_id).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<ReviewDetails> {
        self.reviews
            .get_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", id)))
    }

    pub async fn create(&self, book_id: Uuid, data: ReviewRequest, actor: Actor) -> AppResult<Review> {
        let content = trimmed_text(&data.content, "Content", 1, 2000)?.to_string();
        if self.books.get(book_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Book {} not found", book_id)));
        }

        let review = self
            .reviews
            .create(&NewReview {
                book_id,
                user_id: actor.user_id,
                content,
                rating: data.rating,
            })
            .await?;
        tracing::info!(review_id = %review.id, book_id = %book_id, user_id = %actor.user_id, "Created review");
        Ok(review)
    }

    pub async fn edit(&self, id: Uuid, data: ReviewRequest, actor: Actor) -> AppResult<Review> {
        let content = trimmed_text(&data.content, "Content", 1, 2000)?;
        let existing = self
            .reviews
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", id)))?;
        actor.require_owner_or_admin(existing.user_id, "review")?;

        let review = self
            .reviews
            .update(id, content, data.rating)
            .await?;
        tracing::info!(review_id = %id, user_id = %actor.user_id, "Updated review");
        Ok(review)
    }

    pub async fn delete(&self, id: Uuid, actor: Actor) -> AppResult<()> {
        let Some(review) = self.reviews.get(id).await? else {
            return Ok(());
        };
        actor.require_owner_or_admin(review.user_id, "review")?;

        if self.reviews.delete(id).await? {
            tracing::info!(review_id = %id, user_id = %actor.user_id, "Deleted review");
        }
        Ok(())
    }
}
