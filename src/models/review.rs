//! Review model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub book_id: Uuid,
    /// Author of the review
    pub user_id: Uuid,
    pub content: String,
    /// 1 to 5
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

/// Review with the reviewer's email, as listed under a book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReviewDetails {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub content: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

/// Create or edit a review
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReviewRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be between 1 and 2000 characters"))]
    pub content: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
}

/// Data shown by the review form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewForm {
    pub book_id: Uuid,
    pub book_title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub rating: i16,
}
