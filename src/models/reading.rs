//! Personal reading log (a user's record of having read a book)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::book::BookOption;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reading {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 1 to 10
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

impl Reading {
    pub fn reading_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Reading entry with the book title, as listed in "my books"
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReadingDetails {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rating: i16,
    /// Days between start and end date
    pub reading_days: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReading {
    pub book_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10"))]
    pub rating: i16,
}

/// Books a reading can be logged against
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadingForm {
    pub books: Vec<BookOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rating: i16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_days_is_end_minus_start() {
        let reading = Reading {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            rating: 8,
            created_at: Utc::now(),
        };
        assert_eq!(reading.reading_days(), 10);
    }
}
