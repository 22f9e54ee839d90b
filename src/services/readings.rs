//! Personal reading log service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        reading::{CreateReading, NewReading, Reading, ReadingDetails, ReadingForm},
        user::Actor,
    },
    repository::{BookStore, ReadingStore},
};

#[derive(Clone)]
pub struct ReadingService {
    readings: Arc<dyn ReadingStore>,
    books: Arc<dyn BookStore>,
}

impl ReadingService {
    pub fn new(readings: Arc<dyn ReadingStore>, books: Arc<dyn BookStore>) -> Self {
        Self { readings, books }
    }

    /// The caller's own entries, newest start date first
    pub async fn list_mine(&self, actor: Actor) -> AppResult<Vec<ReadingDetails>> {
        self.readings.list_for_user(actor.user_id).await
    }

    pub async fn add_form(&self) -> AppResult<ReadingForm> {
        Ok(ReadingForm {
            books: self.books.options().await?,
        })
    }

    pub async fn add(&self, actor: Actor, data: CreateReading) -> AppResult<Reading> {
        if data.end_date < data.start_date {
            return Err(AppError::Validation(
                "End date must not be before start date".to_string(),
            ));
        }
        if self.books.get(data.book_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Book {} not found", data.book_id)));
        }

        let reading = self
            .readings
            .create(&NewReading {
                user_id: actor.user_id,
                book_id: data.book_id,
                start_date: data.start_date,
                end_date: data.end_date,
                rating: data.rating,
            })
            .await?;
        tracing::info!(
            reading_id = %reading.id,
            user_id = %actor.user_id,
            days = reading.reading_days(),
            "Logged reading"
        );
        Ok(reading)
    }

    /// Remove one of the caller's entries; a missing entry is not an error
    pub async fn delete(&self, id: Uuid, actor: Actor) -> AppResult<()> {
        let Some(reading) = self.readings.get(id).await? else {
            return Ok(());
        };
        if reading.user_id != actor.user_id {
            tracing::warn!(user_id = %actor.user_id, reading_id = %id, "Denied access to reading");
            return Err(AppError::Authorization(
                "Reading log entries can only be removed by their owner".to_string(),
            ));
        }

        if self.readings.delete(id).await? {
            tracing::info!(reading_id = %id, user_id = %actor.user_id, "Deleted reading");
        }
        Ok(())
    }
}
