//! Publisher management service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookReference,
        publisher::{Publisher, PublisherRequest},
        trimmed_text,
    },
    repository::{BookStore, PublisherStore},
};

#[derive(Clone)]
pub struct PublisherService {
    publishers: Arc<dyn PublisherStore>,
    books: Arc<dyn BookStore>,
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

impl PublisherService {
    pub fn new(publishers: Arc<dyn PublisherStore>, books: Arc<dyn BookStore>) -> Self {
        Self { publishers, books }
    }

    pub async fn list(&self) -> AppResult<Vec<Publisher>> {
        self.publishers.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Publisher> {
        self.publishers
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Publisher {} not found", id)))
    }

    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        Ok(self.publishers.find_by_name(name).await?.is_some())
    }

    pub async fn create(&self, data: PublisherRequest) -> AppResult<Publisher> {
        let name = trimmed_text(&data.name, "Name", 2, 100)?;
        if self.exists_by_name(name).await? {
            return Err(AppError::Validation(format!("Publisher '{}' already exists.", name)));
        }

        let publisher = self
            .publishers
            .create(name, clean_description(data.description))
            .await?;
        tracing::info!(publisher_id = %publisher.id, "Created publisher '{}'", publisher.name);
        Ok(publisher)
    }

    pub async fn update(&self, id: Uuid, data: PublisherRequest) -> AppResult<Publisher> {
        let name = trimmed_text(&data.name, "Name", 2, 100)?;
        self.get(id).await?;

        if let Some(other) = self.publishers.find_by_name(name).await? {
            if other.id != id {
                return Err(AppError::Validation(format!("Publisher '{}' already exists.", name)));
            }
        }

        let publisher = self
            .publishers
            .update(id, name, clean_description(data.description))
            .await?;
        tracing::info!(publisher_id = %id, "Updated publisher '{}'", publisher.name);
        Ok(publisher)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let Some(publisher) = self.publishers.get(id).await? else {
            return Ok(());
        };

        let books = self
            .books
            .count_referencing(BookReference::Publisher(id))
            .await?;
        if books > 0 {
            return Err(AppError::Conflict(format!(
                "Publisher '{}' still has {} book(s)",
                publisher.name, books
            )));
        }

        if self.publishers.delete(id).await? {
            tracing::info!(publisher_id = %id, "Deleted publisher");
        }
        Ok(())
    }
}
