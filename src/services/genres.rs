//! Genre management service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookReference,
        genre::{Genre, GenreRequest},
        trimmed_text,
    },
    repository::{BookStore, GenreStore},
};

#[derive(Clone)]
pub struct GenreService {
    genres: Arc<dyn GenreStore>,
    books: Arc<dyn BookStore>,
}

impl GenreService {
    pub fn new(genres: Arc<dyn GenreStore>, books: Arc<dyn BookStore>) -> Self {
        Self { genres, books }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.genres.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Genre> {
        self.genres
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        Ok(self.genres.find_by_name(name).await?.is_some())
    }

    pub async fn create(&self, data: GenreRequest) -> AppResult<Genre> {
        let name = trimmed_text(&data.name, "Name", 2, 100)?;
        if self.exists_by_name(name).await? {
            return Err(AppError::Validation(format!("Genre '{}' already exists.", name)));
        }

        let genre = self.genres.create(name).await?;
        tracing::info!(genre_id = %genre.id, "Created genre '{}'", genre.name);
        Ok(genre)
    }

    pub async fn update(&self, id: Uuid, data: GenreRequest) -> AppResult<Genre> {
        let name = trimmed_text(&data.name, "Name", 2, 100)?;
        self.get(id).await?;

        if let Some(other) = self.genres.find_by_name(name).await? {
            if other.id != id {
                return Err(AppError::Validation(format!("Genre '{}' already exists.", name)));
            }
        }

        let genre = self.genres.rename(id, name).await?;
        tracing::info!(genre_id = %id, "Renamed genre to '{}'", genre.name);
        Ok(genre)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let Some(genre) = self.genres.get(id).await? else {
            return Ok(());
        };

        let books = self.books.count_referencing(BookReference::Genre(id)).await?;
        if books > 0 {
            return Err(AppError::Conflict(format!(
                "Genre '{}' is used by {} book(s)",
                genre.name, books
            )));
        }

        if self.genres.delete(id).await? {
            tracing::info!(genre_id = %id, "Deleted genre");
        }
        Ok(())
    }
}
