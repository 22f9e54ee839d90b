//! Business logic services

pub mod accounts;
pub mod admin;
pub mod authors;
pub mod books;
pub mod genres;
pub mod publishers;
pub mod readings;
pub mod reviews;
pub mod seed;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::{Probe, Repository}};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub probe: Arc<dyn Probe>,
    pub accounts: accounts::AccountService,
    pub admin: admin::AdminService,
    pub authors: authors::AuthorService,
    pub books: books::BookService,
    pub genres: genres::GenreService,
    pub publishers: publishers::PublisherService,
    pub readings: readings::ReadingService,
    pub reviews: reviews::ReviewService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            probe: repository.probe.clone(),
            accounts: accounts::AccountService::new(repository.users.clone(), auth_config),
            admin: admin::AdminService::new(repository.users.clone()),
            authors: authors::AuthorService::new(repository.authors.clone(), repository.books.clone()),
            books: books::BookService::new(
                repository.books.clone(),
                repository.authors.clone(),
                repository.genres.clone(),
                repository.publishers.clone(),
            ),
            genres: genres::GenreService::new(repository.genres.clone(), repository.books.clone()),
            publishers: publishers::PublisherService::new(
                repository.publishers.clone(),
                repository.books.clone(),
            ),
            readings: readings::ReadingService::new(repository.readings.clone(), repository.books.clone()),
            reviews: reviews::ReviewService::new(repository.reviews, repository.books),
        }
    }
}
