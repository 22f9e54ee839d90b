//! Author management service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::{BookOption, BookReference},
        trimmed_text,
        user::Actor,
    },
    repository::{AuthorStore, BookStore},
};

#[derive(Clone)]
pub struct AuthorService {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
}

impl AuthorService {
    pub fn new(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>) -> Self {
        Self { authors, books }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.authors
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Trimmed, case-insensitive name check; blank names never exist
    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        Ok(self.authors.find_by_name(name).await?.is_some())
    }

    pub async fn create(&self, data: CreateAuthor, actor: Actor) -> AppResult<Author> {
        let name = trimmed_text(&data.name, "Name", 2, 100)?;
        if self.exists_by_name(name).await? {
            return Err(AppError::Validation(format!("Author '{}' already exists.", name)));
        }

        let author = self.authors.create(name, actor.user_id).await?;
        tracing::info!(author_id = %author.id, user_id = %actor.user_id, "Created author '{}'", author.name);
        Ok(author)
    }

    pub async fn update(&self, id: Uuid, data: UpdateAuthor, actor: Actor) -> AppResult<Author> {
        let existing = self.get(id).await?;
        actor.require_owner_or_admin(existing.created_by, "author")?;

        let name = trimmed_text(&data.name, "Name", 2, 100)?;
        if let Some(other) = self.authors.find_by_name(name).await? {
            if other.id != id {
                return Err(AppError::Validation(format!("Author '{}' already exists.", name)));
            }
        }

        let author = self.authors.rename(id, name).await?;
        tracing::info!(author_id = %id, "Renamed author to '{}'", author.name);
        Ok(author)
    }

    /// Delete an author no book references; a missing author is not an error
    pub async fn delete(&self, id: Uuid, actor: Actor) -> AppResult<()> {
        let Some(author) = self.authors.get(id).await? else {
            return Ok(());
        };
        actor.require_owner_or_admin(author.created_by, "author")?;

        let books = self.books.count_referencing(BookReference::Author(id)).await?;
        if books > 0 {
            return Err(AppError::Conflict(format!(
                "Author '{}' still has {} book(s)",
                author.name, books
            )));
        }

        if self.authors.delete(id).await? {
            tracing::info!(author_id = %id, user_id = %actor.user_id, "Deleted author");
        }
        Ok(())
    }

    /// Books that could be reassigned to this author
    pub async fn book_candidates(&self, author_id: Uuid) -> AppResult<Vec<BookOption>> {
        self.get(author_id).await?;
        self.books.options_excluding_author(author_id).await
    }

    /// Make `author_id` the author of an existing book
    pub async fn assign_book(&self, author_id: Uuid, book_id: Uuid, actor: Actor) -> AppResult<()> {
        self.get(author_id).await?;
        let book = self
            .books
            .get(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))?;
        actor.require_owner_or_admin(book.created_by, "book")?;

        self.books.set_author(book_id, author_id).await?;
        tracing::info!(book_id = %book_id, author_id = %author_id, "Assigned book to author");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::{
        models::book::Book,
        repository::{authors::MockAuthorStore, books::MockBookStore},
    };

    fn author(owner: Uuid, name: &str) -> Author {
        Author {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_by: owner,
            created_at: Utc::now(),
        }
    }

    fn service(authors: MockAuthorStore, books: MockBookStore) -> AuthorService {
        AuthorService::new(Arc::new(authors), Arc::new(books))
    }

    #[tokio::test]
    async fn exists_by_name_ignores_case_and_whitespace() {
        let mut authors = MockAuthorStore::new();
        authors.expect_find_by_name().returning(|name| {
            if name.trim().to_lowercase() == "frank herbert" {
                Ok(Some(author(Uuid::new_v4(), "Frank Herbert")))
            } else {
                Ok(None)
            }
        });
        let service = service(authors, MockBookStore::new());

        assert!(service.exists_by_name("frank herbert").await.unwrap());
        assert!(service.exists_by_name("  FRANK HERBERT ").await.unwrap());
        assert!(!service.exists_by_name("Isaac Asimov").await.unwrap());
    }

    #[tokio::test]
    async fn blank_name_never_exists() {
        let mut authors = MockAuthorStore::new();
        authors.expect_find_by_name().never();
        let service = service(authors, MockBookStore::new());

        assert!(!service.exists_by_name("   ").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_on_create() {
        let mut authors = MockAuthorStore::new();
        authors
            .expect_find_by_name()
            .returning(|_| Ok(Some(author(Uuid::new_v4(), "Frank Herbert"))));
        authors.expect_create().never();
        let service = service(authors, MockBookStore::new());

        let result = service
            .create(
                CreateAuthor {
                    name: " frank herbert".to_string(),
                },
                Actor::new(Uuid::new_v4(), false),
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn create_stores_trimmed_name_and_creator() {
        let user = Uuid::new_v4();
        let mut authors = MockAuthorStore::new();
        authors.expect_find_by_name().returning(|_| Ok(None));
        authors
            .expect_create()
            .withf(move |name, created_by| name.to_string() == "Ursula K. Le Guin" && *created_by == user)
            .times(1)
            .returning(|name, created_by| Ok(author(created_by, name)));
        let service = service(authors, MockBookStore::new());

        let created = service
            .create(
                CreateAuthor {
                    name: "  Ursula K. Le Guin ".to_string(),
                },
                Actor::new(user, false),
            )
            .await
            .unwrap();
        assert_eq!(created.created_by, user);
    }

    #[tokio::test]
    async fn rename_by_stranger_is_forbidden() {
        let existing = author(Uuid::new_v4(), "Frank Herbert");
        let id = existing.id;
        let mut authors = MockAuthorStore::new();
        authors.expect_get().returning(move |_| Ok(Some(existing.clone())));
        authors.expect_rename().never();
        let service = service(authors, MockBookStore::new());

        let result = service
            .update(
                id,
                UpdateAuthor {
                    name: "F. Herbert".to_string(),
                },
                Actor::new(Uuid::new_v4(), false),
            )
            .await;
        assert!(matches!(result, Err(AppError::Authorization(_))));
    }

    #[tokio::test]
    async fn rename_keeping_own_name_is_allowed() {
        let owner = Uuid::new_v4();
        let existing = author(owner, "Frank Herbert");
        let id = existing.id;
        let mut authors = MockAuthorStore::new();
        let stored = existing.clone();
        authors.expect_get().returning(move |_| Ok(Some(stored.clone())));
        let same = existing.clone();
        authors.expect_find_by_name().returning(move |_| Ok(Some(same.clone())));
        authors
            .expect_rename()
            .times(1)
            .returning(move |_, name| Ok(Author { name: name.to_string(), ..existing.clone() }));
        let service = service(authors, MockBookStore::new());

        let renamed = service
            .update(
                id,
                UpdateAuthor {
                    name: "FRANK HERBERT".to_string(),
                },
                Actor::new(owner, false),
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "FRANK HERBERT");
    }

    #[tokio::test]
    async fn delete_of_missing_author_is_a_no_op() {
        let mut authors = MockAuthorStore::new();
        authors.expect_get().returning(|_| Ok(None));
        authors.expect_delete().never();
        let service = service(authors, MockBookStore::new());

        assert!(service
            .delete(Uuid::new_v4(), Actor::new(Uuid::new_v4(), false))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn delete_of_referenced_author_conflicts() {
        let owner = Uuid::new_v4();
        let existing = author(owner, "Frank Herbert");
        let id = existing.id;
        let mut authors = MockAuthorStore::new();
        authors.expect_get().returning(move |_| Ok(Some(existing.clone())));
        authors.expect_delete().never();
        let mut books = MockBookStore::new();
        books
            .expect_count_referencing()
            .withf(move |r| *r == BookReference::Author(id))
            .returning(|_| Ok(2));
        let service = service(authors, books);

        let result = service.delete(id, Actor::new(owner, false)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn assign_book_requires_book_owner() {
        let target = author(Uuid::new_v4(), "Frank Herbert");
        let author_id = target.id;
        let book_owner = Uuid::new_v4();
        let book = Book {
            id: Uuid::new_v4(),
            title: "Dune".to_string(),
            description: String::new(),
            image_url: None,
            author_id: Uuid::new_v4(),
            genre_id: Uuid::new_v4(),
            publisher_id: Uuid::new_v4(),
            created_by: book_owner,
            created_at: Utc::now(),
        };
        let book_id = book.id;

        let mut authors = MockAuthorStore::new();
        authors.expect_get().returning(move |_| Ok(Some(target.clone())));
        let mut books = MockBookStore::new();
        books.expect_get().returning(move |_| Ok(Some(book.clone())));
        books
            .expect_set_author()
            .withf(move |b, a| *b == book_id && *a == author_id)
            .times(1)
            .returning(|_, _| Ok(()));
        let service = service(authors, books);

        let denied = service
            .assign_book(author_id, book_id, Actor::new(Uuid::new_v4(), false))
            .await;
        assert!(matches!(denied, Err(AppError::Authorization(_))));

        service
            .assign_book(author_id, book_id, Actor::new(book_owner, false))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn name_too_short_after_trimming_is_rejected() {
        let mut authors = MockAuthorStore::new();
        authors.expect_find_by_name().never();
        authors.expect_create().never();
        let service = service(authors, MockBookStore::new());

        let result = service
            .create(
                CreateAuthor {
                    name: "  a  ".to_string(),
                },
                Actor::new(Uuid::new_v4(), false),
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn rename_to_blank_is_rejected() {
        let owner = Uuid::new_v4();
        let existing = author(owner, "Frank Herbert");
        let id = existing.id;
        let mut authors = MockAuthorStore::new();
        authors.expect_get().returning(move |_| Ok(Some(existing.clone())));
        authors.expect_rename().never();
        let service = service(authors, MockBookStore::new());

        let result = service
            .update(
                id,
                UpdateAuthor {
                    name: "   ".to_string(),
                },
                Actor::new(owner, false),
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
