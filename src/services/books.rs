//! Book catalog service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{
            Book, BookDetails, BookEditForm, BookFilter, BookFormOptions, BookListing, BookQuery,
            CreateBook, NewBook, UpdateBook,
        },
        trimmed_text,
        user::Actor,
    },
    repository::{AuthorStore, BookStore, GenreStore, PublisherStore},
};

/// Number of books shown on the home page
pub const DEFAULT_LATEST_COUNT: i64 = 3;
pub const MAX_LATEST_COUNT: i64 = 50;

/// How a create request designates one of the book's references
#[derive(Debug, Clone, PartialEq)]
enum Reference {
    Existing(Uuid),
    New(String),
}

impl Reference {
    /// A non-blank free-text name takes precedence over an id
    fn choose(new_name: Option<&str>, id: Option<Uuid>, label: &str) -> AppResult<Self> {
        if let Some(name) = new_name.filter(|n| !n.trim().is_empty()) {
            let name = trimmed_text(name, &format!("{} name", label), 2, 100)?;
            return Ok(Reference::New(name.to_string()));
        }
        match id.filter(|id| !id.is_nil()) {
            Some(id) => Ok(Reference::Existing(id)),
            None => Err(AppError::Validation(format!("{} is required.", label))),
        }
    }
}

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
    authors: Arc<dyn AuthorStore>,
    genres: Arc<dyn GenreStore>,
    publishers: Arc<dyn PublisherStore>,
}

impl BookService {
    pub fn new(
        books: Arc<dyn BookStore>,
        authors: Arc<dyn AuthorStore>,
        genres: Arc<dyn GenreStore>,
        publishers: Arc<dyn PublisherStore>,
    ) -> Self {
        Self {
            books,
            authors,
            genres,
            publishers,
        }
    }

    /// Filtered, paginated listing with dropdown choices
    pub async fn list_filtered(&self, query: BookQuery) -> AppResult<BookListing> {
        let filter = BookFilter::from(query);
        let (books, total) = self.books.search(&filter).await?;
        let options = self.form_options().await?;
        Ok(BookListing::new(books, total, filter, options))
    }

    pub async fn list_all(&self) -> AppResult<Vec<BookDetails>> {
        self.books.list().await
    }

    pub async fn latest(&self, count: Option<i64>) -> AppResult<Vec<BookDetails>> {
        let count = count
            .unwrap_or(DEFAULT_LATEST_COUNT)
            .clamp(1, MAX_LATEST_COUNT);
        self.books.latest(count).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Book> {
        self.books
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub async fn get_details(&self, id: Uuid) -> AppResult<BookDetails> {
        self.books
            .get_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub async fn form_options(&self) -> AppResult<BookFormOptions> {
        let (authors, genres, publishers) = tokio::try_join!(
            self.authors.options(),
            self.genres.options(),
            self.publishers.options()
        )?;
        Ok(BookFormOptions {
            authors,
            genres,
            publishers,
        })
    }

    pub async fn edit_form(&self, id: Uuid, actor: Actor) -> AppResult<BookEditForm> {
        let book = self.get(id).await?;
        actor.require_owner_or_admin(book.created_by, "book")?;
        let options = self.form_options().await?;
        Ok(BookEditForm { book, options })
    }

    /// Create a book, adding any author, genre or publisher given by name.
    ///
    /// All three references are validated before anything is written.
    pub async fn create(&self, data: CreateBook, actor: Actor) -> AppResult<Book> {
        let title = trimmed_text(&data.title, "Title", 1, 100)?.to_string();
        let author = Reference::choose(data.new_author_name.as_deref(), data.author_id, "Author")?;
        let genre = Reference::choose(data.new_genre_name.as_deref(), data.genre_id, "Genre")?;
        let publisher = Reference::choose(
            data.new_publisher_name.as_deref(),
            data.publisher_id,
            "Publisher",
        )?;

        match &author {
            Reference::New(name) => {
                if self.authors.find_by_name(name).await?.is_some() {
                    return Err(AppError::Validation(format!("Author '{}' already exists.", name)));
                }
            }
            Reference::Existing(id) => {
                if self.authors.get(*id).await?.is_none() {
                    return Err(AppError::Validation("Selected author does not exist.".to_string()));
                }
            }
        }
        match &genre {
            Reference::New(name) => {
                if self.genres.find_by_name(name).await?.is_some() {
                    return Err(AppError::Validation(format!("Genre '{}' already exists.", name)));
                }
            }
            Reference::Existing(id) => {
                if self.genres.get(*id).await?.is_none() {
                    return Err(AppError::Validation("Selected genre does not exist.".to_string()));
                }
            }
        }
        match &publisher {
            Reference::New(name) => {
                if self.publishers.find_by_name(name).await?.is_some() {
                    return Err(AppError::Validation(format!("Publisher '{}' already exists.", name)));
                }
            }
            Reference::Existing(id) => {
                if self.publishers.get(*id).await?.is_none() {
                    return Err(AppError::Validation("Selected publisher does not exist.".to_string()));
                }
            }
        }

        let author_id = match author {
            Reference::Existing(id) => id,
            Reference::New(name) => {
                let created = self.authors.create(&name, actor.user_id).await?;
                tracing::info!(author_id = %created.id, "Created author '{}' with book", created.name);
                created.id
            }
        };
        let genre_id = match genre {
            Reference::Existing(id) => id,
            Reference::New(name) => {
                let created = self.genres.create(&name).await?;
                tracing::info!(genre_id = %created.id, "Created genre '{}' with book", created.name);
                created.id
            }
        };
        let publisher_id = match publisher {
            Reference::Existing(id) => id,
            Reference::New(name) => {
                let created = self.publishers.create(&name, None).await?;
                tracing::info!(publisher_id = %created.id, "Created publisher '{}' with book", created.name);
                created.id
            }
        };

        let book = self
            .books
            .create(&NewBook {
                title,
                description: data.description,
                image_url: data.image_url.filter(|u| !u.trim().is_empty()),
                author_id,
                genre_id,
                publisher_id,
                created_by: actor.user_id,
            })
            .await?;

        tracing::info!(book_id = %book.id, user_id = %actor.user_id, "Created book '{}'", book.title);
        Ok(book)
    }

    pub async fn edit(&self, id: Uuid, data: UpdateBook, actor: Actor) -> AppResult<Book> {
        let title = trimmed_text(&data.title, "Title", 1, 100)?.to_string();
        let existing = self.get(id).await?;
        actor.require_owner_or_admin(existing.created_by, "book")?;

        if self.authors.get(data.author_id).await?.is_none() {
            return Err(AppError::Validation("Selected author does not exist.".to_string()));
        }
        if self.genres.get(data.genre_id).await?.is_none() {
            return Err(AppError::Validation("Selected genre does not exist.".to_string()));
        }
        if self.publishers.get(data.publisher_id).await?.is_none() {
            return Err(AppError::Validation("Selected publisher does not exist.".to_string()));
        }

        let data = UpdateBook {
            title,
            image_url: data.image_url.filter(|u| !u.trim().is_empty()),
            ..data
        };
        let book = self.books.update(id, &data).await?;
        tracing::info!(book_id = %id, user_id = %actor.user_id, "Updated book");
        Ok(book)
    }

    /// Delete a book; a missing book is not an error
    pub async fn delete(&self, id: Uuid, actor: Actor) -> AppResult<()> {
        let Some(book) = self.books.get(id).await? else {
            return Ok(());
        };
        actor.require_owner_or_admin(book.created_by, "book")?;

        if self.books.delete(id).await? {
            tracing::info!(book_id = %id, user_id = %actor.user_id, "Deleted book");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::{
        models::{author::Author, book::NameOption, genre::Genre, publisher::Publisher},
        repository::{
            authors::MockAuthorStore, books::MockBookStore, genres::MockGenreStore,
            publishers::MockPublisherStore,
        },
    };

    struct Mocks {
        books: MockBookStore,
        authors: MockAuthorStore,
        genres: MockGenreStore,
        publishers: MockPublisherStore,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                books: MockBookStore::new(),
                authors: MockAuthorStore::new(),
                genres: MockGenreStore::new(),
                publishers: MockPublisherStore::new(),
            }
        }

        fn service(self) -> BookService {
            BookService::new(
                Arc::new(self.books),
                Arc::new(self.authors),
                Arc::new(self.genres),
                Arc::new(self.publishers),
            )
        }
    }

    fn book(owner: Uuid) -> Book {
        Book {
            id: Uuid::new_v4(),
            title: "Dune".to_string(),
            description: String::new(),
            image_url: None,
            author_id: Uuid::new_v4(),
            genre_id: Uuid::new_v4(),
            publisher_id: Uuid::new_v4(),
            created_by: owner,
            created_at: Utc::now(),
        }
    }

    fn update_for(book: &Book) -> UpdateBook {
        UpdateBook {
            title: "Dune Messiah".to_string(),
            description: String::new(),
            image_url: None,
            author_id: book.author_id,
            genre_id: book.genre_id,
            publisher_id: book.publisher_id,
        }
    }

    #[tokio::test]
    async fn create_with_new_names_creates_all_references() {
        let user = Uuid::new_v4();
        let author_id = Uuid::new_v4();
        let genre_id = Uuid::new_v4();
        let publisher_id = Uuid::new_v4();
        let mut mocks = Mocks::new();

        mocks.authors.expect_find_by_name().returning(|_| Ok(None));
        mocks.genres.expect_find_by_name().returning(|_| Ok(None));
        mocks.publishers.expect_find_by_name().returning(|_| Ok(None));

        mocks
            .authors
            .expect_create()
            .withf(move |name, created_by| name.to_string() == "Frank Herbert" && *created_by == user)
            .times(1)
            .returning(move |name, created_by| {
                Ok(Author {
                    id: author_id,
                    name: name.to_string(),
                    created_by,
                    created_at: Utc::now(),
                })
            });
        mocks
            .genres
            .expect_create()
            .times(1)
            .returning(move |name| {
                Ok(Genre {
                    id: genre_id,
                    name: name.to_string(),
                    created_at: Utc::now(),
                })
            });
        mocks
            .publishers
            .expect_create()
            .times(1)
            .returning(move |name, description| {
                Ok(Publisher {
                    id: publisher_id,
                    name: name.to_string(),
                    description,
                    created_at: Utc::now(),
                })
            });
        mocks
            .books
            .expect_create()
            .withf(move |b| {
                b.title == "Dune"
                    && b.author_id == author_id
                    && b.genre_id == genre_id
                    && b.publisher_id == publisher_id
                    && b.created_by == user
            })
            .times(1)
            .returning(|b| {
                Ok(Book {
                    id: Uuid::new_v4(),
                    title: b.title.clone(),
                    description: b.description.clone(),
                    image_url: b.image_url.clone(),
                    author_id: b.author_id,
                    genre_id: b.genre_id,
                    publisher_id: b.publisher_id,
                    created_by: b.created_by,
                    created_at: Utc::now(),
                })
            });

        let service = mocks.service();
        let created = service
            .create(
                CreateBook {
                    title: "Dune".to_string(),
                    new_author_name: Some("Frank Herbert".to_string()),
                    new_genre_name: Some("Sci-Fi".to_string()),
                    new_publisher_name: Some("Chilton".to_string()),
                    ..Default::default()
                },
                Actor::new(user, false),
            )
            .await
            .unwrap();

        assert_eq!(created.created_by, user);
        assert_eq!(created.author_id, author_id);
    }

    #[tokio::test]
    async fn create_without_author_is_rejected_before_any_write() {
        let mocks = Mocks::new();
        let service = mocks.service();

        let err = service
            .create(
                CreateBook {
                    title: "Dune".to_string(),
                    genre_id: Some(Uuid::new_v4()),
                    publisher_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
                Actor::new(Uuid::new_v4(), false),
            )
            .await
            .unwrap_err();

        match err {
            AppError::Validation(message) => assert_eq!(message, "Author is required."),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_with_unknown_publisher_writes_nothing() {
        let mut mocks = Mocks::new();
        mocks.authors.expect_find_by_name().returning(|_| Ok(None));
        mocks.genres.expect_get().returning(|id| {
            Ok(Some(Genre {
                id,
                name: "Sci-Fi".to_string(),
                created_at: Utc::now(),
            }))
        });
        mocks.publishers.expect_get().returning(|_| Ok(None));
        mocks.authors.expect_create().never();
        mocks.books.expect_create().never();

        let service = mocks.service();
        let result = service
            .create(
                CreateBook {
                    title: "Dune".to_string(),
                    new_author_name: Some("Frank Herbert".to_string()),
                    genre_id: Some(Uuid::new_v4()),
                    publisher_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
                Actor::new(Uuid::new_v4(), false),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn create_with_existing_author_name_is_rejected() {
        let mut mocks = Mocks::new();
        mocks.authors.expect_find_by_name().returning(|name| {
            Ok(Some(Author {
                id: Uuid::new_v4(),
                name: name.to_string(),
                created_by: Uuid::new_v4(),
                created_at: Utc::now(),
            }))
        });
        mocks.books.expect_create().never();

        let service = mocks.service();
        let result = service
            .create(
                CreateBook {
                    title: "Dune".to_string(),
                    new_author_name: Some("frank herbert ".to_string()),
                    genre_id: Some(Uuid::new_v4()),
                    publisher_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
                Actor::new(Uuid::new_v4(), false),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn edit_by_stranger_is_forbidden_and_leaves_book_unchanged() {
        let owner = Uuid::new_v4();
        let existing = book(owner);
        let data = update_for(&existing);
        let mut mocks = Mocks::new();
        let stored = existing.clone();
        mocks.books.expect_get().returning(move |_| Ok(Some(stored.clone())));
        mocks.books.expect_update().never();

        let service = mocks.service();
        let result = service
            .edit(existing.id, data, Actor::new(Uuid::new_v4(), false))
            .await;

        assert!(matches!(result, Err(AppError::Authorization(_))));
    }

    #[tokio::test]
    async fn admin_may_edit_any_book() {
        let existing = book(Uuid::new_v4());
        let data = update_for(&existing);
        let mut mocks = Mocks::new();
        let stored = existing.clone();
        mocks.books.expect_get().returning(move |_| Ok(Some(stored.clone())));
        mocks.authors.expect_get().returning(|id| {
            Ok(Some(Author {
                id,
                name: "Frank Herbert".to_string(),
                created_by: Uuid::new_v4(),
                created_at: Utc::now(),
            }))
        });
        mocks.genres.expect_get().returning(|id| {
            Ok(Some(Genre {
                id,
                name: "Sci-Fi".to_string(),
                created_at: Utc::now(),
            }))
        });
        mocks.publishers.expect_get().returning(|id| {
            Ok(Some(Publisher {
                id,
                name: "Chilton".to_string(),
                description: None,
                created_at: Utc::now(),
            }))
        });
        let updated = Book {
            title: "Dune Messiah".to_string(),
            ..existing.clone()
        };
        mocks
            .books
            .expect_update()
            .times(1)
            .returning(move |_, _| Ok(updated.clone()));

        let service = mocks.service();
        let book = service
            .edit(existing.id, data, Actor::new(Uuid::new_v4(), true))
            .await
            .unwrap();
        assert_eq!(book.title, "Dune Messiah");
    }

    #[tokio::test]
    async fn edit_of_missing_book_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.books.expect_get().returning(|_| Ok(None));
        let data = update_for(&book(Uuid::new_v4()));

        let service = mocks.service();
        let result = service
            .edit(Uuid::new_v4(), data, Actor::new(Uuid::new_v4(), true))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_by_stranger_is_forbidden() {
        let existing = book(Uuid::new_v4());
        let mut mocks = Mocks::new();
        let stored = existing.clone();
        mocks.books.expect_get().returning(move |_| Ok(Some(stored.clone())));
        mocks.books.expect_delete().never();

        let service = mocks.service();
        let result = service
            .delete(existing.id, Actor::new(Uuid::new_v4(), false))
            .await;
        assert!(matches!(result, Err(AppError::Authorization(_))));
    }

    #[tokio::test]
    async fn delete_of_missing_book_is_a_no_op() {
        let mut mocks = Mocks::new();
        mocks.books.expect_get().returning(|_| Ok(None));
        mocks.books.expect_delete().never();

        let service = mocks.service();
        let result = service
            .delete(Uuid::new_v4(), Actor::new(Uuid::new_v4(), false))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn owner_deletes_own_book() {
        let owner = Uuid::new_v4();
        let existing = book(owner);
        let mut mocks = Mocks::new();
        let stored = existing.clone();
        mocks.books.expect_get().returning(move |_| Ok(Some(stored.clone())));
        mocks.books.expect_delete().times(1).returning(|_| Ok(true));

        let service = mocks.service();
        tokio_test::assert_ok!(service.delete(existing.id, Actor::new(owner, false)).await);
    }

    #[tokio::test]
    async fn latest_count_is_defaulted_and_clamped() {
        let mut mocks = Mocks::new();
        mocks
            .books
            .expect_latest()
            .withf(|count| *count == DEFAULT_LATEST_COUNT)
            .times(1)
            .returning(|_| Ok(vec![]));
        mocks
            .books
            .expect_latest()
            .withf(|count| *count == MAX_LATEST_COUNT)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = mocks.service();
        service.latest(None).await.unwrap();
        service.latest(Some(500)).await.unwrap();
    }

    #[tokio::test]
    async fn listing_echoes_filter_and_options() {
        let author_id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        mocks
            .books
            .expect_search()
            .withf(move |f| f.title.as_deref() == Some("dune") && f.author_id == Some(author_id))
            .returning(|_| Ok((vec![], 7)));
        mocks.authors.expect_options().returning(move || {
            Ok(vec![NameOption {
                id: author_id,
                name: "Frank Herbert".to_string(),
            }])
        });
        mocks.genres.expect_options().returning(|| Ok(vec![]));
        mocks.publishers.expect_options().returning(|| Ok(vec![]));

        let service = mocks.service();
        let listing = service
            .list_filtered(BookQuery {
                title: Some(" dune ".to_string()),
                author_id: Some(author_id),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(listing.search_title.as_deref(), Some("dune"));
        assert_eq!(listing.selected_author_id, Some(author_id));
        assert_eq!(listing.total, 7);
        assert_eq!(listing.total_pages, 2);
        assert_eq!(listing.authors.len(), 1);
    }

    #[test]
    fn free_text_name_wins_over_id() {
        let id = Uuid::new_v4();
        assert_eq!(
            Reference::choose(Some(" Orbit "), Some(id), "Publisher").unwrap(),
            Reference::New("Orbit".to_string())
        );
        assert_eq!(
            Reference::choose(Some("   "), Some(id), "Publisher").unwrap(),
            Reference::Existing(id)
        );
        assert!(Reference::choose(None, Some(Uuid::nil()), "Publisher").is_err());
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_any_write() {
        let mut mocks = Mocks::new();
        mocks.authors.expect_create().never();
        mocks.genres.expect_create().never();
        mocks.publishers.expect_create().never();
        mocks.books.expect_create().never();
        let service = mocks.service();

        let result = service
            .create(
                CreateBook {
                    title: "   ".to_string(),
                    new_author_name: Some("Frank Herbert".to_string()),
                    new_genre_name: Some("Sci-Fi".to_string()),
                    new_publisher_name: Some("Chilton".to_string()),
                    ..Default::default()
                },
                Actor::new(Uuid::new_v4(), false),
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn new_reference_name_too_short_after_trimming_is_rejected() {
        let mut mocks = Mocks::new();
        mocks.authors.expect_create().never();
        mocks.books.expect_create().never();
        let service = mocks.service();

        let err = service
            .create(
                CreateBook {
                    title: "Dune".to_string(),
                    new_author_name: Some("  F  ".to_string()),
                    genre_id: Some(Uuid::new_v4()),
                    publisher_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
                Actor::new(Uuid::new_v4(), false),
            )
            .await
            .unwrap_err();
        match err {
            AppError::Validation(message) => {
                assert_eq!(message, "Author name must be between 2 and 100 characters")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn edit_to_blank_title_is_rejected() {
        let owner = Uuid::new_v4();
        let existing = book(owner);
        let mut update = update_for(&existing);
        update.title = "  ".to_string();
        let mut mocks = Mocks::new();
        mocks.books.expect_update().never();
        let service = mocks.service();

        let result = service.edit(existing.id, update, Actor::new(owner, false)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
