//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{
        Book, BookDetails, BookEditForm, BookFormOptions, BookListing, BookQuery, CreateBook,
        UpdateBook,
    },
};

use super::AuthenticatedUser;

/// Query parameters of the latest books endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct LatestQuery {
    /// Number of books (default: 3, max: 50)
    pub count: Option<i64>,
}

/// List books with filters and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Filtered page of books", body = BookListing)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookListing>> {
    let listing = state.services.books.list_filtered(query).await?;
    Ok(Json(listing))
}

/// List every book
#[utoipa::path(
    get,
    path = "/books/all",
    tag = "books",
    responses(
        (status = 200, description = "All books ordered by title", body = Vec<BookDetails>)
    )
)]
pub async fn list_all_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<BookDetails>>> {
    let books = state.services.books.list_all().await?;
    Ok(Json(books))
}

/// Most recently added books
#[utoipa::path(
    get,
    path = "/books/latest",
    tag = "books",
    params(LatestQuery),
    responses(
        (status = 200, description = "Newest books first", body = Vec<BookDetails>)
    )
)]
pub async fn latest_books(
    State(state): State<crate::AppState>,
    Query(query): Query<LatestQuery>,
) -> AppResult<Json<Vec<BookDetails>>> {
    let books = state.services.books.latest(query.count).await?;
    Ok(Json(books))
}

/// Author, genre and publisher choices for the book form
#[utoipa::path(
    get,
    path = "/books/form-options",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Form choices", body = BookFormOptions),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn book_form_options(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<BookFormOptions>> {
    let options = state.services.books.form_options().await?;
    Ok(Json(options))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.books.get_details(id).await?;
    Ok(Json(book))
}

/// Current values and form choices for editing a book
#[utoipa::path(
    get,
    path = "/books/{id}/edit",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Edit form", body = BookEditForm),
        (status = 403, description = "Not the creator of the book"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookEditForm>> {
    let form = state.services.books.edit_form(id, claims.actor()).await?;
    Ok(Json(form))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input or unresolvable author, genre or publisher"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    data.validate()?;

    let book = state.services.books.create(data, claims.actor()).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 403, description = "Not the creator of the book"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    data.validate()?;

    let book = state.services.books.edit(id, data, claims.actor()).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted or already absent"),
        (status = 403, description = "Not the creator of the book")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id, claims.actor()).await?;
    Ok(StatusCode::NO_CONTENT)
}
