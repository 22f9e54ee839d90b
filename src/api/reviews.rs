//! Review endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::review::{Review, ReviewDetails, ReviewForm, ReviewRequest},
};

use super::AuthenticatedUser;

/// Reviews of a book, newest first
#[utoipa::path(
    get,
    path = "/books/{id}/reviews",
    tag = "reviews",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Reviews with reviewer email", body = Vec<ReviewDetails>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_book_reviews(
    State(state): State<crate::AppState>,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<Vec<ReviewDetails>>> {
    let reviews = state.services.reviews.list_for_book(book_id).await?;
    Ok(Json(reviews))
}

/// Data for the review form of a book
#[utoipa::path(
    get,
    path = "/books/{id}/reviews/form",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book being reviewed", body = ReviewForm),
        (status = 404, description = "Book not found")
    )
)]
pub async fn review_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<ReviewForm>> {
    let form = state.services.reviews.review_form(book_id).await?;
    Ok(Json(form))
}

/// Review a book
#[utoipa::path(
    post,
    path = "/books/{id}/reviews",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn create_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<Uuid>,
    Json(data): Json<ReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    data.validate()?;

    let review = state
        .services
        .reviews
        .create(book_id, data, claims.actor())
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Get a review
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "reviews",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review", body = ReviewDetails),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReviewDetails>> {
    let review = state.services.reviews.get(id).await?;
    Ok(Json(review))
}

/// Edit a review
#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 403, description = "Not the author of the review"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<ReviewRequest>,
) -> AppResult<Json<Review>> {
    data.validate()?;

    let review = state.services.reviews.edit(id, data, claims.actor()).await?;
    Ok(Json(review))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted or already absent"),
        (status = 403, description = "Not the author of the review")
    )
)]
pub async fn delete_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.reviews.delete(id, claims.actor()).await?;
    Ok(StatusCode::NO_CONTENT)
}
