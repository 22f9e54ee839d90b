//! Genre endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::genre::{Genre, GenreRequest},
};

use super::AuthenticatedUser;

/// List genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genres ordered by name", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.genres.list().await?;
    Ok(Json(genres))
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.get(id).await?;
    Ok(Json(genre))
}

/// Create a genre (admin only)
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    security(("bearer_auth" = [])),
    request_body = GenreRequest,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid or duplicate name"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<GenreRequest>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    claims.require_admin()?;
    data.validate()?;

    let genre = state.services.genres.create(data).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// Rename a genre (admin only)
#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    request_body = GenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<GenreRequest>,
) -> AppResult<Json<Genre>> {
    claims.require_admin()?;
    data.validate()?;

    let genre = state.services.genres.update(id, data).await?;
    Ok(Json(genre))
}

/// Delete a genre (admin only)
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted or already absent"),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Genre still used by books")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.genres.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
