//! Publisher endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::publisher::{Publisher, PublisherRequest},
};

use super::AuthenticatedUser;

/// List publishers
#[utoipa::path(
    get,
    path = "/publishers",
    tag = "publishers",
    responses(
        (status = 200, description = "Publishers ordered by name", body = Vec<Publisher>)
    )
)]
pub async fn list_publishers(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Publisher>>> {
    let publishers = state.services.publishers.list().await?;
    Ok(Json(publishers))
}

/// Get publisher by ID
#[utoipa::path(
    get,
    path = "/publishers/{id}",
    tag = "publishers",
    params(
        ("id" = Uuid, Path, description = "Publisher ID")
    ),
    responses(
        (status = 200, description = "Publisher", body = Publisher),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn get_publisher(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Publisher>> {
    let publisher = state.services.publishers.get(id).await?;
    Ok(Json(publisher))
}

/// Create a publisher (admin only)
#[utoipa::path(
    post,
    path = "/publishers",
    tag = "publishers",
    security(("bearer_auth" = [])),
    request_body = PublisherRequest,
    responses(
        (status = 201, description = "Publisher created", body = Publisher),
        (status = 400, description = "Invalid or duplicate name"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_publisher(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<PublisherRequest>,
) -> AppResult<(StatusCode, Json<Publisher>)> {
    claims.require_admin()?;
    data.validate()?;

    let publisher = state.services.publishers.create(data).await?;
    Ok((StatusCode::CREATED, Json(publisher)))
}

/// Update a publisher (admin only)
#[utoipa::path(
    put,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Publisher ID")
    ),
    request_body = PublisherRequest,
    responses(
        (status = 200, description = "Publisher updated", body = Publisher),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn update_publisher(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<PublisherRequest>,
) -> AppResult<Json<Publisher>> {
    claims.require_admin()?;
    data.validate()?;

    let publisher = state.services.publishers.update(id, data).await?;
    Ok(Json(publisher))
}

/// Delete a publisher (admin only)
#[utoipa::path(
    delete,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Publisher ID")
    ),
    responses(
        (status = 204, description = "Publisher deleted or already absent"),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Publisher still has books")
    )
)]
pub async fn delete_publisher(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.publishers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
