//! User administration endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::user::{AdminRoleToggled, UserWithRole},
};

use super::AuthenticatedUser;

/// List all accounts with their admin flag (admin only)
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = Vec<UserWithRole>),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<UserWithRole>>> {
    claims.require_admin()?;

    let users = state.services.admin.list_users().await?;
    Ok(Json(users))
}

/// Grant or revoke the Admin role (admin only)
#[utoipa::path(
    post,
    path = "/admin/users/{id}/toggle-admin",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "New admin state", body = AdminRoleToggled),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn toggle_admin(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AdminRoleToggled>> {
    claims.require_admin()?;

    let toggled = state.services.admin.toggle_admin_role(id).await?;
    Ok(Json(toggled))
}
