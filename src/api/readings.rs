//! Personal reading log endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::reading::{CreateReading, Reading, ReadingDetails, ReadingForm},
};

use super::AuthenticatedUser;

/// The caller's reading log
#[utoipa::path(
    get,
    path = "/readings",
    tag = "readings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own reading entries", body = Vec<ReadingDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_readings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ReadingDetails>>> {
    let readings = state.services.readings.list_mine(claims.actor()).await?;
    Ok(Json(readings))
}

/// Books a reading can be logged against
#[utoipa::path(
    get,
    path = "/readings/form",
    tag = "readings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Book choices", body = ReadingForm)
    )
)]
pub async fn reading_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<ReadingForm>> {
    let form = state.services.readings.add_form().await?;
    Ok(Json(form))
}

/// Log a finished reading
#[utoipa::path(
    post,
    path = "/readings",
    tag = "readings",
    security(("bearer_auth" = [])),
    request_body = CreateReading,
    responses(
        (status = 201, description = "Reading logged", body = Reading),
        (status = 400, description = "Invalid dates or rating"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn add_reading(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateReading>,
) -> AppResult<(StatusCode, Json<Reading>)> {
    data.validate()?;

    let reading = state.services.readings.add(claims.actor(), data).await?;
    Ok((StatusCode::CREATED, Json(reading)))
}

/// Remove an entry from the caller's reading log
#[utoipa::path(
    delete,
    path = "/readings/{id}",
    tag = "readings",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Reading ID")
    ),
    responses(
        (status = 204, description = "Reading deleted or already absent"),
        (status = 403, description = "Entry belongs to another user")
    )
)]
pub async fn delete_reading(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.readings.delete(id, claims.actor()).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::api::{router, test_support::*};

    #[tokio::test]
    async fn reading_log_requires_authentication() {
        let app = router(Stores::default().state());
        let response = app.oneshot(get("/api/v1/readings")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn only_own_rows_are_requested() {
        let user = Uuid::new_v4();
        let mut stores = Stores::default();
        stores
            .readings
            .expect_list_for_user()
            .withf(move |id| *id == user)
            .times(1)
            .returning(|_| Ok(vec![]));
        let auth = stores.sign_in(user, false);
        let app = router(stores.state());

        let request = with_auth("GET", "/api/v1/readings", &auth, None);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
