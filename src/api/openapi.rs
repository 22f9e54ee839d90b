//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, auth, authors, books, genres, health, publishers, readings, reviews};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Manager API",
        version = "0.3.0",
        description = "Book catalog, reviews and personal reading log REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::list_all_books,
        books::latest_books,
        books::book_form_options,
        books::get_book,
        books::edit_book_form,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        authors::book_candidates,
        authors::assign_book,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Publishers
        publishers::list_publishers,
        publishers::get_publisher,
        publishers::create_publisher,
        publishers::update_publisher,
        publishers::delete_publisher,
        // Reviews
        reviews::list_book_reviews,
        reviews::review_form,
        reviews::create_review,
        reviews::get_review,
        reviews::update_review,
        reviews::delete_review,
        // Reading log
        readings::list_my_readings,
        readings::reading_form,
        readings::add_reading,
        readings::delete_reading,
        // Administration
        admin::list_users,
        admin::toggle_admin,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::RegisterRequest,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::AccountProfile,
            // Books
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::BookListing,
            crate::models::book::BookQuery,
            crate::models::book::BookFormOptions,
            crate::models::book::BookEditForm,
            crate::models::book::BookOption,
            crate::models::book::NameOption,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Authors, genres, publishers
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            crate::models::author::AssignBook,
            crate::models::genre::Genre,
            crate::models::genre::GenreRequest,
            crate::models::publisher::Publisher,
            crate::models::publisher::PublisherRequest,
            // Reviews
            crate::models::review::Review,
            crate::models::review::ReviewDetails,
            crate::models::review::ReviewRequest,
            crate::models::review::ReviewForm,
            // Reading log
            crate::models::reading::Reading,
            crate::models::reading::ReadingDetails,
            crate::models::reading::CreateReading,
            crate::models::reading::ReadingForm,
            // Administration
            crate::models::user::UserWithRole,
            crate::models::user::AdminRoleToggled,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and authentication"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "publishers", description = "Publisher management"),
        (name = "reviews", description = "Book reviews"),
        (name = "readings", description = "Personal reading log"),
        (name = "admin", description = "User administration")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by secured paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_secured_book_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/books"));
        assert!(doc.paths.paths.contains_key("/books/{id}/reviews"));
        assert!(doc.paths.paths.contains_key("/admin/users/{id}/toggle-admin"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
