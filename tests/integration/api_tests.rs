//! API integration tests against a running server
//!
//! Start the server with the default seed configuration, then run
//! `cargo test -- --ignored`.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";
const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "AdminPassword123!";

async fn login(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Register a throwaway account and return its token
async fn register_reader(client: &Client) -> String {
    let email = format!("reader-{}@example.com", Uuid::new_v4());
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({ "email": email, "password": "password123" }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), StatusCode::CREATED);

    login(client, &email, "password123").await
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_seeded_admin_can_login() {
    let client = Client::new();
    let token = login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["roles"]
        .as_array()
        .expect("roles array")
        .iter()
        .any(|r| r == "Admin"));
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_new_references_then_filter() {
    let client = Client::new();
    let token = register_reader(&client).await;
    let suffix = Uuid::new_v4().simple().to_string();
    let title = format!("Dune {}", suffix);

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "title": title,
            "new_author_name": format!("Frank Herbert {}", suffix),
            "new_genre_name": format!("Sci-Fi {}", suffix),
            "new_publisher_name": format!("Chilton {}", suffix)
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let book: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[
            ("title", suffix.to_uppercase()),
            ("author_id", book["author_id"].as_str().unwrap_or_default().to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    let listing: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["books"][0]["title"], title);
}

#[tokio::test]
#[ignore]
async fn test_stranger_cannot_delete_book() {
    let client = Client::new();
    let owner = register_reader(&client).await;
    let stranger = register_reader(&client).await;
    let suffix = Uuid::new_v4().simple().to_string();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(&owner)
        .json(&json!({
            "title": "Owned book",
            "new_author_name": format!("Author {}", suffix),
            "new_genre_name": format!("Genre {}", suffix),
            "new_publisher_name": format!("Publisher {}", suffix)
        }))
        .send()
        .await
        .expect("Failed to send request");
    let book: Value = response.json().await.expect("Failed to parse response");
    let id = book["id"].as_str().expect("book id");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .bearer_auth(&stranger)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}
