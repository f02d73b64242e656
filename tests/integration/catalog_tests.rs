//! Catalog tests against a real PostgreSQL database
//!
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored catalog

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use bibliotheque_server::{
    api, config::AppConfig, repository::Repository, services::Services, AppState,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use crate::support::*;

async fn app() -> Router {
    let bnf = ok_stub("/sparql", BNF_EMPTY).await;
    let google = ok_stub("/volumes", GOOGLE_EMPTY).await;
    let open_library = ok_stub("/api/books", OPEN_LIBRARY_FOX).await;

    let mut config = AppConfig::default();
    config.lookup = lookup_config(&bnf, &google, &open_library);
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let services = Services::new(Repository::new(pool), &config.lookup).expect("Failed to create services");
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

/// Placard name no other test run uses
fn unique_placard() -> String {
    format!("test-{}", Uuid::new_v4())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn create_book(app: &Router, placard: &str, title: &str, author: &str) -> Value {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/books",
        Some(json!({"title": title, "author": author, "placard": placard, "shelf": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

fn titles(books: &Value) -> Vec<&str> {
    books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
#[ignore]
async fn test_catalog_import_from_lookup() {
    let app = app().await;
    let placard = unique_placard();

    let (status, book) = call(
        &app,
        Method::POST,
        "/api/isbn/9780140328721/import",
        Some(json!({"placard": placard, "shelf": "2"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{}", book);
    assert_eq!(book["title"], "Fantastic Mr. Fox");
    assert_eq!(book["author"], "Roald Dahl");
    assert_eq!(book["edition"], "Puffin");
    assert_eq!(book["isbn"], "9780140328721");
    assert_eq!(book["barcode"], "9780140328721");
    assert_eq!(book["placard"], placard.as_str());
    assert_eq!(book["shelf"], "2");
    assert_eq!(book["count"], 1);
    assert_eq!(book["status"], "disponible");
    assert_eq!(book["language"], "fr");
    assert_eq!(book["category"], "Général");
    assert_eq!(book["pages"], 96);
    assert_eq!(book["publication_year"], 1988);

    let uri = format!("/api/books/{}", book["id"].as_str().unwrap());
    let (status, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], book["id"]);
}

#[tokio::test]
#[ignore]
async fn test_catalog_list_filters_and_sort() {
    let app = app().await;
    let placard = unique_placard();
    create_book(&app, &placard, "Les Fables", "La Fontaine").await;
    create_book(&app, &placard, "Candide", "Voltaire").await;
    create_book(&app, &placard, "Zadig", "Voltaire").await;

    let uri = format!("/api/books?placard={}&sort_by=title&sort_order=desc", placard);
    let (status, books) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&books), vec!["Zadig", "Les Fables", "Candide"]);

    let uri = format!("/api/books?placard={}&search=voltaire&sort_by=title", placard);
    let (_, books) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(titles(&books), vec!["Candide", "Zadig"]);

    let uri = format!("/api/books?placard={}&search=fontaine", placard);
    let (_, books) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(titles(&books), vec!["Les Fables"]);

    let uri = format!("/api/books?placard={}&status=perdu", placard);
    let (_, books) = call(&app, Method::GET, &uri, None).await;
    assert!(books.as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_catalog_search_wildcards_are_literal() {
    let app = app().await;
    let placard = unique_placard();
    create_book(&app, &placard, "100% Bio", "Anonyme").await;
    create_book(&app, &placard, "1000 recettes", "Anonyme").await;
    create_book(&app, &placard, "Cuisine_facile", "Anonyme").await;
    create_book(&app, &placard, "Cuisine du monde", "Anonyme").await;

    let uri = format!("/api/books?placard={}&search=100%25", placard);
    let (_, books) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(titles(&books), vec!["100% Bio"]);

    let uri = format!("/api/books?placard={}&search=cuisine_", placard);
    let (_, books) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(titles(&books), vec!["Cuisine_facile"]);
}

#[tokio::test]
#[ignore]
async fn test_catalog_partial_update_and_delete() {
    let app = app().await;
    let placard = unique_placard();
    let book = create_book(&app, &placard, "Candide", "Voltaire").await;
    let uri = format!("/api/books/{}", book["id"].as_str().unwrap());

    let (status, updated) = call(&app, Method::PUT, &uri, Some(json!({"count": 3, "status": "emprunté"}))).await;
    assert_eq!(status, StatusCode::OK, "{}", updated);
    assert_eq!(updated["count"], 3);
    assert_eq!(updated["status"], "emprunté");
    assert_eq!(updated["title"], "Candide");
    assert_eq!(updated["date_added"], book["date_added"]);
    assert_ne!(updated["last_modified"], book["last_modified"]);

    let (status, body) = call(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Livre non trouvé");

    let (status, _) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_storage_unique_names_conflict() {
    let app = app().await;
    let placard = unique_placard();

    let (status, created) = call(&app, Method::POST, "/api/placards", Some(json!({"name": placard}))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);
    assert_eq!(created["storage_type"], "placard");

    let padded = format!("  {}  ", placard);
    let (status, body) = call(&app, Method::POST, "/api/placards", Some(json!({"name": padded}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains(&placard));

    let shelf = json!({"name": "1", "placard_name": placard});
    let (status, _) = call(&app, Method::POST, "/api/shelves", Some(shelf.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = call(&app, Method::POST, "/api/shelves", Some(shelf)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].is_string());

    let uri = format!("/api/shelves?placard={}", placard);
    let (_, shelves) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(shelves.as_array().unwrap().len(), 1);

    let uri = format!("/api/placards/{}", created["id"].as_str().unwrap());
    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Placard non trouvé");
}
