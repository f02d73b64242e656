//! Real source adapters and the lookup service against stub providers

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use bibliotheque_server::{
    error::LookupFailure,
    services::isbn::IsbnLookupService,
    sources::{BibliographicSource, BnfSource, GoogleBooksSource, OpenLibrarySource, SourceOutcome},
};
use serde_json::json;

use crate::support::*;

#[tokio::test]
async fn test_each_source_returns_no_match_for_unknown_code() {
    let bnf = ok_stub("/sparql", BNF_EMPTY).await;
    let google = ok_stub("/volumes", GOOGLE_EMPTY).await;
    let open_library = ok_stub("/api/books", "{}").await;
    let config = lookup_config(&bnf, &google, &open_library);

    let sources: Vec<Box<dyn BibliographicSource>> = vec![
        Box::new(BnfSource::new(&config.bnf, &config.user_agent).unwrap()),
        Box::new(GoogleBooksSource::new(&config.google_books, &config.user_agent).unwrap()),
        Box::new(OpenLibrarySource::new(&config.open_library, &config.user_agent).unwrap()),
    ];

    for source in &sources {
        assert_eq!(
            source.lookup("0000000000000").await,
            SourceOutcome::NoMatch,
            "{} should not match",
            source.name()
        );
    }
    assert_eq!(bnf.hits() + google.hits() + open_library.hits(), 3);
}

#[tokio::test]
async fn test_non_success_status_is_no_match() {
    let google = spawn_stub("/volumes", StatusCode::SERVICE_UNAVAILABLE, GOOGLE_FOX, Duration::ZERO).await;
    let source = GoogleBooksSource::new(&source_config(google.url.clone()), "tests").unwrap();

    assert_eq!(source.lookup(FANTASTIC_MR_FOX_ISBN).await, SourceOutcome::NoMatch);
    assert_eq!(google.hits(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_no_match() {
    let open_library = ok_stub("/api/books", "<html>maintenance</html>").await;
    let source = OpenLibrarySource::new(&source_config(open_library.url.clone()), "tests").unwrap();

    assert_eq!(source.lookup(FANTASTIC_MR_FOX_ISBN).await, SourceOutcome::NoMatch);
}

#[tokio::test]
async fn test_unreachable_source_is_no_match() {
    // Nothing listens on the discard port
    let source = BnfSource::new(&source_config("http://127.0.0.1:9/sparql".to_string()), "tests").unwrap();
    assert_eq!(source.lookup(FANTASTIC_MR_FOX_ISBN).await, SourceOutcome::NoMatch);
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let slow = spawn_stub("/api/books", StatusCode::OK, OPEN_LIBRARY_FOX, Duration::from_secs(5)).await;
    let source = OpenLibrarySource::new(&source_config(slow.url.clone()), "tests").unwrap();

    let start = Instant::now();
    let outcome = source.lookup(FANTASTIC_MR_FOX_ISBN).await;
    let elapsed = start.elapsed();

    assert_eq!(outcome, SourceOutcome::NoMatch);
    assert!(elapsed < Duration::from_secs(3), "lookup took {:?}", elapsed);
}

#[tokio::test]
async fn test_falls_back_to_open_library() {
    let bnf = ok_stub("/sparql", BNF_EMPTY).await;
    let google = spawn_stub("/volumes", StatusCode::INTERNAL_SERVER_ERROR, GOOGLE_EMPTY, Duration::ZERO).await;
    let open_library = ok_stub("/api/books", OPEN_LIBRARY_FOX).await;
    let service = IsbnLookupService::from_config(&lookup_config(&bnf, &google, &open_library)).unwrap();

    let record = service.resolve(FANTASTIC_MR_FOX_ISBN).await.unwrap();

    assert_eq!(record.source, "Open Library");
    assert_eq!(record.identifier, FANTASTIC_MR_FOX_ISBN);
    assert_eq!(record.title.as_deref(), Some("Fantastic Mr. Fox"));
    assert!(record.authors.contains(&"Roald Dahl".to_string()));
    assert_eq!(record.publisher.as_deref(), Some("Puffin"));
    assert_eq!(record.subjects, vec!["Animals", "Foxes", "Fiction", "Farmers", "Humor"]);
    assert_eq!((bnf.hits(), google.hits(), open_library.hits()), (1, 1, 1));
}

#[tokio::test]
async fn test_highest_priority_hit_wins() {
    let bnf = ok_stub("/sparql", BNF_FOX).await;
    let google = ok_stub("/volumes", GOOGLE_FOX).await;
    let open_library = ok_stub("/api/books", OPEN_LIBRARY_FOX).await;
    let service = IsbnLookupService::from_config(&lookup_config(&bnf, &google, &open_library)).unwrap();

    let record = service.resolve(FANTASTIC_MR_FOX_ISBN).await.unwrap();

    assert_eq!(record.source, "BnF");
    assert_eq!(record.title.as_deref(), Some("Fantastique maître Renard"));
    assert_eq!((bnf.hits(), google.hits(), open_library.hits()), (1, 0, 0));
}

#[tokio::test]
async fn test_timeout_then_next_source() {
    let bnf = spawn_stub("/sparql", StatusCode::OK, BNF_FOX, Duration::from_secs(5)).await;
    let google = ok_stub("/volumes", GOOGLE_FOX).await;
    let open_library = ok_stub("/api/books", OPEN_LIBRARY_FOX).await;
    let service = IsbnLookupService::from_config(&lookup_config(&bnf, &google, &open_library)).unwrap();

    let start = Instant::now();
    let record = service.resolve(FANTASTIC_MR_FOX_ISBN).await.unwrap();

    assert_eq!(record.source, "Google Books");
    assert_eq!(record.page_count, Some(112));
    assert!(start.elapsed() < Duration::from_secs(3));
    assert_eq!(open_library.hits(), 0);
}

#[tokio::test]
async fn test_every_source_failing_is_lookup_failure() {
    let bnf = spawn_stub("/sparql", StatusCode::BAD_GATEWAY, BNF_EMPTY, Duration::ZERO).await;
    let google = ok_stub("/volumes", GOOGLE_EMPTY).await;
    let open_library = ok_stub("/api/books", "{}").await;
    let service = IsbnLookupService::from_config(&lookup_config(&bnf, &google, &open_library)).unwrap();

    assert_eq!(service.resolve("0000000000000").await, Err(LookupFailure));
}

#[tokio::test]
async fn test_repeated_resolves_are_identical_and_uncached() {
    let bnf = ok_stub("/sparql", BNF_EMPTY).await;
    let google = ok_stub("/volumes", GOOGLE_FOX).await;
    let open_library = ok_stub("/api/books", OPEN_LIBRARY_FOX).await;
    let service = IsbnLookupService::from_config(&lookup_config(&bnf, &google, &open_library)).unwrap();

    let first = service.resolve(FANTASTIC_MR_FOX_ISBN).await.unwrap();
    let second = service.resolve(FANTASTIC_MR_FOX_ISBN).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(google.hits(), 2);
}

#[tokio::test]
async fn test_google_books_sends_query_and_key() {
    let router = Router::new().route(
        "/volumes",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let authorized = params.get("key").map(String::as_str) == Some("secret");
            let query_ok = params.get("q").map(String::as_str) == Some("isbn:9780140328721");
            if authorized && query_ok {
                Json(serde_json::from_str::<serde_json::Value>(GOOGLE_FOX).unwrap())
            } else {
                Json(json!({"totalItems": 0}))
            }
        }),
    );
    let url = serve(router).await;

    let mut config = source_config(url);
    config.api_key = Some("secret".to_string());
    let source = GoogleBooksSource::new(&config, "tests").unwrap();

    match source.lookup(FANTASTIC_MR_FOX_ISBN).await {
        SourceOutcome::Found(record) => {
            assert_eq!(record.authors, vec!["Roald Dahl"]);
            assert_eq!(record.source, "Google Books");
        }
        SourceOutcome::NoMatch => panic!("expected a match with the API key"),
    }

    config.api_key = None;
    let anonymous = GoogleBooksSource::new(&config, "tests").unwrap();
    assert_eq!(anonymous.lookup(FANTASTIC_MR_FOX_ISBN).await, SourceOutcome::NoMatch);
}

#[tokio::test]
async fn test_bnf_sends_sparql_query() {
    let router = Router::new().route(
        "/sparql",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let query = params.get("query").cloned().unwrap_or_default();
            if query.contains(r#"= "9780140328721")"#) {
                Json(serde_json::from_str::<serde_json::Value>(BNF_FOX).unwrap())
            } else {
                Json(serde_json::from_str::<serde_json::Value>(BNF_EMPTY).unwrap())
            }
        }),
    );
    let url = serve(router).await;
    let source: Arc<dyn BibliographicSource> =
        Arc::new(BnfSource::new(&source_config(format!("{}/sparql", url)), "tests").unwrap());

    match source.lookup(FANTASTIC_MR_FOX_ISBN).await {
        SourceOutcome::Found(record) => assert_eq!(record.authors, vec!["Roald Dahl"]),
        SourceOutcome::NoMatch => panic!("expected the BnF stub to match"),
    }
    match source.lookup("978-0-14-032872-1").await {
        SourceOutcome::Found(record) => assert_eq!(record.identifier, "978-0-14-032872-1"),
        SourceOutcome::NoMatch => panic!("expected a hyphenated code to match"),
    }
    assert_eq!(source.lookup("0000000000000").await, SourceOutcome::NoMatch);
}
