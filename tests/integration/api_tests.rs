//! API integration tests, driving the router in-process

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use lending_ledger::{api, repository::JsonFileStore, AppConfig, AppState, Ledger};

/// Router over an empty ledger whose data file lives in `dir`
fn test_app(dir: &TempDir) -> Router {
    let mut config = AppConfig::default();
    config.library.data_file = dir.path().join("library.json");
    api::router(AppState::new(config, Ledger::new("Central Library"), JsonFileStore::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

async fn add_dune_and_alice(app: &Router) {
    let (status, _) = send(
        app,
        "POST",
        "/api/v1/items",
        Some(json!({"title": "Dune", "author": "Herbert", "year": 1965, "genre": "SciFi"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/api/v1/patrons",
        Some(json!({"name": "Alice", "patron_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_check() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["library"], "Central Library");
}

#[tokio::test]
async fn test_lend_and_return() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    add_dune_and_alice(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/loans",
        Some(json!({"patron_id": 1, "title": "Dune"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "lent");
    assert_eq!(body["entry"]["author"], "Herbert");

    let (_, shelf) = send(&app, "GET", "/api/v1/items", None).await;
    assert_eq!(shelf, json!([]));

    let (_, held) = send(&app, "GET", "/api/v1/patrons/1/items", None).await;
    assert_eq!(held[0]["title"], "Dune");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/loans/return",
        Some(json!({"patron_id": 1, "title": "Dune"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "returned");

    let (_, shelf) = send(&app, "GET", "/api/v1/items", None).await;
    assert_eq!(shelf[0]["title"], "Dune");
    let (_, held) = send(&app, "GET", "/api/v1/patrons/1/items", None).await;
    assert_eq!(held, json!([]));
}

#[tokio::test]
async fn test_lend_unavailable() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    add_dune_and_alice(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/loans",
        Some(json!({"patron_id": 1, "title": "Nonexistent"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemNotAvailable");

    let (_, shelf) = send(&app, "GET", "/api/v1/items", None).await;
    assert_eq!(shelf.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_duplicate_patron() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    add_dune_and_alice(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/patrons",
        Some(json!({"name": "Bob", "patron_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8);

    let (_, patrons) = send(&app, "GET", "/api/v1/patrons", None).await;
    assert_eq!(patrons.as_array().map(Vec::len), Some(1));
    assert_eq!(patrons[0]["name"], "Alice");
}

#[tokio::test]
async fn test_return_not_held_and_unknown_patron() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    add_dune_and_alice(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/loans/return",
        Some(json!({"patron_id": 1, "title": "Dune"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/api/v1/patrons/99/items", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_and_remove() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    add_dune_and_alice(&app).await;

    let (status, body) = send(&app, "GET", "/api/v1/items/search?title=Dune", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["year"], 1965);

    let (_, body) = send(
        &app,
        "GET",
        "/api/v1/items/search?title=Dune&author=Asimov",
        None,
    )
    .await;
    assert_eq!(body["item"], Value::Null);

    send(
        &app,
        "POST",
        "/api/v1/loans",
        Some(json!({"patron_id": 1, "title": "Dune"})),
    )
    .await;
    let (_, body) = send(&app, "GET", "/api/v1/items/search?title=Dune", None).await;
    assert_eq!(body["item"], Value::Null);
    assert_eq!(body["held_by"], 1);

    // Held entries are not on the shelf and cannot be removed.
    let (status, _) = send(
        &app,
        "DELETE",
        "/api/v1/items",
        Some(json!({"title": "Dune", "author": "Herbert"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_entry_rejected() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/items",
        Some(json!({"title": "", "author": "Herbert", "year": 1965})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    add_dune_and_alice(&app).await;
    send(
        &app,
        "POST",
        "/api/v1/loans",
        Some(json!({"patron_id": 1, "title": "Dune"})),
    )
    .await;

    let (status, body) = send(&app, "POST", "/api/v1/storage/save", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patrons"], 1);
    assert_eq!(body["shelved"], 0);

    // A second app over the same directory starts empty, then loads.
    let fresh = test_app(&dir);
    let (status, body) = send(&fresh, "POST", "/api/v1/storage/load", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["library"], "Central Library");

    let (_, held) = send(&fresh, "GET", "/api/v1/patrons/1/items", None).await;
    assert_eq!(held[0]["title"], "Dune");
    assert_eq!(held[0]["genre"], "SciFi");
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, "POST", "/api/v1/storage/load", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_save_writes_snapshot_and_bad_load_keeps_state() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    add_dune_and_alice(&app).await;

    let (status, _) = send(&app, "POST", "/api/v1/storage/save", None).await;
    assert_eq!(status, StatusCode::OK);
    let saved: Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("library.json")).unwrap()).unwrap();
    assert_eq!(saved["books"][0]["title"], "Dune");
    assert_eq!(saved["readers"][0]["reader_id"], 1);

    std::fs::write(dir.path().join("library.json"), "{ not json").unwrap();
    let (status, body) = send(&app, "POST", "/api/v1/storage/load", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "NoSuchData");

    // The ledger is still usable after the failed load.
    let (_, shelf) = send(&app, "GET", "/api/v1/items", None).await;
    assert_eq!(shelf[0]["title"], "Dune");
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/loans",
        Some(json!({"patron_id": 1, "title": "Dune"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_openapi_document() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/loans"].is_object());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_lends_have_one_winner() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    add_dune_and_alice(&app).await;
    for id in 2..=8 {
        send(
            &app,
            "POST",
            "/api/v1/patrons",
            Some(json!({"name": format!("Reader {}", id), "patron_id": id})),
        )
        .await;
    }

    let mut tasks = Vec::new();
    for id in 1..=8 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            send(
                &app,
                "POST",
                "/api/v1/loans",
                Some(json!({"patron_id": id, "title": "Dune"})),
            )
            .await
            .0
        }));
    }

    let mut lent = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::CREATED => lent += 1,
            status => assert_eq!(status, StatusCode::CONFLICT),
        }
    }
    assert_eq!(lent, 1);

    let (_, patrons) = send(&app, "GET", "/api/v1/patrons", None).await;
    let holdings: usize = patrons
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["held_items"].as_array().map_or(0, Vec::len))
        .sum();
    assert_eq!(holdings, 1);
}
