//! Common test utilities: in-process app construction and request helpers.
//!
//! Tests drive the real router through `tower::ServiceExt::oneshot` against a
//! temp-directory SQLite database and storage directory, so every test runs
//! hermetically and in parallel.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use project_depot_backend::api::{routes, AppState};
use project_depot_backend::config::Config;
use project_depot_backend::db;
use project_depot_backend::storage::{FilesystemStorage, StorageBackend};

pub const BOUNDARY: &str = "depot-test-boundary";

/// A fully wired application over throwaway state
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    pub storage_path: PathBuf,
    _tmp: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let tmp = TempDir::new().expect("create temp dir");
    let database_url = format!("sqlite://{}", tmp.path().join("depot.db").display());
    let storage_path = tmp.path().join("uploads");

    let pool = db::create_pool(&database_url).await.expect("create pool");
    db::MIGRATOR.run(&pool).await.expect("run migrations");

    tokio::fs::create_dir_all(&storage_path)
        .await
        .expect("create storage dir");

    let config = Config {
        database_url,
        bind_address: "127.0.0.1:0".into(),
        storage_path: storage_path.display().to_string(),
        cors_origins: "http://localhost:3000".into(),
        max_upload_bytes: 64 * 1024 * 1024,
    };

    let storage: Arc<dyn StorageBackend> = Arc::new(FilesystemStorage::new(&storage_path));
    let cors = routes::cors_layer(&config).expect("cors layer");
    let state = Arc::new(AppState::new(config, pool.clone(), storage));
    let app = routes::create_router(state).layer(cors);

    TestApp {
        app,
        pool,
        storage_path,
        _tmp: tmp,
    }
}

/// Build a multipart/form-data body with an optional file part plus text fields.
pub fn multipart_body(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/zip\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST /upload with the given archive and form fields.
pub async fn upload(
    app: &Router,
    filename: &str,
    content: &[u8],
    fields: &[(&str, &str)],
) -> (StatusCode, Value) {
    let body = multipart_body(Some((filename, content)), fields);
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    split_json(response).await
}

/// GET `uri` and return the raw response.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// GET `uri` and parse the body as JSON.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    split_json(get(app, uri).await).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn split_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = body_bytes(response).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Resolve a record id by filename via /list.
pub async fn project_id(app: &Router, name: &str) -> String {
    let (status, list) = get_json(app, "/list").await;
    assert_eq!(status, StatusCode::OK);
    list.as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == name)
        .unwrap_or_else(|| panic!("no record named {name}"))["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Current download count for a record.
pub async fn download_count(app: &Router, id: &str) -> i64 {
    let (status, project) = get_json(app, &format!("/project/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    project["downloadCount"].as_i64().unwrap()
}
