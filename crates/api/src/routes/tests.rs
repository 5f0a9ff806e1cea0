//! Router tests for routes that answer without a database.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use studio_core::storage::StorageService;
use studio_shared::{DocumentsConfig, StorageSettings};
use tower::ServiceExt;

use crate::{AppState, create_router};

const BOUNDARY: &str = "studio-test-boundary";

fn app(dir: &tempfile::TempDir, documents: DocumentsConfig) -> Router {
    let storage = StorageService::from_settings(&StorageSettings::Local {
        root: dir.path().to_path_buf(),
    })
    .expect("storage");
    create_router(AppState {
        db: Arc::new(DatabaseConnection::Disconnected),
        storage: Arc::new(storage),
        documents: Arc::new(documents),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn multipart(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/documents")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(app(&dir, DocumentsConfig::default()), get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_document_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(
        app(&dir, DocumentsConfig::default()),
        get("/api/v1/documents/catalog"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 10);
    assert_eq!(body["max_file_size"], 10 * 1024 * 1024);
    assert!(
        body["allowed_extensions"]
            .as_array()
            .unwrap()
            .contains(&Value::from("pdf"))
    );
}

#[tokio::test]
async fn test_template_types() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(
        app(&dir, DocumentsConfig::default()),
        get("/api/v1/signature-templates/types"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let types = body.as_array().unwrap();
    assert_eq!(types.len(), 8);
    assert_eq!(types[0]["value"], "basic");
    assert_eq!(types[3]["label"], "Client Approval");
}

#[tokio::test]
async fn test_upload_rejects_disallowed_extension() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(
        app(&dir, DocumentsConfig::default()),
        multipart(&[("file", Some("setup.exe"), b"MZ\x90\x00")]),
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = DocumentsConfig {
        max_file_size: 8,
        ..DocumentsConfig::default()
    };
    let (status, body) = send(
        app(&dir, config),
        multipart(&[
            ("category", None, b"contracts"),
            ("file", Some("contract.pdf"), b"%PDF-1.7 too long"),
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_upload_over_body_limit_is_payload_too_large() {
    let dir = tempfile::tempdir().unwrap();
    let config = DocumentsConfig {
        max_file_size: 8,
        ..DocumentsConfig::default()
    };
    let data = vec![b'x'; 128 * 1024];
    let (status, body) = send(
        app(&dir, config),
        multipart(&[("file", Some("scan.pdf"), data.as_slice())]),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_upload_requires_file_part() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(
        app(&dir, DocumentsConfig::default()),
        multipart(&[("description", None, b"no file here")]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_upload_rejects_malformed_client_id() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(
        app(&dir, DocumentsConfig::default()),
        multipart(&[
            ("client_id", None, b"not-a-uuid"),
            ("file", Some("brief.pdf"), b"%PDF"),
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("client_id"));
}

#[tokio::test]
async fn test_malformed_document_id() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(&dir, DocumentsConfig::default())
        .oneshot(get("/api/v1/documents/42"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
