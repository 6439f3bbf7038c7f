//! HttpStorage against a mocked backend API

use std::time::Duration;

use bytes::Bytes;
use curator_storage::{HttpStorage, StorageConfig, StorageError, StorageGateway};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn storage_for(server: &MockServer) -> HttpStorage {
    let config = StorageConfig::new(server.uri(), "test-token", "gallery")
        .with_timeout(Duration::from_secs(5));
    HttpStorage::new(config).unwrap()
}

#[tokio::test]
async fn initiate_upload_decodes_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/gallery/uploads"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(json!({
            "fileName": "ADDR1.jpg",
            "contentType": "image/jpeg",
            "folder": "pending",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sessionUuid": "s-1",
            "uploadUrl": "https://up.vault.example/s-1",
            "fileUuid": "f-1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    let session = storage
        .initiate_upload("ADDR1.jpg", "image/jpeg", "pending")
        .await
        .unwrap();

    assert_eq!(session.session_uuid, "s-1");
    assert_eq!(session.upload_url, "https://up.vault.example/s-1");
    assert_eq!(session.file_uuid, "f-1");
}

#[tokio::test]
async fn initiate_upload_wraps_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/gallery/uploads"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    let result = storage
        .initiate_upload("ADDR1.jpg", "image/jpeg", "pending")
        .await;

    match result {
        Err(StorageError::Upstream { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance window");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn complete_upload_hits_session_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/uploads/s-1/complete"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    storage.complete_upload("s-1").await.unwrap();
}

#[tokio::test]
async fn complete_unknown_session_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/uploads/s-9/complete"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    let result = storage.complete_upload("s-9").await;

    assert!(matches!(result, Err(StorageError::SessionNotFound(id)) if id == "s-9"));
}

#[tokio::test]
async fn list_objects_decodes_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/gallery/files"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [
                {
                    "uuid": "u-1",
                    "name": "ADDR1.jpg",
                    "folder": "pending",
                    "contentLink": "https://cdn.vault.example/u-1",
                    "size": 42,
                },
                {
                    "uuid": "u-2",
                    "name": "ADDR2.png",
                    "folder": "approved",
                },
            ],
        })))
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    let listing = storage.list_objects().await.unwrap();

    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].uuid, "u-1");
    assert_eq!(listing[0].folder, "pending");
    assert_eq!(
        listing[0].content_link.as_deref(),
        Some("https://cdn.vault.example/u-1")
    );
    assert_eq!(listing[1].content_link, None);
    assert_eq!(listing[1].size, 0);
}

#[tokio::test]
async fn list_objects_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/gallery/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    let result = storage.list_objects().await;

    assert!(matches!(result, Err(StorageError::InvalidResponse(_))));
}

#[tokio::test]
async fn delete_object_hits_file_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/files/u-1"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    storage.delete_object("u-1").await.unwrap();
}

#[tokio::test]
async fn delete_unknown_object_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/files/u-9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    let result = storage.delete_object("u-9").await;

    assert!(matches!(result, Err(StorageError::ObjectNotFound(id)) if id == "u-9"));
}

#[tokio::test]
async fn fetch_object_returns_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg bytes".as_slice()))
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    let content = storage
        .fetch_object(&format!("{}/content/u-1", server.uri()))
        .await
        .unwrap();

    assert_eq!(content.as_ref(), b"jpeg bytes");
}

#[tokio::test]
async fn write_upload_sends_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/up/s-1"))
        .and(header("Content-Type", "image/jpeg"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let storage = storage_for(&server);
    storage
        .write_upload(
            &format!("{}/up/s-1", server.uri()),
            Bytes::from_static(b"jpeg bytes"),
            "image/jpeg",
        )
        .await
        .unwrap();
}
