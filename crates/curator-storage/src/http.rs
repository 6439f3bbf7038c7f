//! HTTP client for the storage backend's REST API
//!
//! Control-plane calls go to the configured endpoint with bearer
//! authentication and are scoped to one collection. Transfer-plane calls
//! (`fetch_object`, `write_upload`) go straight at backend-issued URLs,
//! which carry their own authorization.

use crate::{Result, StorageError, StorageGateway, RemoteObject, UploadSession};
use crate::DEFAULT_TIMEOUT_SECS;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;
use url::Url;

/// Configuration for the HTTP storage backend
#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Backend API endpoint (e.g., "https://api.vault.example/v1")
    pub endpoint: String,
    /// Bearer token for control-plane calls
    pub access_token: String,
    /// Collection the client operates on
    pub collection: String,
    /// Request timeout
    pub timeout: Duration,
}

impl StorageConfig {
    /// Create a new storage config
    pub fn new(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_token: access_token.into(),
            collection: collection.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Request body for opening an upload session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewUploadBody<'a> {
    file_name: &'a str,
    content_type: &'a str,
    folder: &'a str,
}

/// Response for listing a collection
#[derive(Debug, Deserialize)]
struct ListFilesResponse {
    files: Vec<RemoteObject>,
}

/// HTTP storage backend client
#[derive(Clone)]
pub struct HttpStorage {
    client: Client,
    config: StorageConfig,
}

impl HttpStorage {
    /// Create a new storage client
    pub fn new(config: StorageConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            StorageError::Configuration(format!("invalid endpoint {}: {}", config.endpoint, e))
        })?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(StorageError::Configuration(format!(
                "endpoint must be http or https: {}",
                config.endpoint
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the authorization header value
    fn auth_header(&self) -> String {
        format!("Bearer {}", self.config.access_token)
    }

    /// Build a control-plane URL
    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl StorageGateway for HttpStorage {
    #[instrument(skip(self), fields(file = %file_name, folder = %folder))]
    async fn initiate_upload(
        &self,
        file_name: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<UploadSession> {
        let url = self.api_url(&format!("collections/{}/uploads", self.config.collection));

        let body = NewUploadBody {
            file_name,
            content_type,
            folder,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn complete_upload(&self, session_uuid: &str) -> Result<()> {
        let url = self.api_url(&format!("uploads/{}/complete", session_uuid));

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(StorageError::SessionNotFound(session_uuid.to_string()));
        }
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_objects(&self) -> Result<Vec<RemoteObject>> {
        let url = self.api_url(&format!("collections/{}/files", self.config.collection));

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let listing: ListFilesResponse = response
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;

        Ok(listing.files)
    }

    #[instrument(skip(self))]
    async fn delete_object(&self, uuid: &str) -> Result<()> {
        let url = self.api_url(&format!("files/{}", uuid));

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(StorageError::ObjectNotFound(uuid.to_string()));
        }
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        Ok(())
    }

    #[instrument(skip(self, link))]
    async fn fetch_object(&self, link: &str) -> Result<Bytes> {
        let response = self.client.get(link).send().await?;

        if response.status().as_u16() == 404 {
            return Err(StorageError::ObjectNotFound(link.to_string()));
        }
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        Ok(response.bytes().await?)
    }

    #[instrument(skip(self, upload_url, content), fields(bytes = content.len()))]
    async fn write_upload(
        &self,
        upload_url: &str,
        content: Bytes,
        content_type: &str,
    ) -> Result<()> {
        let response = self
            .client
            .put(upload_url)
            .header("Content-Type", content_type)
            .body(content)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        Ok(())
    }
}

/// Wrap a non-success response, keeping the backend's own description
async fn upstream_error(response: reqwest::Response) -> StorageError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    StorageError::Upstream { status, message }
}
