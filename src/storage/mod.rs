//! Image uploads to the storage bucket of the backend service.

use async_trait::async_trait;
use tracing::error;

use crate::config::{ConfigError, SupabaseConfig};

/// Errors from the storage API layer
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Storage returned a non-2xx status code
    #[error("Storage API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// An uploaded file taken from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Browsers send an empty part when no file was picked
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `path` without overwriting; returns the public URL
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError>;
}

/// `items/{owner}-{millis}.{ext}`; extension from the file name, `jpg` when it has none
pub fn object_path(owner_id: &str, unix_millis: i64, file_name: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim())
        .filter(|ext| !ext.is_empty())
        .unwrap_or("jpg");
    format!("items/{owner_id}-{unix_millis}.{ext}")
}

/// Upload an image for `owner_id` and return its public URL.
///
/// Failures are logged and reported as `None`; callers that need the image
/// treat that as a hard failure.
pub async fn upload_image(
    storage: &dyn ObjectStorage,
    file: UploadedFile,
    owner_id: &str,
) -> Option<String> {
    let path = object_path(owner_id, chrono::Utc::now().timestamp_millis(), &file.file_name);
    let content_type = file
        .content_type
        .as_deref()
        .filter(|ct| !ct.is_empty())
        .unwrap_or("image/jpeg")
        .to_string();

    match storage.put(&path, file.bytes, &content_type).await {
        Ok(url) => Some(url),
        Err(e) => {
            error!("Upload error: {}", e);
            None
        }
    }
}

/// Storage bucket client authenticated with the service role key
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: url::Url,
    service_key: String,
    bucket: String,
}

impl SupabaseStorage {
    /// Fails when the URL or the service role key is not configured
    pub fn new(config: &SupabaseConfig) -> Result<Self, StorageError> {
        let (base_url, key) = config.service_credentials()?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            service_key: key.to_string(),
            bucket: config.storage_bucket.clone(),
        })
    }

    fn endpoint(&self, segment: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            segment,
            self.bucket,
            path
        )
    }

    pub fn public_url(&self, path: &str) -> String {
        self.endpoint("public/", path)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        let response = self
            .client
            .post(self.endpoint("", path))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(self.public_url(path))
    }
}
