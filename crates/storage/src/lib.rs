//! Object storage backends.
//!
//! [`ObjectStore`] abstracts the bucket the order pipeline uploads into.
//! Two implementations exist: [`S3ObjectStore`] for production (S3 or any
//! S3-compatible endpoint) and [`MemoryObjectStore`] for local development
//! and tests.

pub mod batch;

use std::collections::HashMap;
use std::sync::Mutex;

use aws_sdk_s3::primitives::ByteStream;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the object storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An upload failed; `key` names the object that did not land.
    #[error("Upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },

    /// A delete failed. Deletes are best-effort; callers usually log this.
    #[error("Delete failed: {0}")]
    Delete(String),

    /// The backend is misconfigured (missing bucket, bad endpoint, ...).
    #[error("Storage configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// ObjectStore trait
// ---------------------------------------------------------------------------

/// A bucket-like object store.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` under `key`, passing the declared content type
    /// through. Returns the stored path (the key as persisted).
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    /// Remove objects by key. Missing keys are not an error.
    async fn remove(&self, keys: &[String]) -> Result<(), StorageError>;

    /// Public URL for a stored key.
    fn public_url(&self, key: &str) -> String;
}

// ---------------------------------------------------------------------------
// S3 backend
// ---------------------------------------------------------------------------

/// Environment-driven configuration for the S3 backend.
///
/// | Variable             | Required | Notes                                  |
/// |----------------------|----------|----------------------------------------|
/// | `STORAGE_BUCKET`     | yes      | Bucket name                            |
/// | `STORAGE_PUBLIC_URL` | yes      | Base URL public object URLs hang off   |
/// | `STORAGE_ENDPOINT`   | no       | Custom endpoint for S3-compatibles     |
/// | `STORAGE_ACCESS_KEY` | no       | Static credentials; both or neither    |
/// | `STORAGE_SECRET_KEY` | no       | of the key variables must be set       |
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub public_base_url: String,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl S3Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, StorageError> {
        let bucket = std::env::var("STORAGE_BUCKET")
            .map_err(|_| StorageError::Config("STORAGE_BUCKET must be set".into()))?;
        let public_base_url = std::env::var("STORAGE_PUBLIC_URL")
            .map_err(|_| StorageError::Config("STORAGE_PUBLIC_URL must be set".into()))?;
        let access_key = std::env::var("STORAGE_ACCESS_KEY").ok();
        let secret_key = std::env::var("STORAGE_SECRET_KEY").ok();
        if access_key.is_some() != secret_key.is_some() {
            return Err(StorageError::Config(
                "STORAGE_ACCESS_KEY and STORAGE_SECRET_KEY must be set together".into(),
            ));
        }
        Ok(Self {
            bucket,
            public_base_url,
            endpoint: std::env::var("STORAGE_ENDPOINT").ok(),
            access_key,
            secret_key,
        })
    }
}

/// S3-backed object store (AWS or any S3-compatible endpoint).
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStore {
    /// Build a store from config, loading AWS credentials from the
    /// default provider chain.
    pub async fn new(config: S3Config) -> Self {
        let base = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&base);
        if let Some(endpoint) = &config.endpoint {
            // S3-compatible stores generally require path-style addressing.
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            builder = builder.credentials_provider(aws_credential_types::Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                "tessella-env",
            ));
        }
        let client = aws_sdk_s3::Client::from_conf(builder.build());
        Self {
            client,
            bucket: config.bucket,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes));
        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }
        request.send().await.map_err(|e| StorageError::Upload {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(key.to_string())
    }

    async fn remove(&self, keys: &[String]) -> Result<(), StorageError> {
        for key in keys {
            self.client
                .delete_object()
                .bucket(&self.bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| StorageError::Delete(e.to_string()))?;
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Stored object in the in-memory backend.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// In-process object store for local development and tests.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().expect("memory store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an object exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .lock()
            .expect("memory store lock")
            .contains_key(key)
    }

    /// Fetch a stored object by key.
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .expect("memory store lock")
            .get(key)
            .cloned()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        self.objects.lock().expect("memory store lock").insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(key.to_string())
    }

    async fn remove(&self, keys: &[String]) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().expect("memory store lock");
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("memory://{key}")
    }
}
