//! Sequential upload batch for order submissions.
//!
//! Files upload strictly one at a time in slot order: logo, then media in
//! selection order, then other. The first failure short-circuits the
//! batch; later files are not attempted and objects already uploaded are
//! left in place. Rollback is a separate, best-effort call the api layer
//! makes only when the order record itself fails to persist.

use tessella_core::upload::{storage_key, UploadRole};

use crate::{ObjectStore, StorageError};

/// A file waiting to be uploaded, with its declared content type passed
/// through from the client.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub role: UploadRole,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A successfully uploaded file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UploadedFile {
    pub role: UploadRole,
    pub key: String,
    pub url: String,
}

/// Upload `files` one at a time, collecting public URLs in upload order.
///
/// `submission_millis` prefixes every storage key so one submission's
/// objects share a uniqueness token. On the first failure the error is
/// returned immediately; the caller learns nothing about how many files
/// succeeded beyond what the store now contains.
pub async fn upload_batch(
    store: &dyn ObjectStore,
    submission_millis: i64,
    files: Vec<PendingUpload>,
) -> Result<Vec<UploadedFile>, StorageError> {
    let mut uploaded = Vec::with_capacity(files.len());
    for file in files {
        let key = storage_key(submission_millis, &file.file_name);
        store
            .put(&key, file.bytes, file.content_type.as_deref())
            .await?;
        tracing::debug!(key = %key, role = file.role.as_str(), "Uploaded order file");
        let url = store.public_url(&key);
        uploaded.push(UploadedFile {
            role: file.role,
            key,
            url,
        });
    }
    Ok(uploaded)
}

/// Best-effort compensating deletes for an abandoned submission.
///
/// Failures are logged and swallowed; the orphaned objects are harmless
/// beyond the storage they occupy.
pub async fn rollback_uploads(store: &dyn ObjectStore, uploaded: &[UploadedFile]) {
    if uploaded.is_empty() {
        return;
    }
    let keys: Vec<String> = uploaded.iter().map(|f| f.key.clone()).collect();
    if let Err(err) = store.remove(&keys).await {
        tracing::warn!(error = %err, count = keys.len(), "Rollback of uploaded objects failed");
    }
}
