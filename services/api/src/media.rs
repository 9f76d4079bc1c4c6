//! Media staging and upload
//!
//! Multipart file parts are spooled to disk as a [`StagedFile`], then handed
//! to the [`MediaUploader`], which pushes the content to the remote media
//! store and reports the public URL. The uploader never raises: a failed
//! transfer comes back as `None` and the caller decides whether that is
//! fatal. The staged temp file is removed on every exit path.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::{Client, primitives::ByteStream};
use tempfile::{NamedTempFile, TempPath};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::MediaConfig;

/// A multipart file spooled to a temporary path on local disk.
///
/// Holding a `StagedFile` guarantees the local content exists; dropping it
/// deletes the temp file, so cleanup happens exactly once whether the upload
/// succeeds, fails, or never runs.
#[derive(Debug)]
pub struct StagedFile {
    path: TempPath,
    file_name: String,
    content_type: Option<String>,
}

impl StagedFile {
    /// Spool raw part bytes to a fresh temp file.
    pub fn stage(
        bytes: &[u8],
        file_name: impl Into<String>,
        content_type: Option<String>,
    ) -> Result<Self> {
        let file = NamedTempFile::new().context("failed to create temp file for upload")?;
        std::fs::write(file.path(), bytes).context("failed to spool upload to temp file")?;

        Ok(Self {
            path: file.into_temp_path(),
            file_name: file_name.into(),
            content_type,
        })
    }

    pub fn local_path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Extension of the original filename, if it had one.
    fn extension(&self) -> Option<&str> {
        Path::new(&self.file_name).extension().and_then(|e| e.to_str())
    }
}

/// A successfully uploaded object's stable remote reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
}

/// Remote media store seam.
///
/// Production is S3; tests swap in fakes. Each `put` is a fresh transfer,
/// nothing is deduplicated across calls.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload the file at `local_path` under `key`, returning its public URL.
    async fn put(
        &self,
        local_path: &Path,
        key: &str,
        content_type: Option<&str>,
    ) -> Result<String>;
}

/// S3-backed media store.
#[derive(Clone)]
pub struct S3MediaStore {
    client: Client,
    config: MediaConfig,
}

impl S3MediaStore {
    pub fn new(client: Client, config: MediaConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn put(
        &self,
        local_path: &Path,
        key: &str,
        content_type: Option<&str>,
    ) -> Result<String> {
        let content = tokio::fs::read(local_path)
            .await
            .context("failed to read staged file")?;
        let byte_stream = ByteStream::from(content);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .body(byte_stream);
        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }

        request.send().await.context("S3 put_object failed")?;

        Ok(format!("{}/{}", self.config.public_base_url, key))
    }
}

/// Upload adapter sitting between the registration pipeline and the store.
///
/// Absent input short-circuits to `None` without touching the network. A
/// transfer failure is logged and also mapped to `None`; whether that is
/// fatal depends on what the file was for, which only the caller knows.
#[derive(Clone)]
pub struct MediaUploader {
    store: Arc<dyn MediaStore>,
}

impl MediaUploader {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    /// Upload a staged file, if there is one.
    ///
    /// The file is consumed either way; its temp content is gone by the time
    /// this returns.
    pub async fn upload(&self, staged: Option<StagedFile>) -> Option<UploadedMedia> {
        let staged = staged?;

        let key = match staged.extension() {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        let result = self
            .store
            .put(staged.local_path(), &key, staged.content_type.as_deref())
            .await;

        match result {
            Ok(url) => {
                info!(key = %key, file = %staged.file_name, "media uploaded");
                Some(UploadedMedia { url })
            }
            Err(err) => {
                warn!(file = %staged.file_name, error = ?err, "media upload failed");
                None
            }
        }
    }
}
