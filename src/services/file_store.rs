use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::core::config::UploadSettings;
use crate::core::time::{now_utc, unix_millis};
use crate::storage::models::StoredFile;
use crate::storage::types::ContentType;
use crate::storage::{keys, load_json, store_json, KeyValueBackend, StorageError};
use crate::stores::{read_lock, write_lock};

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("file name has no usable characters")]
    InvalidFileName,
    #[error("file name must have an extension")]
    MissingExtension,
    #[error("file extension '{extension}' is not allowed for {content_type}")]
    ExtensionNotAllowed { extension: String, content_type: &'static str },
    #[error("file exceeds the {limit_mb} MB upload limit")]
    TooLarge { limit_mb: u64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A stored file resolved to its on-disk location.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub metadata: StoredFile,
}

/// Path-addressed file store: bytes live on disk under the data directory,
/// metadata lives in the persisted `storedFiles` map, both keyed by the same
/// synthetic path (`uploads/videos/<ts>-<name>` or `uploads/documents/...`).
pub struct FileStore {
    root: PathBuf,
    backend: Arc<dyn KeyValueBackend>,
    uploads: UploadSettings,
    inner: RwLock<HashMap<String, StoredFile>>,
}

impl FileStore {
    pub fn open(
        root: impl Into<PathBuf>,
        backend: Arc<dyn KeyValueBackend>,
        uploads: &UploadSettings,
    ) -> Result<Self, FileStoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let files: HashMap<String, StoredFile> =
            load_json(backend.as_ref(), keys::STORED_FILES)?.unwrap_or_default();
        tracing::info!(files = files.len(), root = %root.display(), "file store loaded");

        Ok(Self { root, backend, uploads: uploads.clone(), inner: RwLock::new(files) })
    }

    /// Writes the payload under a fresh timestamp-prefixed path, records its
    /// metadata, and returns the path for use as a content URL.
    pub fn save_file(
        &self,
        bytes: &[u8],
        content_type: ContentType,
        file_name: &str,
    ) -> Result<String, FileStoreError> {
        let limit_mb = self.uploads.max_upload_size_mb;
        if bytes.len() as u64 > limit_mb * 1024 * 1024 {
            return Err(FileStoreError::TooLarge { limit_mb });
        }

        let slug = sanitize_file_name(file_name)?;
        let extension = Path::new(&slug)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .ok_or(FileStoreError::MissingExtension)?;

        let allowed = match content_type {
            ContentType::Video => &self.uploads.allowed_video_extensions,
            ContentType::Pdf => &self.uploads.allowed_document_extensions,
        };
        if !allowed.iter().any(|candidate| candidate == &extension) {
            return Err(FileStoreError::ExtensionNotAllowed {
                extension,
                content_type: content_type.as_str(),
            });
        }

        let now = now_utc();
        let path = format!("{}/{}-{}", content_type.upload_dir(), unix_millis(now), slug);

        let absolute = self.root.join(&path);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&absolute, bytes)?;

        let metadata = StoredFile {
            name: file_name.to_string(),
            mime_type: guess_mime(&extension).to_string(),
            size: bytes.len() as u64,
            last_modified: now,
            checksum: hex::encode(Sha256::digest(bytes)),
        };

        let mut inner = write_lock(&self.inner);
        inner.insert(path.clone(), metadata);
        store_json(self.backend.as_ref(), keys::STORED_FILES, &*inner)?;

        tracing::info!(path = %path, size = bytes.len(), "file stored");
        Ok(path)
    }

    /// Exact-path lookup. Absent metadata or missing bytes on disk resolve
    /// to `None`; both are logged, neither is an error.
    pub fn get_file(&self, path: &str) -> Option<FileHandle> {
        let metadata = match read_lock(&self.inner).get(path) {
            Some(metadata) => metadata.clone(),
            None => {
                tracing::error!(path, "file not found");
                return None;
            }
        };

        let absolute = self.root.join(path);
        if !absolute.is_file() {
            tracing::warn!(path, "stored file metadata points at missing bytes");
            return None;
        }

        Some(FileHandle { path: absolute, metadata })
    }

    /// Removes bytes and metadata. Returns whether an entry existed.
    pub fn delete_file(&self, path: &str) -> Result<bool, FileStoreError> {
        let mut inner = write_lock(&self.inner);
        if inner.remove(path).is_none() {
            return Ok(false);
        }

        match fs::remove_file(self.root.join(path)) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        store_json(self.backend.as_ref(), keys::STORED_FILES, &*inner)?;
        tracing::debug!(path, "file deleted");
        Ok(true)
    }
}

/// Collapses whitespace to dashes, lowercases, and keeps only the final
/// path component so a crafted name cannot escape the upload directory.
fn sanitize_file_name(raw: &str) -> Result<String, FileStoreError> {
    let normalized = raw.trim().replace('\\', "/");
    let base = normalized.rsplit('/').next().unwrap_or("");

    let slug = base.split_whitespace().collect::<Vec<_>>().join("-").to_ascii_lowercase();
    let slug = slug.trim_matches('.').to_string();
    if slug.is_empty() {
        return Err(FileStoreError::InvalidFileName);
    }

    Ok(slug)
}

fn guess_mime(extension: &str) -> &'static str {
    match extension {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
