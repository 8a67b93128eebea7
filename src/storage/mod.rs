pub mod json_file;
pub mod memory;
pub mod models;
pub mod types;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Well-known keys of the persisted state layout.
pub(crate) mod keys {
    pub(crate) const USER: &str = "eduUser";
    pub(crate) const CONTENTS: &str = "eduContents";
    pub(crate) const QUIZZES: &str = "eduQuizzes";
    pub(crate) const ATTEMPTS: &str = "eduAttempts";
    pub(crate) const STORED_FILES: &str = "storedFiles";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt record under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize record for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous key-value persistence port. Values are opaque strings; the
/// stores serialize and deserialize structured data themselves.
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub(crate) fn load_json<T: DeserializeOwned>(
    backend: &dyn KeyValueBackend,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match backend.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt { key: key.to_string(), source }),
        None => Ok(None),
    }
}

pub(crate) fn store_json<T: Serialize + ?Sized>(
    backend: &dyn KeyValueBackend,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)
        .map_err(|source| StorageError::Serialize { key: key.to_string(), source })?;
    backend.set(key, &raw)
}
