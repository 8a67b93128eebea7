use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::storage::types::ClassLevel;

#[derive(Debug, Clone)]
pub struct Settings {
    pub(super) runtime: RuntimeSettings,
    pub(super) storage: StorageSettings,
    pub(super) auth: AuthSettings,
    pub(super) uploads: UploadSettings,
    pub(super) telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub(crate) environment: Environment,
    pub(crate) strict_config: bool,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub(crate) data_dir: PathBuf,
}

impl StorageSettings {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding the JSON state files, one per persisted key.
    pub fn state_dir(&self) -> PathBuf {
        self.data_dir.join("state")
    }
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub(crate) simulated_latency_ms: u64,
    pub(crate) default_student_class: ClassLevel,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub(crate) max_upload_size_mb: u64,
    pub(crate) allowed_video_extensions: Vec<String>,
    pub(crate) allowed_document_extensions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Staging,
    Test,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Test => "test",
        }
    }

    pub(super) fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("missing required value for {0}")]
    MissingValue(&'static str),
}
