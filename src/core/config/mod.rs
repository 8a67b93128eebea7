mod parsing;
mod settings;
mod types;

pub use types::{
    AuthSettings, ConfigError, Environment, RuntimeSettings, Settings, StorageSettings,
    TelemetrySettings, UploadSettings,
};
